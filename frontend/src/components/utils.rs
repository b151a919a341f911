use std::cell::RefCell;
use std::rc::Rc;

use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use web_sys::DataTransfer;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// First file of a drop/paste payload; the app retains a single image.
pub fn first_dropped_file(data_transfer: Option<DataTransfer>) -> Option<GlooFile> {
    data_transfer?
        .files()
        .and_then(|list| list.item(0))
        .map(GlooFile::from)
}
