use super::super::Model;
use yew::prelude::*;

use crate::render;

pub const RESULTS_REGION_ID: &str = "results-region";

pub fn render_results(model: &Model) -> Html {
    let markup = render::results_region(model.analysis.as_ref());
    html! {
        <div id={RESULTS_REGION_ID} class="results-container">
            { Html::from_html_unchecked(AttrValue::from(markup)) }
        </div>
    }
}

pub fn scroll_results_into_view() {
    if let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(RESULTS_REGION_ID))
    {
        element.scroll_into_view();
    }
}
