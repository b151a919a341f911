//! Camera lifecycle: Idle -> Starting -> Live -> Idle.
//!
//! A live session owns exactly three resources (the media stream, the
//! analysis socket, and the capture timer) and they are released together.
//! The phase machine is generic over the session so the transition and
//! tick-gating rules run in host tests with a mock session.

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MessageEvent, WebSocket,
};
use yew::html::Scope;

use shared::ClientMessage;

use crate::{Model, Msg};

pub const VIDEO_ELEMENT_ID: &str = "camera-preview";
pub const CAPTURE_PERIOD_MS: u32 = 5_000;
const JPEG_QUALITY: f64 = 0.8;
const LIVE_SOCKET_PATH: &str = "/fashion/live";

#[derive(Error, Clone, Debug)]
pub enum CameraError {
    #[error("Camera is not available in this browser.")]
    Unsupported,
    #[error("Camera access failed: {0}")]
    Device(String),
    #[error("Could not open the live analysis connection.")]
    Socket,
}

/// The three resources behind a live phase, seen through the seam the
/// phase machine needs: an open-socket check, a frame send, a release.
pub trait CaptureSession {
    fn socket_open(&self) -> bool;
    fn capture_and_send(&self);
    fn release(&mut self);
}

pub enum CameraPhase<S> {
    Idle,
    Starting,
    Live(S),
}

impl<S: CaptureSession> CameraPhase<S> {
    pub fn is_idle(&self) -> bool {
        matches!(self, CameraPhase::Idle)
    }

    pub fn is_starting(&self) -> bool {
        matches!(self, CameraPhase::Starting)
    }

    /// One capture-loop tick. Quietly a no-op unless the phase is live with
    /// an open socket; a closed socket here is an expected race during
    /// connect and teardown, not an error.
    pub fn tick(&self) {
        if let CameraPhase::Live(session) = self {
            if session.socket_open() {
                session.capture_and_send();
            }
        }
    }

    /// Unconditional, idempotent teardown. Safe from any phase, any number
    /// of times; resources are released at most once.
    pub fn stop(&mut self) {
        if let CameraPhase::Live(mut session) = std::mem::replace(self, CameraPhase::Idle) {
            session.release();
        }
    }
}

/// Live session bound to the browser: camera stream + analysis socket +
/// capture timer, plus the socket listener that feeds `Msg::LiveFrame`.
pub struct BrowserSession {
    stream: MediaStream,
    socket: WebSocket,
    timer: Option<Interval>,
    _socket_listener: EventListener,
}

impl BrowserSession {
    pub fn open(stream: MediaStream, link: &Scope<Model>) -> Result<Self, CameraError> {
        let Some(url) = live_socket_url() else {
            stop_tracks(&stream);
            return Err(CameraError::Socket);
        };
        let socket = match WebSocket::new(&url) {
            Ok(socket) => socket,
            Err(_) => {
                stop_tracks(&stream);
                return Err(CameraError::Socket);
            }
        };

        attach_preview(&stream);

        let listener = EventListener::new(&socket, "message", {
            let link = link.clone();
            move |event| {
                if let Some(message) = event.dyn_ref::<MessageEvent>() {
                    if let Some(text) = message.data().as_string() {
                        link.send_message(Msg::LiveFrame(text));
                    }
                }
            }
        });

        let timer = Interval::new(CAPTURE_PERIOD_MS, {
            let link = link.clone();
            move || link.send_message(Msg::CaptureTick)
        });

        Ok(Self {
            stream,
            socket,
            timer: Some(timer),
            _socket_listener: listener,
        })
    }
}

impl CaptureSession for BrowserSession {
    fn socket_open(&self) -> bool {
        self.socket.ready_state() == WebSocket::OPEN
    }

    fn capture_and_send(&self) {
        let Some(frame) = snapshot_frame() else {
            return;
        };
        match serde_json::to_string(&ClientMessage::Image { image: frame }) {
            // Fire-and-forget: a failed send is dropped, the next tick retries.
            Ok(text) => {
                if self.socket.send_with_str(&text).is_err() {
                    log::debug!("live frame dropped: socket send failed");
                }
            }
            Err(err) => log::warn!("could not encode live frame: {err}"),
        }
    }

    fn release(&mut self) {
        stop_tracks(&self.stream);
        let _ = self.socket.close();
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        detach_preview();
    }
}

/// Ask for a front-facing 1280x720 stream.
pub async fn request_camera_stream() -> Result<MediaStream, CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::Unsupported)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::FALSE);
    constraints.set_video(&video_constraints());

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|error| CameraError::Device(js_error_message(&error)))?;
    let granted = JsFuture::from(promise)
        .await
        .map_err(|error| CameraError::Device(js_error_message(&error)))?;
    granted
        .dyn_into::<MediaStream>()
        .map_err(|_| CameraError::Unsupported)
}

pub fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn video_constraints() -> JsValue {
    // { width: {ideal: 1280}, height: {ideal: 720}, facingMode: "user" }
    let video = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&video, &"width".into(), &ideal(1280.0));
    let _ = js_sys::Reflect::set(&video, &"height".into(), &ideal(720.0));
    let _ = js_sys::Reflect::set(&video, &"facingMode".into(), &"user".into());
    video.into()
}

fn ideal(value: f64) -> JsValue {
    let object = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&object, &"ideal".into(), &JsValue::from_f64(value));
    object.into()
}

fn live_socket_url() -> Option<String> {
    let location = web_sys::window()?.location();
    let protocol = location.protocol().ok()?;
    let host = location.host().ok()?;
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    Some(format!("{scheme}://{host}{LIVE_SOCKET_PATH}"))
}

fn attach_preview(stream: &MediaStream) {
    let Some(video) = video_element() else {
        return;
    };
    video.set_src_object(Some(stream));
    video.set_muted(true);
    let _ = video.set_attribute("playsinline", "");
    let _ = video.play();
}

fn detach_preview() {
    if let Some(video) = video_element() {
        video.set_src_object(None);
    }
}

fn video_element() -> Option<HtmlVideoElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(VIDEO_ELEMENT_ID)?
        .dyn_into()
        .ok()
}

fn snapshot_frame() -> Option<String> {
    let video = video_element()?;
    let canvas: HtmlCanvasElement = web_sys::window()?
        .document()?
        .create_element("canvas")
        .ok()?
        .dyn_into()
        .ok()?;
    canvas.set_width(video.video_width());
    canvas.set_height(video.video_height());
    let context: CanvasRenderingContext2d =
        canvas.get_context("2d").ok().flatten()?.dyn_into().ok()?;
    context
        .draw_image_with_html_video_element(&video, 0.0, 0.0)
        .ok()?;
    canvas
        .to_data_url_with_type_and_encoder_options("image/jpeg", &JsValue::from_f64(JPEG_QUALITY))
        .ok()
}

fn js_error_message(error: &JsValue) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_else(|| format!("{error:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct MockSession {
        open: bool,
        sent: Rc<Cell<u32>>,
        released: Rc<Cell<u32>>,
    }

    impl MockSession {
        fn new(open: bool) -> (Self, Rc<Cell<u32>>, Rc<Cell<u32>>) {
            let sent = Rc::new(Cell::new(0));
            let released = Rc::new(Cell::new(0));
            (
                Self {
                    open,
                    sent: sent.clone(),
                    released: released.clone(),
                },
                sent,
                released,
            )
        }
    }

    impl CaptureSession for MockSession {
        fn socket_open(&self) -> bool {
            self.open
        }

        fn capture_and_send(&self) {
            self.sent.set(self.sent.get() + 1);
        }

        fn release(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn stop_without_a_session_is_a_no_op() {
        let mut phase: CameraPhase<MockSession> = CameraPhase::Idle;
        phase.stop();
        phase.stop();
        assert!(phase.is_idle());
    }

    #[test]
    fn stop_releases_resources_exactly_once() {
        let (session, _, released) = MockSession::new(true);
        let mut phase = CameraPhase::Live(session);
        phase.stop();
        assert!(phase.is_idle());
        assert_eq!(released.get(), 1);

        phase.stop();
        assert_eq!(released.get(), 1, "second stop must not re-release");
    }

    #[test]
    fn stop_from_starting_returns_to_idle() {
        let mut phase: CameraPhase<MockSession> = CameraPhase::Starting;
        phase.stop();
        assert!(phase.is_idle());
    }

    #[test]
    fn tick_with_a_closed_socket_sends_nothing() {
        let (session, sent, _) = MockSession::new(false);
        let phase = CameraPhase::Live(session);
        phase.tick();
        phase.tick();
        assert_eq!(sent.get(), 0);
    }

    #[test]
    fn tick_sends_one_frame_when_the_socket_is_open() {
        let (session, sent, _) = MockSession::new(true);
        let phase = CameraPhase::Live(session);
        phase.tick();
        assert_eq!(sent.get(), 1);
    }

    #[test]
    fn tick_outside_live_is_a_no_op() {
        let phase: CameraPhase<MockSession> = CameraPhase::Idle;
        phase.tick();
        let phase: CameraPhase<MockSession> = CameraPhase::Starting;
        phase.tick();
    }
}
