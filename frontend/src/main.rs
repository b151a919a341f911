use gloo_file::File as GlooFile;
use gloo_file::callbacks::{FileReader, read_as_data_url};
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, MediaStream};
use yew::prelude::*;

use shared::{
    AnalysisEnvelope, AnalysisPayload, AnalysisTypeInfo, ServerMessage, UserInfo,
    validate_image_upload,
};

mod api;
mod camera;
mod components;
mod render;

use api::ApiError;
use camera::{BrowserSession, CameraPhase};
use components::alerts::{ALERT_TTL_MS, Alert, AlertKind};
use components::utils::first_dropped_file;

const ANALYSIS_TYPE_KEY: &str = "analysis_type";
const DEFAULT_ANALYSIS_TYPE: &str = "comprehensive";

// Yew msg components
pub enum Msg {
    // Session
    AuthChecked(Option<UserInfo>),
    TypesLoaded(Vec<AnalysisTypeInfo>),
    SelectType(String),
    Logout,
    LoggedOut,

    // File intake
    FileChosen(GlooFile),
    NoFileSelected,
    PreviewReady(String),
    HandleDrop(DragEvent),
    SetDragging(bool),
    Clear,

    // Analysis
    Analyze,
    SelfTest,
    AnalysisOutcome(Result<AnalysisEnvelope, ApiError>),

    // Alerts
    ShowAlert(AlertKind, String),
    DismissAlert,

    // Camera
    StartCamera,
    CameraGranted(MediaStream),
    CameraDenied(String),
    StopCamera,
    CaptureTick,
    LiveFrame(String),
}

// Main component
pub struct Model {
    pub user: Option<UserInfo>,
    pub auth_checked: bool,
    pub analysis_types: Vec<AnalysisTypeInfo>,
    pub selected_type: String,
    pub file: Option<GlooFile>,
    pub preview: Option<String>,
    preview_reader: Option<FileReader>,
    pub analysis: Option<AnalysisPayload>,
    pub live: Option<AnalysisEnvelope>,
    pub loading: bool,
    pub alert: Option<Alert>,
    alert_timeout: Option<Timeout>,
    pub is_dragging: bool,
    pub camera: CameraPhase<BrowserSession>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let selected_type = LocalStorage::get(ANALYSIS_TYPE_KEY)
            .unwrap_or_else(|_| DEFAULT_ANALYSIS_TYPE.to_string());

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::check_auth().await {
                Ok(status) => {
                    let user = status.user.filter(|_| status.authenticated);
                    link.send_message(Msg::AuthChecked(user));
                }
                Err(err) => {
                    log::warn!("auth check failed: {err}");
                    link.send_message(Msg::AuthChecked(None));
                }
            }
        });

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::fetch_analysis_types().await {
                Ok(types) => link.send_message(Msg::TypesLoaded(types)),
                Err(err) => {
                    log::warn!("could not load analysis types: {err}");
                    link.send_message(Msg::ShowAlert(
                        AlertKind::Info,
                        "Analysis styles are unavailable right now; using the comprehensive one."
                            .into(),
                    ));
                }
            }
        });

        Self {
            user: None,
            auth_checked: false,
            analysis_types: Vec::new(),
            selected_type,
            file: None,
            preview: None,
            preview_reader: None,
            analysis: None,
            live: None,
            loading: false,
            alert: None,
            alert_timeout: None,
            is_dragging: false,
            camera: CameraPhase::Idle,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Session
            Msg::AuthChecked(user) => {
                self.auth_checked = true;
                self.user = user;
                true
            }
            Msg::TypesLoaded(types) => {
                self.analysis_types = types;
                true
            }
            Msg::SelectType(id) => {
                if let Err(err) = LocalStorage::set(ANALYSIS_TYPE_KEY, &id) {
                    log::warn!("could not persist analysis type: {err:?}");
                }
                self.selected_type = id;
                true
            }
            Msg::Logout => self.handle_logout(ctx),
            Msg::LoggedOut => {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
                false
            }

            // File intake
            Msg::FileChosen(file) => self.handle_file_chosen(ctx, file),
            Msg::NoFileSelected => {
                self.show_alert(ctx, AlertKind::Error, "No valid image file selected.".into());
                true
            }
            Msg::PreviewReady(url) => {
                self.preview = Some(url);
                self.preview_reader = None;
                true
            }
            Msg::HandleDrop(event) => {
                event.prevent_default();
                self.is_dragging = false;
                if let Some(file) = first_dropped_file(event.data_transfer()) {
                    ctx.link().send_message(Msg::FileChosen(file));
                }
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::Clear => self.handle_clear(),

            // Analysis
            Msg::Analyze => self.handle_analyze(ctx),
            Msg::SelfTest => self.handle_self_test(ctx),
            Msg::AnalysisOutcome(outcome) => self.handle_analysis_outcome(ctx, outcome),

            // Alerts
            Msg::ShowAlert(kind, text) => {
                self.show_alert(ctx, kind, text);
                true
            }
            Msg::DismissAlert => {
                self.alert = None;
                self.alert_timeout = None;
                true
            }

            // Camera
            Msg::StartCamera => self.handle_start_camera(ctx),
            Msg::CameraGranted(stream) => self.handle_camera_granted(ctx, stream),
            Msg::CameraDenied(reason) => {
                self.camera.stop();
                self.show_alert(ctx, AlertKind::Error, reason);
                true
            }
            Msg::StopCamera => {
                self.camera.stop();
                true
            }
            Msg::CaptureTick => {
                self.camera.tick();
                false
            }
            Msg::LiveFrame(text) => self.handle_live_frame(&text),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { components::auth::render_header(self, ctx) }

                <main class="main-content">
                {
                    if self.user.is_some() {
                        html! {
                            <>
                                { components::upload::render_upload_section(self, ctx) }
                                { components::alerts::render_alert(self, ctx) }
                                { components::results::render_results(self) }
                            </>
                        }
                    } else if self.auth_checked {
                        components::auth::render_login_prompt()
                    } else {
                        html! {
                            <div class="auth-loading">
                                <i class="fa-solid fa-spinner fa-spin"></i>
                                {" Checking session..."}
                            </div>
                        }
                    }
                }
                </main>

                <footer class="app-footer">
                    <p>{"Fashion Analysis Studio | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.camera.stop();
    }
}

// Handler methods
impl Model {
    fn handle_file_chosen(&mut self, ctx: &Context<Self>, file: GlooFile) -> bool {
        if let Err(err) = validate_image_upload(&file.raw_mime_type(), file.size()) {
            self.show_alert(ctx, AlertKind::Error, err.to_string());
            return true;
        }

        let link = ctx.link().clone();
        self.preview_reader = Some(read_as_data_url(&file, move |result| match result {
            Ok(url) => link.send_message(Msg::PreviewReady(url)),
            Err(err) => {
                log::warn!("preview read failed: {err:?}");
                link.send_message(Msg::ShowAlert(
                    AlertKind::Error,
                    "Could not read the selected image.".into(),
                ));
            }
        }));
        self.file = Some(file);
        true
    }

    /// The one full reset: preview, retained file, and rendered results all
    /// return to the empty/prompt state.
    fn handle_clear(&mut self) -> bool {
        self.file = None;
        self.preview = None;
        self.preview_reader = None;
        self.analysis = None;
        self.alert = None;
        self.alert_timeout = None;
        true
    }

    fn handle_analyze(&mut self, ctx: &Context<Self>) -> bool {
        let Some(file) = self.file.clone() else {
            self.show_alert(
                ctx,
                AlertKind::Error,
                "No image selected. Add a photo first.".into(),
            );
            return true;
        };

        self.loading = true;
        let analysis_type = self.selected_type.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = api::upload_analyze(&file, &analysis_type).await;
            link.send_message(Msg::AnalysisOutcome(outcome));
        });
        true
    }

    fn handle_self_test(&mut self, ctx: &Context<Self>) -> bool {
        self.loading = true;
        let link = ctx.link().clone();
        spawn_local(async move {
            let outcome = api::self_test().await;
            link.send_message(Msg::AnalysisOutcome(outcome));
        });
        true
    }

    fn handle_analysis_outcome(
        &mut self,
        ctx: &Context<Self>,
        outcome: Result<AnalysisEnvelope, ApiError>,
    ) -> bool {
        // Busy state is restored on every path, success or not.
        self.loading = false;
        match outcome {
            Ok(envelope) if envelope.success => match envelope.analysis {
                Some(payload) => {
                    self.analysis = Some(payload);
                    components::results::scroll_results_into_view();
                }
                None => self.show_alert(
                    ctx,
                    AlertKind::Error,
                    "The analysis came back empty.".into(),
                ),
            },
            Ok(envelope) => {
                let text = envelope
                    .error
                    .unwrap_or_else(|| "Analysis failed. Please try again.".into());
                self.show_alert(ctx, AlertKind::Error, text);
            }
            Err(err) => self.show_alert(ctx, AlertKind::Error, err.to_string()),
        }
        true
    }

    fn handle_logout(&mut self, ctx: &Context<Self>) -> bool {
        let link = ctx.link().clone();
        spawn_local(async move {
            // The client leaves for the login view whether or not this lands.
            if let Err(err) = api::logout().await {
                log::warn!("logout request failed: {err}");
            }
            link.send_message(Msg::LoggedOut);
        });
        false
    }

    fn handle_start_camera(&mut self, ctx: &Context<Self>) -> bool {
        if !self.camera.is_idle() {
            return false;
        }
        self.camera = CameraPhase::Starting;

        let link = ctx.link().clone();
        spawn_local(async move {
            match camera::request_camera_stream().await {
                Ok(stream) => link.send_message(Msg::CameraGranted(stream)),
                Err(err) => link.send_message(Msg::CameraDenied(err.to_string())),
            }
        });
        true
    }

    fn handle_camera_granted(&mut self, ctx: &Context<Self>, stream: MediaStream) -> bool {
        if !self.camera.is_starting() {
            // Stopped while the permission prompt was up.
            camera::stop_tracks(&stream);
            return false;
        }
        match BrowserSession::open(stream, ctx.link()) {
            Ok(session) => {
                self.camera = CameraPhase::Live(session);
                self.live = None;
                self.show_alert(
                    ctx,
                    AlertKind::Success,
                    "Camera is live. A new look is analyzed every few seconds.".into(),
                );
            }
            Err(err) => {
                self.camera = CameraPhase::Idle;
                self.show_alert(ctx, AlertKind::Error, err.to_string());
            }
        }
        true
    }

    fn handle_live_frame(&mut self, text: &str) -> bool {
        match serde_json::from_str::<ServerMessage>(text) {
            Ok(ServerMessage::Analysis { data }) => {
                self.live = Some(data);
                true
            }
            Ok(ServerMessage::Other) => false,
            Err(err) => {
                // Dropped, not fatal: one garbled frame should not end a
                // running camera session.
                log::warn!("ignoring malformed live frame: {err}");
                false
            }
        }
    }

    fn show_alert(&mut self, ctx: &Context<Self>, kind: AlertKind, text: String) {
        if let Some(timeout) = self.alert_timeout.take() {
            timeout.cancel();
        }
        self.alert = Some(Alert { kind, text });

        let link = ctx.link().clone();
        self.alert_timeout = Some(Timeout::new(ALERT_TTL_MS, move || {
            link.send_message(Msg::DismissAlert);
        }));
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
