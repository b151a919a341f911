use super::super::{Model, Msg};
use yew::prelude::*;

/// How long an alert stays up before it dismisses itself.
pub const ALERT_TTL_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Info,
    Success,
}

impl AlertKind {
    pub fn css_class(self) -> &'static str {
        match self {
            AlertKind::Error => "alert-error",
            AlertKind::Info => "alert-info",
            AlertKind::Success => "alert-success",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            AlertKind::Error => "fa-solid fa-circle-exclamation",
            AlertKind::Info => "fa-solid fa-circle-info",
            AlertKind::Success => "fa-solid fa-circle-check",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

pub fn render_alert(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(alert) = &model.alert else {
        return html! {};
    };
    html! {
        <div class={classes!("alert-banner", alert.kind.css_class())}>
            <i class={alert.kind.icon()}></i>
            <p>{ &alert.text }</p>
            <button
                class="alert-dismiss"
                title="Dismiss"
                onclick={ctx.link().callback(|_| Msg::DismissAlert)}
            >
                <i class="fa-solid fa-times"></i>
            </button>
        </div>
    }
}
