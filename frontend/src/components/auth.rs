use super::super::{Model, Msg};
use yew::prelude::*;

pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-shirt"></i> {" Fashion Analysis Studio"}</h1>
            <p class="subtitle">{"Upload a photo or go live for AI styling feedback"}</p>
            { render_auth_area(model, ctx) }
        </header>
    }
}

fn render_auth_area(model: &Model, ctx: &Context<Model>) -> Html {
    match &model.user {
        Some(user) => {
            html! {
                <div class="auth-area">
                    <div class="user-details">
                        <span class="user-name">{ &user.name }</span>
                        <span class="user-email">{ &user.email }</span>
                    </div>
                    <button
                        class="logout-button"
                        title="Logout"
                        onclick={ctx.link().callback(|_| Msg::Logout)}
                    >
                        <i class="fa-solid fa-sign-out-alt"></i>
                        {" Logout"}
                    </button>
                </div>
            }
        }
        None => html! {},
    }
}

pub fn render_login_prompt() -> Html {
    let handle_login = Callback::from(|_| {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    });

    html! {
        <div class="login-prompt">
            <i class="fa-solid fa-lock"></i>
            <p>{"Sign in to analyze your outfits."}</p>
            <button class="login-button" onclick={handle_login}>
                <i class="fa-solid fa-right-to-bracket"></i>
                {" Log in"}
            </button>
        </div>
    }
}
