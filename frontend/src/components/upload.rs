use super::super::{Model, Msg};
use super::utils::debounce;
use gloo_file::File as GlooFile;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::camera;
use crate::render;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_type_selector(model, ctx) }
            { render_file_intake(model, ctx) }
            { render_action_buttons(model, ctx) }
            { render_camera_panel(model, ctx) }
        </div>
    }
}

fn render_type_selector(model: &Model, ctx: &Context<Model>) -> Html {
    let handle_change = ctx.link().callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectType(select.value())
    });

    html! {
        <div class="type-selector">
            <label for="analysis-type">{"Analysis focus:"}</label>
            <select id="analysis-type" onchange={handle_change}>
                {
                    if model.analysis_types.is_empty() {
                        html! {
                            <option value={model.selected_type.clone()} selected=true>
                                { "Comprehensive" }
                            </option>
                        }
                    } else {
                        model.analysis_types.iter().map(|info| html! {
                            <option
                                value={info.id.clone()}
                                selected={info.id == model.selected_type}
                                title={info.description.clone()}
                            >
                                { &info.name }
                            </option>
                        }).collect::<Html>()
                    }
                }
            </select>
        </div>
    }
}

fn render_file_intake(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let chosen = input.files().and_then(|list| list.item(0)).map(GlooFile::from);
        input.set_value("");

        match chosen {
            Some(file) => Msg::FileChosen(file),
            None => Msg::NoFileSelected,
        }
    });

    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />
            {
                // Preview and upload prompt swap; only one is visible at a time.
                if let Some(preview) = &model.preview {
                    render_preview(model, preview, trigger_file_input)
                } else {
                    render_drop_zone(model, ctx, trigger_file_input)
                }
            }
        </>
    }
}

fn render_preview(model: &Model, preview: &str, trigger_file_input: Callback<()>) -> Html {
    let file_name = model
        .file
        .as_ref()
        .map(|file| file.name())
        .unwrap_or_default();

    html! {
        <div id="preview-container">
            <img
                id="image-preview"
                src={preview.to_owned()}
                alt="Selected outfit"
                style="max-width:100%; max-height: 400px; object-fit: contain;"
            />
            <p class="file-name">{ file_name }</p>
            <button
                class="analyze-btn secondary"
                onclick={debounce(300, move || trigger_file_input.emit(()))}
            >
                <i class="fa-solid fa-rotate"></i> {" Choose a different photo"}
            </button>
        </div>
    }
}

fn render_drop_zone(model: &Model, ctx: &Context<Model>, trigger_file_input: Callback<()>) -> Html {
    let link = ctx.link();

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <div
            id="drop-zone"
            class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
            ondragover={handle_drag_over}
            ondragleave={handle_drag_leave}
            ondrop={handle_drop}
            onclick={debounce(300, move || trigger_file_input.emit(()))}
        >
            <div class="upload-placeholder">
                <i class="fa-solid fa-cloud-arrow-up"></i>
                <p>{"Drag & drop a photo here, or click to browse"}</p>
                <p class="file-types">{"Supported formats: JPEG, PNG, GIF, BMP, WebP (up to 10 MB)"}</p>
            </div>
        </div>
    }
}

fn render_action_buttons(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="button-container">
            <button
                class="analyze-btn"
                disabled={model.loading || model.file.is_none()}
                onclick={link.callback(|_| Msg::Analyze)}
            >
                { render_analyze_button_content(model) }
            </button>
            <button
                class="analyze-btn"
                style="background-color: var(--primary-color);"
                disabled={model.loading}
                title="Run a backend round-trip without an image"
                onclick={link.callback(|_| Msg::SelfTest)}
            >
                <i class="fa-solid fa-stethoscope"></i>{" Self-Test"}
            </button>
            <button
                class="analyze-btn"
                style="background-color: var(--danger-color);"
                onclick={link.callback(|_| Msg::Clear)}
            >
                <i class="fa-solid fa-trash"></i>{" Clear"}
            </button>
        </div>
    }
}

fn render_analyze_button_content(model: &Model) -> Html {
    if model.loading {
        return html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> };
    }

    let filename = model
        .file
        .as_ref()
        .map(|file| file.name())
        .unwrap_or_else(|| "Photo".to_string());
    let display_name = if filename.len() > 20 {
        format!("{}...", &filename[..17])
    } else {
        filename
    };

    html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Analyze \"{}\"", display_name) }</> }
}

fn render_camera_panel(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let camera_active = !model.camera.is_idle();

    html! {
        <div class="camera-panel">
            <div class="button-container">
                {
                    if model.camera.is_idle() {
                        html! {
                            <button class="analyze-btn" onclick={link.callback(|_| Msg::StartCamera)}>
                                <i class="fa-solid fa-video"></i>{" Start Camera"}
                            </button>
                        }
                    } else {
                        html! {
                            <button
                                class="analyze-btn"
                                style="background-color: var(--danger-color);"
                                onclick={link.callback(|_| Msg::StopCamera)}
                            >
                                <i class="fa-solid fa-video-slash"></i>{" Stop Camera"}
                            </button>
                        }
                    }
                }
            </div>
            <video
                id={camera::VIDEO_ELEMENT_ID}
                class={classes!("camera-preview", (!camera_active).then_some("hidden"))}
            />
            {
                if model.camera.is_starting() {
                    html! {
                        <p class="camera-status">
                            <i class="fa-solid fa-spinner fa-spin"></i>
                            {" Waiting for camera permission..."}
                        </p>
                    }
                } else {
                    html! {}
                }
            }
            { render_live_panel(model) }
        </div>
    }
}

fn render_live_panel(model: &Model) -> Html {
    if model.camera.is_idle() {
        return html! {};
    }
    let markup = match &model.live {
        Some(envelope) => render::live::render_live(envelope),
        None => r#"<div class="live-analyzing"><i class="fa-solid fa-spinner fa-spin"></i> Waiting for the first look...</div>"#.to_owned(),
    };
    html! {
        <div id="live-results" class="live-results">
            { Html::from_html_unchecked(AttrValue::from(markup)) }
        </div>
    }
}
