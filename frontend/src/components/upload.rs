use crate::{Model, Msg, Tool};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section">
            { render_file_input_area(model, ctx) }
            { render_preview(model) }
            { render_analyze_controls(model, ctx) }
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|list| list.item(0));

        input.set_value("");

        match file {
            Some(file) => Msg::FileSelected(file),
            None => Msg::SetError(Some("No file selected.".into())),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_: MouseEvent| {
        if let Some(input) = web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .get_element_by_id("file-input")
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    let format_hint = match model.tool {
        Tool::FloorPlan => "Supported formats: JPG, PNG, WEBP, GIF",
        Tool::Chattels => "Supports all image formats",
    };

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={trigger_file_input}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop an image here, or click to upload"}</p>
                    <p class="file-types">{ format_hint }</p>
                </div>
            </div>
        </>
    }
}

fn render_preview(model: &Model) -> Html {
    match &model.preview_url {
        Some(url) => html! {
            <img id="image-preview"
                src={url.to_string()}
                alt="Preview"
                style="max-width:100%; max-height: 400px; object-fit: contain; margin-bottom: 10px;" />
        },
        None => html! {},
    }
}

fn render_analyze_controls(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let button_label = match (model.analyzing, model.tool) {
        (true, _) => html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> },
        (false, Tool::FloorPlan) => {
            html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Floor Plan"}</> }
        }
        (false, Tool::Chattels) => {
            html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Image"}</> }
        }
    };

    let progress_label = match model.tool {
        Tool::FloorPlan => "Analyzing floor plan...",
        Tool::Chattels => "Analyzing image contents...",
    };

    html! {
        <>
            <button
                class="analyze-btn"
                onclick={link.callback(|_| Msg::Analyze)}
                disabled={model.analyzing || model.file.is_none()}
            >
                { button_label }
            </button>

            {
                if model.analyzing {
                    html! {
                        <div class="progress-container">
                            <div class="progress">
                                <div class="progress-fill" style={format!("width: {}%", model.progress)}></div>
                            </div>
                            <p class="progress-label">{ progress_label }</p>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}
