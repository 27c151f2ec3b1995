use crate::{Model, Msg, Tool};
use yew::prelude::*;

pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let tab = |tool: Tool| {
        let is_active = model.tool == tool;
        html! {
            <button
                class={classes!("tool-tab", is_active.then_some("active"))}
                onclick={link.callback(move |_| Msg::SwitchTool(tool))}
            >
                { tool.label() }
            </button>
        }
    };

    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-house"></i> {" Property Survey Analyser"}</h1>
            <p class="subtitle">{"Upload a floor plan or a room photo for AI analysis"}</p>
            <nav class="tool-tabs">
                { tab(Tool::FloorPlan) }
                { tab(Tool::Chattels) }
            </nav>
        </header>
    }
}
