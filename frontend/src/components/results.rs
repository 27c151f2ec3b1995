use crate::{Model, Tool};
use shared::{ChattelItem, RoomRecord};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    match model.tool {
        Tool::FloorPlan => render_floor_plan_results(model),
        Tool::Chattels => render_chattel_results(model),
    }
}

fn render_floor_plan_results(model: &Model) -> Html {
    let result = match &model.floor_plan {
        Some(result) => result,
        None => return html! {},
    };

    html! {
        <div class="results-container">
            <h3>{"Analysis Results"}</h3>
            <div class="result-cards">
                { for result.rooms.iter().map(render_room) }
            </div>
            <div class="results-summary">
                <p>{ format!("Total Area: {} sq ft", result.total_area) }</p>
                {
                    match &result.notes {
                        Some(notes) => html! { <p class="notes">{ notes }</p> },
                        None => html! {},
                    }
                }
            </div>
        </div>
    }
}

fn render_room(room: &RoomRecord) -> Html {
    html! {
        <div class="result-card">
            <div class="result-card-header">
                <h4>{ &room.name }</h4>
                <p class="dimensions">{ &room.dimensions }</p>
            </div>
            <p>{ format!("Area: {} sq ft", room.area) }</p>
            {
                if room.features.is_empty() {
                    html! {}
                } else {
                    html! {
                        <div class="feature-tags">
                            { for room.features.iter().map(|feature| html! {
                                <span class="feature-tag">{ feature }</span>
                            })}
                        </div>
                    }
                }
            }
        </div>
    }
}

fn render_chattel_results(model: &Model) -> Html {
    let report = match &model.chattel_report {
        Some(report) => report,
        None => return html! {},
    };

    html! {
        <div class="results-container">
            <h3>{"Analysis Results"}</h3>
            {
                if report.items.is_empty() {
                    html! { <p>{"No items identified."}</p> }
                } else {
                    html! {
                        <div class="result-cards">
                            { for report.items.iter().map(render_chattel_item) }
                        </div>
                    }
                }
            }
            {
                match &report.notes {
                    Some(notes) => html! { <p class="notes">{ notes }</p> },
                    None => html! {},
                }
            }
        </div>
    }
}

fn render_chattel_item(item: &ChattelItem) -> Html {
    let confidence_pct = (item.confidence * 100.0).round();

    html! {
        <div class="result-card">
            <div class="result-card-header">
                <h4>{ &item.name }</h4>
                <p class="cost">{ format!("£{}", item.replacement_cost) }</p>
            </div>
            <div class="confidence-meter">
                <div class="meter">
                    <div class="meter-fill" style={format!("width: {}%", confidence_pct)}></div>
                </div>
                <span class="meter-value">{ format!("{}% confidence", confidence_pct) }</span>
            </div>
        </div>
    }
}
