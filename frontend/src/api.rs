use crate::{Model, Msg, Tool};
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{ChattelReport, FloorPlanResult};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// POSTs the file as the `image` multipart field and routes the decoded
/// response back into the component as a message.
pub fn send_analysis_request(ctx: &Context<Model>, tool: Tool, file: GlooFile) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let form_data = web_sys::FormData::new().unwrap();
            form_data.append_with_blob("image", file.as_ref()).unwrap();

            let request = Request::post(tool.endpoint())
                .body(form_data)
                .expect("Failed to build request.");

            match request.send().await {
                Ok(response) => {
                    if response.ok() {
                        match tool {
                            Tool::FloorPlan => match response.json::<FloorPlanResult>().await {
                                Ok(result) => link.send_message(Msg::FloorPlanReady(result)),
                                Err(e) => link.send_message(Msg::SetError(Some(format!(
                                    "Failed to parse response: {}",
                                    e
                                )))),
                            },
                            Tool::Chattels => match response.json::<ChattelReport>().await {
                                Ok(report) => link.send_message(Msg::ChattelsReady(report)),
                                Err(e) => link.send_message(Msg::SetError(Some(format!(
                                    "Failed to parse response: {}",
                                    e
                                )))),
                            },
                        }
                    } else {
                        let status = response.status();
                        let body = response.text().await.unwrap_or_default();
                        link.send_message(Msg::SetError(Some(server_error_message(status, &body))));
                    }
                }
                Err(e) => link.send_message(Msg::SetError(Some(format!("Network error: {}", e)))),
            }
        }
    });
}

/// Prefers the `error` field of a JSON error body over a bare status line.
fn server_error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["error"].as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("Server error: {}", status))
}
