use crate::{Model, Tool};
use yew::prelude::*;

pub const FLOOR_PLAN_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Client-side type gate, applied before any upload leaves the browser.
/// Floor plans are restricted to the formats the analyser accepts; the
/// chattel tool takes any image.
pub fn validate_file_type(tool: Tool, mime: &str) -> Result<(), String> {
    match tool {
        Tool::FloorPlan => {
            if FLOOR_PLAN_IMAGE_TYPES.contains(&mime) {
                Ok(())
            } else {
                Err(format!(
                    "Please upload a supported image format: {}",
                    FLOOR_PLAN_IMAGE_TYPES.join(", ")
                ))
            }
        }
        Tool::Chattels => {
            if mime.starts_with("image/") {
                Ok(())
            } else {
                Err("Please upload an image file".into())
            }
        }
    }
}

pub fn render_error_message(model: &Model) -> Html {
    if let Some(error_msg) = &model.error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_plan_tool_rejects_unsupported_types() {
        assert!(validate_file_type(Tool::FloorPlan, "image/png").is_ok());
        let message = validate_file_type(Tool::FloorPlan, "image/tiff").unwrap_err();
        assert!(message.contains("image/webp"));
    }

    #[test]
    fn chattel_tool_accepts_any_image() {
        assert!(validate_file_type(Tool::Chattels, "image/tiff").is_ok());
        assert!(validate_file_type(Tool::Chattels, "text/plain").is_err());
    }
}
