use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::{StreamExt, TryStreamExt};
use log::{debug, error};
use serde::Serialize;
use shared::{ChattelReport, FloorPlanResult};

use crate::analysis::extract::{extract_json_span, parse_chattel_items};
use crate::analysis::prompts::{CHATTEL_PROMPT, FLOOR_PLAN_PROMPT};
use crate::analysis::vision::VisionClient;
use crate::config::{AppConfig, FLOOR_PLAN_TIMEOUT};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseFailureResponse {
    error: String,
    raw_response_preview: String,
}

pub const SUPPORTED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

const STUB_NOTE: &str =
    "AI analyser not configured (missing ANTHROPIC_API_KEY). Placeholder result for testing.";

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    cfg.service(
        web::resource("/api/analyze-floor-plan").route(web::post().to(analyze_floor_plan)),
    )
    .service(web::resource("/api/analyze-chattels").route(web::post().to(analyze_chattels)))
    .service(Files::new("/", frontend_dir).index_file("index.html"));
}

struct UploadedImage {
    data: Vec<u8>,
    content_type: Option<String>,
}

/// Collects the `image` multipart field. Fields with other names are
/// skipped; a payload without the field yields `None`.
async fn read_image_field(
    mut payload: Multipart,
) -> Result<Option<UploadedImage>, actix_web::Error> {
    while let Ok(Some(mut field)) = payload.try_next().await {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(|mime| mime.to_string());
        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            data.extend_from_slice(&chunk?);
        }

        return Ok(Some(UploadedImage { data, content_type }));
    }

    Ok(None)
}

/// First `max_chars` characters, for logs and parse-failure diagnostics.
/// Never splits a multi-byte character and never exposes the full text.
fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Media type declared to the analyser for a chattel upload: the browser
/// value when it is one of the supported formats, `image/jpeg` otherwise.
fn chattel_media_type(declared: Option<&str>) -> &str {
    match declared {
        Some(declared) if SUPPORTED_IMAGE_TYPES.contains(&declared) => declared,
        _ => "image/jpeg",
    }
}

async fn analyze_floor_plan(
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> HttpResponse {
    let image = match read_image_field(payload).await {
        Ok(Some(image)) => image,
        Ok(None) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "No image provided".into(),
            })
        }
        Err(e) => {
            error!("Failed to read multipart upload: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to read uploaded image".into(),
            });
        }
    };

    let media_type = match image.content_type.as_deref() {
        Some(declared) if SUPPORTED_IMAGE_TYPES.contains(&declared) => declared.to_string(),
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: format!(
                    "Invalid file type. Supported formats are: {}",
                    SUPPORTED_IMAGE_TYPES.join(", ")
                ),
            })
        }
    };

    let base64_image = BASE64.encode(&image.data);

    let api_key = match &config.anthropic_api_key {
        Some(key) => key,
        None => {
            return HttpResponse::Ok().json(FloorPlanResult {
                rooms: Vec::new(),
                total_area: 0.0,
                notes: Some(STUB_NOTE.into()),
                error: None,
            })
        }
    };

    let client = match VisionClient::new(
        api_key,
        &config.model,
        &config.base_url,
        Some(FLOOR_PLAN_TIMEOUT),
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to construct analysis client: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            });
        }
    };

    let response_text = match client
        .analyze_image(FLOOR_PLAN_PROMPT, &media_type, &base64_image)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            error!("Claude API error: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            });
        }
    };

    debug!(
        "Claude API response (first 100 chars): {}",
        preview(&response_text, 100)
    );

    // Pass the parsed document through untouched so no fields are lost.
    match serde_json::from_str::<serde_json::Value>(&response_text) {
        Ok(parsed) => HttpResponse::Ok().json(parsed),
        Err(e) => {
            error!("Failed to parse Claude API response: {}", e);
            HttpResponse::InternalServerError().json(ParseFailureResponse {
                error: "Failed to parse Claude API response".into(),
                raw_response_preview: preview(&response_text, 100).into(),
            })
        }
    }
}

async fn analyze_chattels(config: web::Data<AppConfig>, payload: Multipart) -> HttpResponse {
    let image = match read_image_field(payload).await {
        Ok(Some(image)) => image,
        Ok(None) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "No image provided".into(),
            })
        }
        Err(e) => {
            error!("Failed to read multipart upload: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to read uploaded image".into(),
            });
        }
    };

    // Key check before any encoding work, so stub mode stays free.
    let api_key = match &config.anthropic_api_key {
        Some(key) => key,
        None => {
            return HttpResponse::Ok().json(ChattelReport {
                items: Vec::new(),
                notes: Some(STUB_NOTE.into()),
            })
        }
    };

    let media_type = chattel_media_type(image.content_type.as_deref()).to_string();
    let base64_image = BASE64.encode(&image.data);

    let client = match VisionClient::new(api_key, &config.model, &config.base_url, None) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to construct analysis client: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to analyze image".into(),
            });
        }
    };

    let response_text = match client
        .analyze_image(CHATTEL_PROMPT, &media_type, &base64_image)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            error!("Error analyzing image: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to analyze image".into(),
            });
        }
    };

    let items = match extract_json_span(&response_text) {
        Some(span) => match parse_chattel_items(span) {
            Ok(items) => items,
            Err(e) => {
                error!(
                    "Failed to parse items from model output: {} (preview: {})",
                    e,
                    preview(&response_text, 100)
                );
                return HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Failed to analyze image".into(),
                });
            }
        },
        None => Vec::new(),
    };

    HttpResponse::Ok().json(ChattelReport { items, notes: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn stub_config() -> AppConfig {
        AppConfig {
            anthropic_api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            basic_auth: None,
        }
    }

    /// Hand-built multipart body with a single field.
    fn multipart_body(
        field_name: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> (String, Vec<u8>) {
        let boundary = "----analysis-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"upload.bin\"\r\n",
                field_name
            )
            .as_bytes(),
        );
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        (
            format!("multipart/form-data; boundary={}", boundary),
            body,
        )
    }

    async fn post_upload(uri: &str, field_name: &str, content_type: Option<&str>) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(stub_config()))
                .configure(|cfg| configure_routes(cfg, ".".to_string())),
        )
        .await;

        let (request_content_type, body) =
            multipart_body(field_name, content_type, b"not-really-pixels");
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header((header::CONTENT_TYPE, request_content_type))
            .set_payload(body)
            .to_request();

        let res = test::call_service(&app, req).await;
        let status = res.status();
        let body: Value = test::read_body_json(res).await;
        (status, body)
    }

    #[actix_web::test]
    async fn floor_plan_without_image_field_is_rejected() {
        let (status, body) =
            post_upload("/api/analyze-floor-plan", "attachment", Some("image/png")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image provided");
    }

    #[actix_web::test]
    async fn floor_plan_names_supported_formats_on_bad_type() {
        let (status, body) =
            post_upload("/api/analyze-floor-plan", "image", Some("text/plain")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        for supported in SUPPORTED_IMAGE_TYPES {
            assert!(message.contains(supported), "missing {}", supported);
        }
    }

    #[actix_web::test]
    async fn floor_plan_without_declared_type_is_rejected() {
        let (status, _body) = post_upload("/api/analyze-floor-plan", "image", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn floor_plan_stub_mode_returns_an_empty_plan() {
        let (status, body) =
            post_upload("/api/analyze-floor-plan", "image", Some("image/png")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "rooms": [],
                "totalArea": 0.0,
                "notes": STUB_NOTE,
            })
        );
    }

    #[actix_web::test]
    async fn chattels_without_image_field_is_rejected() {
        let (status, body) =
            post_upload("/api/analyze-chattels", "attachment", Some("image/jpeg")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image provided");
    }

    #[actix_web::test]
    async fn chattels_stub_mode_accepts_any_type() {
        for declared in [Some("application/octet-stream"), None] {
            let (status, body) = post_upload("/api/analyze-chattels", "image", declared).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"items": [], "notes": STUB_NOTE}));
        }
    }

    #[::core::prelude::v1::test]
    fn chattel_media_type_falls_back_to_jpeg() {
        assert_eq!(chattel_media_type(Some("text/plain")), "image/jpeg");
        assert_eq!(chattel_media_type(None), "image/jpeg");
        assert_eq!(chattel_media_type(Some("image/webp")), "image/webp");
    }

    #[::core::prelude::v1::test]
    fn preview_respects_char_boundaries() {
        let text = "é".repeat(150);
        let cut = preview(&text, 100);
        assert_eq!(cut.chars().count(), 100);

        assert_eq!(preview("short", 100), "short");
    }
}
