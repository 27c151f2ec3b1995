use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Api(String),
    #[error("Empty response from Claude API")]
    EmptyResponse,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock<'a> {
    Text { text: &'a str },
    Image { source: ImageSource<'a> },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: String,
}

impl MessagesResponse {
    /// Text of the first content block, matching how the analysis prompts
    /// are answered. A leading non-text block counts as no text at all.
    fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .next()
            .filter(|block| block.block_type == "text" && !block.text.is_empty())
            .map(|block| block.text)
    }
}

/// Client for the multimodal analysis API (Anthropic Messages). Constructed
/// per request, only once a key is known to be configured.
pub struct VisionClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl VisionClient {
    pub fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, VisionError> {
        let endpoint = Url::parse(base_url)?.join("/v1/messages")?;

        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            api_key: api_key.to_string(),
            model: model.to_string(),
            endpoint,
        })
    }

    /// Sends one image plus an instruction prompt and returns the model's
    /// answer text.
    pub async fn analyze_image(
        &self,
        prompt: &str,
        media_type: &str,
        base64_data: &str,
    ) -> Result<String, VisionError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Text { text: prompt },
                    ContentBlock::Image {
                        source: ImageSource {
                            source_type: "base64",
                            media_type,
                            data: base64_data,
                        },
                    },
                ],
            }],
        };

        log::debug!("Requesting analysis from model {}", self.model);
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Api(api_error_message(status, &body)));
        }

        let message: MessagesResponse = response.json().await?;
        message.first_text().ok_or(VisionError::EmptyResponse)
    }
}

/// Pulls `error.message` out of an API error body, falling back to the
/// status code when the body has some other shape.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("Claude API request failed with status {}", status))
}
