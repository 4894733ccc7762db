use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use super::{ExplainError, TextGenerator};

pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const API_VERSION: &str = "2023-06-01";

#[derive(Clone, Debug)]
pub struct ExplainConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: 180,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize, Debug)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize, Debug)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct ContentBlock {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

/// Blocking client for a messages-style text-generation endpoint.
pub struct MessagesClient {
    config: ExplainConfig,
    http: reqwest::blocking::Client,
}

impl MessagesClient {
    pub fn new(config: ExplainConfig) -> Result<Self, ExplainError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }
}

impl TextGenerator for MessagesClient {
    fn generate(&self, system_prompt: &str, text: &str) -> Result<String, ExplainError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ExplainError::NotConfigured)?;

        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system: system_prompt,
            messages: [Message {
                role: "user",
                content: text,
            }],
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        let result = parse_messages_response(status.as_u16(), status.is_success(), &body);
        if let Err(error) = &result {
            warn!("explanation request failed: {error}");
        }
        result
    }
}

fn parse_messages_response(status: u16, success: bool, body: &str) -> Result<String, ExplainError> {
    let parsed = serde_json::from_str::<MessagesResponse>(body).unwrap_or_default();

    if !success {
        let message = parsed
            .error
            .and_then(|error| error.message)
            .unwrap_or_else(|| "Failed to generate explanation".to_owned());
        return Err(ExplainError::Service { status, message });
    }

    parsed
        .content
        .into_iter()
        .find(|block| block.kind.as_deref() == Some("text"))
        .and_then(|block| block.text)
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or(ExplainError::EmptyResponse)
}
