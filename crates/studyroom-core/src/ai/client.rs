//! Gemini `generateContent` client.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Request tuning shared by every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiOptions {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub timeout_secs: u64,
}

impl Default for GeminiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            top_p: 0.8,
            timeout_secs: 60,
        }
    }
}

/// Anything that turns a prompt into generated text.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    options: GeminiOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.trim().is_empty())
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, options: GeminiOptions) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            options,
        })
    }

    fn endpoint(&self) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            self.options.base_url.trim_end_matches('/'),
            self.options.model
        ))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl TextGenerator for GeminiClient {
    /// One POST, no retry.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        if self.api_key.is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.options.temperature,
                "topP": self.options.top_p,
            }
        });

        tracing::debug!(model = %self.options.model, prompt_len = prompt.len(), "generateContent");
        let resp = self.http.post(self.endpoint()?).json(&body).send().await?;
        let status = resp.status();
        let raw = resp.text().await?;

        let parsed = serde_json::from_str::<GenerateResponse>(&raw);
        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or(raw);
            tracing::warn!(status = status.as_u16(), %message, "generateContent failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = parsed
            .map_err(|e| ApiError::EmptyResponse(Some(format!("unreadable body: {e}"))))?;
        let error_message = parsed.error.as_ref().and_then(|e| e.message.clone());
        parsed
            .into_text()
            .ok_or(ApiError::EmptyResponse(error_message))
    }
}
