//! Google Gemini backend implementation
//!
//! HTTP client for the Gemini `generateContent` REST API. The model is chosen
//! per call, so one backend serves the whole candidate model list.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GEMINI_API_KEY`: API key (required)
//! - `GEMINI_BASE_URL`: Endpoint override (default: https://generativelanguage.googleapis.com)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::AIBackend;

/// Public Gemini API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Maximum response body length kept in error messages
const ERROR_BODY_LIMIT: usize = 200;

/// Gemini backend
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend against the public endpoint
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, super::DEFAULT_TIMEOUT)
    }

    /// Create with a custom endpoint (for proxies and mock servers)
    pub fn with_base_url(base_url: &str, api_key: &str, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Returns None when `GEMINI_API_KEY` is unset or blank.
    pub fn from_env(timeout: Duration) -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())?;
        let base_url = std::env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Some(Self::with_base_url(&base_url, &api_key, timeout))
    }
}

/// Request to the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate (empty if there is none)
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() > ERROR_BODY_LIMIT {
        let mut end = ERROR_BODY_LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[async_trait]
impl AIBackend for GeminiBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, model
            ))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Ai(format!(
                "Gemini API error {} for model {}: {}",
                status,
                model,
                truncate_body(&body)
            )));
        }

        let body = response.text().await?;
        let gemini_response: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = gemini_response.text();
        debug!(model = %model, "Gemini response: {}", text);

        Ok(text)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1beta/models", self.base_url))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockGeminiReply, MockGeminiServer};

    #[test]
    fn test_response_text_concatenates_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Food "},{"text":"& Dining"}],"role":"model"}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "Food & Dining");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hi" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= ERROR_BODY_LIMIT + 3);
    }

    #[tokio::test]
    async fn test_generate_against_mock_server() {
        let mut server = MockGeminiServer::start(vec![(
            "gemini-2.0-flash".to_string(),
            MockGeminiReply::Text("Shopping".to_string()),
        )])
        .await;
        let backend = GeminiBackend::with_base_url(&server.url(), "test-key", DEFAULT_TIMEOUT_FOR_TESTS);

        let text = backend.generate("gemini-2.0-flash", "prompt").await.unwrap();
        assert_eq!(text, "Shopping");
        assert!(backend.health_check().await);
        assert_eq!(server.calls(), vec!["gemini-2.0-flash".to_string()]);

        server.stop();
    }

    #[tokio::test]
    async fn test_generate_http_error() {
        let mut server = MockGeminiServer::start(vec![(
            "gemini-2.0-flash".to_string(),
            MockGeminiReply::Status(429),
        )])
        .await;
        let backend = GeminiBackend::with_base_url(&server.url(), "test-key", DEFAULT_TIMEOUT_FOR_TESTS);

        let err = backend.generate("gemini-2.0-flash", "prompt").await.unwrap_err();
        assert!(matches!(err, Error::Ai(_)));
        assert!(err.to_string().contains("429"));

        server.stop();
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let mut server = MockGeminiServer::start(vec![(
            "gemini-2.0-flash".to_string(),
            MockGeminiReply::Malformed,
        )])
        .await;
        let backend = GeminiBackend::with_base_url(&server.url(), "test-key", DEFAULT_TIMEOUT_FOR_TESTS);

        let err = backend.generate("gemini-2.0-flash", "prompt").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));

        server.stop();
    }

    #[tokio::test]
    async fn test_missing_api_key_rejected() {
        let mut server = MockGeminiServer::start(vec![]).await;
        let backend = GeminiBackend::with_base_url(&server.url(), "", DEFAULT_TIMEOUT_FOR_TESTS);

        assert!(backend.generate("gemini-2.0-flash", "prompt").await.is_err());

        server.stop();
    }

    const DEFAULT_TIMEOUT_FOR_TESTS: Duration = Duration::from_secs(5);
}
