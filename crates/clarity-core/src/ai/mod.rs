//! Pluggable AI backend abstraction
//!
//! This module provides a backend-agnostic text generation interface used by
//! the categorizer. A backend is a black box: given a model name and a prompt
//! it returns text or fails. Whatever it returns is untrusted and goes through
//! [`parsing::normalize_category`] before use.
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for all AI backends
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `OllamaBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! // Create from environment (None when no credential is configured)
//! let ai = AIClient::from_env(Duration::from_secs(30));
//!
//! if let Some(ref client) = ai {
//!     let text = client.generate("gemini-2.0-flash", &prompt).await?;
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (gemini, ollama, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for gemini backend)
//! - `GEMINI_BASE_URL`: Override the Gemini endpoint (default: Google's public API)
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)

mod gemini;
mod mock;
mod ollama;
pub mod parsing;

pub use gemini::GeminiBackend;
pub use mock::{MockBackend, MockReply};
pub use ollama::OllamaBackend;
pub use parsing::{clean_response, normalize_category};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Default per-request timeout for AI calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Generate a completion for `prompt` with the named model
    ///
    /// May return an empty string; callers decide what that means.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Short backend name (for logging)
    fn name(&self) -> &'static str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// Google Gemini (generateContent REST API)
    Gemini(GeminiBackend),
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `gemini` (default): Uses GEMINI_API_KEY and GEMINI_BASE_URL
    /// - `ollama`: Uses OLLAMA_HOST
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required credential or host is not set. That is
    /// not an error: categorization then runs on keywords alone.
    pub fn from_env(timeout: Duration) -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.trim().to_lowercase().as_str() {
            "gemini" | "" => GeminiBackend::from_env(timeout).map(AIClient::Gemini),
            "ollama" => OllamaBackend::from_env(timeout).map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to gemini");
                GeminiBackend::from_env(timeout).map(AIClient::Gemini)
            }
        }
    }

    /// Create a Gemini backend directly
    pub fn gemini(api_key: &str) -> Self {
        AIClient::Gemini(GeminiBackend::new(api_key))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        match self {
            AIClient::Gemini(b) => b.generate(model, prompt).await,
            AIClient::Ollama(b) => b.generate(model, prompt).await,
            AIClient::Mock(b) => b.generate(model, prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Gemini(b) => b.health_check().await,
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AIClient::Gemini(b) => b.name(),
            AIClient::Ollama(b) => b.name(),
            AIClient::Mock(b) => b.name(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Gemini(b) => b.host(),
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
