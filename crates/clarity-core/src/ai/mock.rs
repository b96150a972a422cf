//! Mock backend for testing
//!
//! Replies can be scripted per model name, and every call is recorded so
//! tests can assert which models were tried and in what order. Unscripted
//! models answer with a keyword categorization of the description found in
//! the prompt, which keeps `AI_BACKEND=mock` useful for local development.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::keywords;
use crate::taxonomy::TransactionType;

use super::AIBackend;

/// Scripted outcome for one model
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text verbatim
    Text(String),
    /// Fail with this error message
    Fail(String),
}

impl MockReply {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    pub fn fail(message: &str) -> Self {
        Self::Fail(message.to_string())
    }
}

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    replies: Vec<(String, MockReply)>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            replies: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Self::new()
        }
    }

    /// Script the reply for `model`
    pub fn with_reply(mut self, model: &str, reply: MockReply) -> Self {
        self.replies.retain(|(m, _)| m != model);
        self.replies.push((model.to_string(), reply));
        self
    }

    /// Models called so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, model: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(model.to_string());
        }
    }
}

/// Pull a field value out of a rendered categorization prompt
fn prompt_field<'a>(prompt: &'a str, prefix: &str) -> Option<&'a str> {
    let line = prompt.lines().find(|l| l.starts_with(prefix))?;
    Some(line[prefix.len()..].trim().trim_matches('"'))
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        self.record(model);

        if let Some((_, reply)) = self.replies.iter().find(|(m, _)| m == model) {
            return match reply {
                MockReply::Text(text) => Ok(text.clone()),
                MockReply::Fail(message) => Err(Error::Ai(message.clone())),
            };
        }

        let description = prompt_field(prompt, "Transaction description:").unwrap_or_default();
        let transaction_type = prompt_field(prompt, "Transaction type:")
            .map(TransactionType::from_lenient)
            .unwrap_or(TransactionType::Expense);

        Ok(keywords::classify(description, transaction_type).to_string())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
