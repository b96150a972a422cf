//! Clarity Core Library
//!
//! Transaction categorization for the Clarity finance tracker:
//! - Fixed income/expense category taxonomies
//! - Keyword fallback classifier
//! - Pluggable AI backends (Gemini, Ollama, mock)
//! - Normalizer that maps free-form AI answers onto the taxonomy
//! - Categorizer that chains AI models and falls back to keywords
//! - Model candidates config and customizable prompt template

pub mod ai;
pub mod categorizer;
pub mod config;
pub mod error;
pub mod keywords;
pub mod models;
pub mod prompts;
pub mod taxonomy;

/// Test utilities including mock Gemini server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, GeminiBackend, MockBackend, MockReply, OllamaBackend};
pub use categorizer::Categorizer;
pub use config::ModelConfig;
pub use error::{Error, Result};
pub use models::{CategorizeRequest, Categorization, CategorySource};
pub use prompts::{PromptMetadata, PromptTemplate};
pub use taxonomy::{TransactionType, EXPENSE_CATEGORIES, INCOME_CATEGORIES, OTHER};
