//! Transaction categorizer
//!
//! Assigns exactly one taxonomy label to a transaction description. The chain
//! is short and explicit:
//!
//! 1. No AI backend configured: keyword classifier.
//! 2. Try each candidate model once, in order, until one answers with
//!    non-empty text.
//! 3. Normalize that text onto the taxonomy.
//! 4. Anything that fails along the way: keyword classifier.
//!
//! `categorize` never fails and always returns a member of the taxonomy for
//! the requested transaction type.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::ai::{normalize_category, AIBackend, AIClient};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::keywords;
use crate::models::{CategorizeRequest, Categorization};
use crate::prompts::PromptTemplate;
use crate::taxonomy::{validate_taxonomy, TransactionType};

/// Categorizer with optional AI backend and keyword fallback
#[derive(Clone)]
pub struct Categorizer {
    ai: Option<AIClient>,
    models: Vec<String>,
    prompt: Arc<PromptTemplate>,
}

impl Categorizer {
    /// Create a categorizer
    ///
    /// `ai = None` means keywords only; no network call is ever made.
    pub fn new(ai: Option<AIClient>, config: &ModelConfig, prompt: PromptTemplate) -> Self {
        check_taxonomies();
        Self {
            ai,
            models: config.candidates(),
            prompt: Arc::new(prompt),
        }
    }

    /// Keyword-only categorizer with the embedded prompt and default models
    pub fn keywords_only() -> Result<Self> {
        Ok(Self::new(
            None,
            &ModelConfig::embedded()?,
            PromptTemplate::embedded()?,
        ))
    }

    /// Build from environment, config file and prompt override
    pub fn from_env() -> Result<Self> {
        let config = ModelConfig::load()?;
        let prompt = PromptTemplate::load()?;
        let ai = AIClient::from_env(config.timeout);
        match ai {
            Some(ref client) => debug!(
                backend = client.name(),
                host = client.host(),
                models = ?config.candidates(),
                "AI categorization enabled"
            ),
            None => debug!("No AI backend configured, categorizing by keywords"),
        }
        Ok(Self::new(ai, &config, prompt))
    }

    /// Whether an AI backend is configured
    pub fn is_ai_configured(&self) -> bool {
        self.ai.is_some()
    }

    /// The AI backend, if any
    pub fn ai(&self) -> Option<&AIClient> {
        self.ai.as_ref()
    }

    /// Candidate models, in the order they are tried
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// The prompt template in use
    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    /// Category label for a description
    pub async fn categorize(
        &self,
        description: &str,
        transaction_type: TransactionType,
    ) -> &'static str {
        self.categorize_detailed(description, transaction_type)
            .await
            .category
    }

    /// Categorize a request
    pub async fn categorize_request(&self, request: &CategorizeRequest) -> Categorization {
        self.categorize_detailed(&request.description, request.transaction_type)
            .await
    }

    /// Category label plus where it came from
    pub async fn categorize_detailed(
        &self,
        description: &str,
        transaction_type: TransactionType,
    ) -> Categorization {
        let description = description.trim();
        match self.try_ai(description, transaction_type).await {
            Some(result) => result,
            None => Categorization::keywords(keywords::classify(description, transaction_type)),
        }
    }

    /// AI path: None means the caller should fall back to keywords
    async fn try_ai(
        &self,
        description: &str,
        transaction_type: TransactionType,
    ) -> Option<Categorization> {
        let ai = self.ai.as_ref()?;
        if description.is_empty() {
            debug!("Empty description, skipping AI");
            return None;
        }

        let prompt = self.prompt.render_for(description, transaction_type);
        let (model, text) = self.first_response(ai, &prompt).await?;

        match normalize_category(&text, transaction_type.categories()) {
            Some(category) => {
                debug!(model = %model, "AI categorized '{}' as {}", description, category);
                Some(Categorization::ai(category, &model))
            }
            None => {
                debug!(
                    model = %model,
                    "AI response '{}' matches no {} category, using keywords",
                    text, transaction_type
                );
                None
            }
        }
    }

    /// First non-empty (trimmed) response across the candidate models
    ///
    /// Each model is called at most once; later models are only tried after
    /// the earlier one failed or answered with nothing.
    async fn first_response(&self, ai: &AIClient, prompt: &str) -> Option<(String, String)> {
        let mut last_error = None;

        for model in &self.models {
            match ai.generate(model, prompt).await {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        return Some((model.clone(), text.to_string()));
                    }
                    debug!(model = %model, "Empty AI response");
                    last_error = Some(format!("{} returned an empty response", model));
                }
                Err(e) => {
                    debug!(model = %model, "AI call failed: {}", e);
                    last_error = Some(e.to_string());
                }
            }
        }

        if let Some(e) = last_error {
            warn!(backend = ai.name(), "All AI models failed, using keywords: {}", e);
        }
        None
    }
}

fn check_taxonomies() {
    for t in TransactionType::all() {
        if let Err(e) = validate_taxonomy(t.categories()) {
            error!("Invalid {} taxonomy: {}", t, e);
        }
    }
}
