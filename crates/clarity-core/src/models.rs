//! Domain models for Clarity

use serde::{Deserialize, Serialize};

use crate::taxonomy::TransactionType;

/// A transaction to categorize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizeRequest {
    pub description: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl CategorizeRequest {
    pub fn new(description: impl Into<String>, transaction_type: TransactionType) -> Self {
        Self {
            description: description.into(),
            transaction_type,
        }
    }
}

/// Where a category assignment came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CategorySource {
    /// Resolved from an AI response produced by `model`
    Ai { model: String },
    /// Keyword fallback classifier
    Keywords,
}

impl CategorySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai { .. } => "ai",
            Self::Keywords => "keywords",
        }
    }

    /// Model that produced the answer, for AI results
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Ai { model } => Some(model),
            Self::Keywords => None,
        }
    }
}

impl std::fmt::Display for CategorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ai { model } => write!(f, "ai ({})", model),
            Self::Keywords => write!(f, "keywords"),
        }
    }
}

/// A category assignment
///
/// `category` is always a canonical label of the request's taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Categorization {
    pub category: &'static str,
    #[serde(flatten)]
    pub source: CategorySource,
}

impl Categorization {
    pub fn ai(category: &'static str, model: &str) -> Self {
        Self {
            category,
            source: CategorySource::Ai {
                model: model.to_string(),
            },
        }
    }

    pub fn keywords(category: &'static str) -> Self {
        Self {
            category,
            source: CategorySource::Keywords,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.source, CategorySource::Ai { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialize() {
        let req: CategorizeRequest =
            serde_json::from_str(r#"{"description":"Uber ride","type":"expense"}"#).unwrap();
        assert_eq!(
            req,
            CategorizeRequest::new("Uber ride", TransactionType::Expense)
        );
    }

    #[test]
    fn test_categorization_serialize() {
        let ai = serde_json::to_value(Categorization::ai("Travel", "gemini-2.0-flash")).unwrap();
        assert_eq!(ai["category"], "Travel");
        assert_eq!(ai["source"], "ai");
        assert_eq!(ai["model"], "gemini-2.0-flash");

        let kw = serde_json::to_value(Categorization::keywords("Other")).unwrap();
        assert_eq!(kw["source"], "keywords");
        assert!(kw.get("model").is_none());
    }

    #[test]
    fn test_source_helpers() {
        let source = CategorySource::Ai {
            model: "m".to_string(),
        };
        assert_eq!(source.as_str(), "ai");
        assert_eq!(source.model(), Some("m"));
        assert_eq!(source.to_string(), "ai (m)");
        assert_eq!(CategorySource::Keywords.model(), None);
        assert!(!Categorization::keywords("Other").is_ai());
    }
}
