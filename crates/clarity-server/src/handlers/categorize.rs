//! Categorization and taxonomy handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{AppError, AppState};
use clarity_core::TransactionType;

/// Request body for categorization
///
/// Fields are loosely typed: a non-string description counts as missing and
/// any `type` other than the string "income" means expense.
#[derive(Debug, Deserialize)]
pub struct CategorizeBody {
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default, rename = "type")]
    pub transaction_type: Option<Value>,
}

impl CategorizeBody {
    fn description(&self) -> &str {
        match &self.description {
            Some(Value::String(s)) => s.trim(),
            _ => "",
        }
    }

    fn transaction_type(&self) -> TransactionType {
        match &self.transaction_type {
            Some(Value::String(s)) => TransactionType::from_lenient(s),
            _ => TransactionType::Expense,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategorizeResponse {
    pub category: &'static str,
    /// "ai" or "keywords"
    pub source: &'static str,
    /// Model that answered, for AI results
    pub model: Option<String>,
}

/// POST /api/transactions/categorize - Suggest a category for a description
pub async fn categorize_transaction(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CategorizeBody>,
) -> Result<Json<CategorizeResponse>, AppError> {
    let description = body.description();
    if description.is_empty() {
        return Err(AppError::bad_request("Description is required"));
    }
    let transaction_type = body.transaction_type();

    let result = state
        .categorizer
        .categorize_detailed(description, transaction_type)
        .await;
    debug!(
        "Categorized '{}' ({}) as {} via {}",
        description, transaction_type, result.category, result.source
    );

    Ok(Json(CategorizeResponse {
        category: result.category,
        source: result.source.as_str(),
        model: result.source.model().map(str::to_string),
    }))
}

/// Query parameters for listing categories
#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
}

/// GET /api/categories - List categories (one type, or both)
pub async fn list_categories(
    Query(params): Query<CategoriesQuery>,
) -> Result<Json<Value>, AppError> {
    match params.transaction_type.as_deref() {
        Some(raw) => {
            let transaction_type: TransactionType =
                raw.parse().map_err(|e: String| AppError::bad_request(&e))?;
            Ok(Json(json!({
                "type": transaction_type,
                "categories": transaction_type.categories(),
            })))
        }
        None => Ok(Json(json!({
            "income": TransactionType::Income.categories(),
            "expense": TransactionType::Expense.categories(),
        }))),
    }
}
