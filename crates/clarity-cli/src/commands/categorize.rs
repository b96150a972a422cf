//! Categorization command implementations

use anyhow::{bail, Context, Result};
use clarity_core::{keywords, Categorization, CategorySource, Categorizer, TransactionType};

/// Categorize a single description and print the category
pub async fn cmd_categorize(
    description: &str,
    transaction_type: TransactionType,
    keywords_only: bool,
    explain: bool,
) -> Result<()> {
    let description = description.trim();
    if description.is_empty() {
        bail!("Description is required");
    }

    let categorizer = if keywords_only {
        Categorizer::keywords_only()?
    } else {
        Categorizer::from_env().context("Failed to load categorizer configuration")?
    };

    let result = categorizer
        .categorize_detailed(description, transaction_type)
        .await;
    println!(
        "{}",
        format_categorization(&result, description, transaction_type, explain)
    );

    Ok(())
}

/// Render a categorization, optionally with its provenance
pub fn format_categorization(
    result: &Categorization,
    description: &str,
    transaction_type: TransactionType,
    explain: bool,
) -> String {
    if !explain {
        return result.category.to_string();
    }

    let mut out = format!(
        "{}\n  type:   {}\n  source: {}",
        result.category, transaction_type, result.source
    );
    if result.source == CategorySource::Keywords {
        match keywords::matching_rule(description, transaction_type) {
            Some(rule) => out.push_str(&format!("\n  rule:   /{}/", rule.pattern.as_str())),
            None => out.push_str("\n  rule:   none matched (default)"),
        }
    }
    out
}

/// List categories for one or both transaction types
pub fn cmd_categories(transaction_type: Option<TransactionType>) -> Result<()> {
    print!("{}", format_categories(transaction_type));
    Ok(())
}

pub fn format_categories(transaction_type: Option<TransactionType>) -> String {
    let types: Vec<TransactionType> = match transaction_type {
        Some(t) => vec![t],
        None => TransactionType::all().to_vec(),
    };

    let mut out = String::new();
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{} categories:\n", capitalize(t.as_str())));
        for (n, label) in t.categories().iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", n + 1, label));
        }
    }
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
