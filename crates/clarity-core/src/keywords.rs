//! Deterministic keyword categorizer
//!
//! Maps a transaction description to a category with an ordered list of
//! keyword rules per transaction type. The first matching rule wins, so rule
//! order is a curated priority list: "flight" resolves to Transportation
//! because that rule is checked before Travel. No network, no state.

use std::sync::OnceLock;

use regex::Regex;

use crate::taxonomy::{TransactionType, OTHER};

/// A single keyword rule: if the pattern matches, assign the category
#[derive(Debug)]
pub struct KeywordRule {
    pub category: &'static str,
    pub pattern: Regex,
}

impl KeywordRule {
    fn new(category: &'static str, keywords: &str) -> Self {
        Self {
            category,
            // Keyword alternations are static literals
            pattern: Regex::new(keywords).expect("keyword rule pattern must compile"),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

const INCOME_RULES: &[(&str, &str)] = &[
    ("Salary", "salary|payroll|paycheck|wage|stipend"),
    ("Freelance", "freelance|client|contract|gig|invoice"),
    (
        "Investment",
        "dividend|interest|stock|investment|mutual fund|crypto",
    ),
    ("Gift", "gift|bonus|reward|cashback|refund"),
    ("Business", "sale|revenue|business|shop|store|profit"),
];

const EXPENSE_RULES: &[(&str, &str)] = &[
    (
        "Food & Dining",
        "coffee|restaurant|food|lunch|dinner|grocer|snack|pizza|burger|cafe|starbucks",
    ),
    (
        "Transportation",
        "uber|lyft|taxi|bus|train|metro|fuel|gas|petrol|parking|toll|flight|airport",
    ),
    ("Housing", "rent|mortgage|apartment|house|maintenance"),
    (
        "Utilities",
        "electric|water|internet|wifi|electricity|utility|bill",
    ),
    (
        "Entertainment",
        "movie|netflix|spotify|game|concert|party|cinema",
    ),
    (
        "Shopping",
        "amazon|mall|shopping|clothes|shoe|gadget|electronics",
    ),
    (
        "Healthcare",
        "doctor|hospital|pharmacy|medicine|clinic|health|dental|insurance",
    ),
    ("Education", "course|tuition|school|college|book|udemy|exam"),
    ("Travel", "trip|hotel|vacation|travel|airbnb|tour"),
    (
        "Bills & Subscriptions",
        "subscription|membership|saas|adobe|icloud|youtube|prime",
    ),
    ("Personal", "salon|barber|gym|personal|self-care|cosmetic"),
];

fn compile(table: &[(&'static str, &str)]) -> Vec<KeywordRule> {
    table
        .iter()
        .map(|&(category, keywords)| KeywordRule::new(category, keywords))
        .collect()
}

/// Ordered rules for a transaction type (compiled once per process)
pub fn rules(transaction_type: TransactionType) -> &'static [KeywordRule] {
    static INCOME: OnceLock<Vec<KeywordRule>> = OnceLock::new();
    static EXPENSE: OnceLock<Vec<KeywordRule>> = OnceLock::new();

    match transaction_type {
        TransactionType::Income => INCOME.get_or_init(|| compile(INCOME_RULES)),
        TransactionType::Expense => EXPENSE.get_or_init(|| compile(EXPENSE_RULES)),
    }
}

/// First rule matching the description, if any
pub fn matching_rule(
    description: &str,
    transaction_type: TransactionType,
) -> Option<&'static KeywordRule> {
    let text = description.to_lowercase();
    rules(transaction_type).iter().find(|rule| rule.is_match(&text))
}

/// Categorize a description by keywords. Never fails; returns "Other" when
/// no rule matches.
pub fn classify(description: &str, transaction_type: TransactionType) -> &'static str {
    matching_rule(description, transaction_type)
        .map(|rule| rule.category)
        .unwrap_or(OTHER)
}
