//! Category taxonomy and transaction types
//!
//! Each transaction type has a fixed, ordered list of category labels.
//! Declaration order matters: containment matching in the response normalizer
//! scans labels in this order, so the generic "Other" label is always last.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Universal fallback label present in every taxonomy
pub const OTHER: &str = "Other";

/// Expense categories in declaration order
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Housing",
    "Utilities",
    "Entertainment",
    "Shopping",
    "Healthcare",
    "Education",
    "Personal",
    "Travel",
    "Bills & Subscriptions",
    OTHER,
];

/// Income categories in declaration order
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Gift",
    "Business",
    OTHER,
];

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parse leniently: exactly "income" is income, everything else is expense
    pub fn from_lenient(s: &str) -> Self {
        if s == "income" {
            Self::Income
        } else {
            Self::Expense
        }
    }

    /// Category labels valid for this transaction type
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Self::Income => INCOME_CATEGORIES,
            Self::Expense => EXPENSE_CATEGORIES,
        }
    }

    /// Whether `label` is a canonical (case-sensitive) member of this type's taxonomy
    pub fn has_category(&self, label: &str) -> bool {
        self.categories().contains(&label)
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense]
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Invalid transaction type '{}': expected 'income' or 'expense'",
                s
            )),
        }
    }
}

/// Check that a taxonomy is safe for first-match containment resolution.
///
/// Rejects duplicate labels (case-insensitive), a missing or misplaced
/// "Other" label, and any label contained in another label, since the
/// shorter label would shadow or be shadowed by the longer one depending on
/// declaration order.
pub fn validate_taxonomy(labels: &[&str]) -> Result<()> {
    match labels.last() {
        Some(&last) if last == OTHER => {}
        Some(_) if labels.contains(&OTHER) => {
            return Err(Error::InvalidData(format!(
                "'{}' must be declared last",
                OTHER
            )))
        }
        _ => {
            return Err(Error::InvalidData(format!(
                "Taxonomy must include '{}'",
                OTHER
            )))
        }
    }

    let lowered: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
    for (i, a) in lowered.iter().enumerate() {
        if a.trim().is_empty() {
            return Err(Error::InvalidData("Taxonomy labels must not be empty".into()));
        }
        for (j, b) in lowered.iter().enumerate() {
            if i == j {
                continue;
            }
            if a == b {
                return Err(Error::InvalidData(format!(
                    "Duplicate taxonomy label '{}'",
                    labels[i]
                )));
            }
            if b.contains(a.as_str()) {
                return Err(Error::InvalidData(format!(
                    "Taxonomy label '{}' is contained in '{}'",
                    labels[i], labels[j]
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_taxonomies_are_valid() {
        for t in TransactionType::all() {
            validate_taxonomy(t.categories()).unwrap();
        }
    }

    #[test]
    fn test_taxonomy_sizes() {
        assert_eq!(EXPENSE_CATEGORIES.len(), 12);
        assert_eq!(INCOME_CATEGORIES.len(), 6);
        assert_eq!(EXPENSE_CATEGORIES.last(), Some(&OTHER));
        assert_eq!(INCOME_CATEGORIES.last(), Some(&OTHER));
    }

    #[test]
    fn test_validate_rejects_contained_label() {
        let err = validate_taxonomy(&["Travel", "Travel Insurance", "Other"]).unwrap_err();
        assert!(err.to_string().contains("contained"));
    }

    #[test]
    fn test_validate_rejects_misplaced_other() {
        assert!(validate_taxonomy(&["Other", "Salary"]).is_err());
        assert!(validate_taxonomy(&["Salary", "Gift"]).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let err = validate_taxonomy(&["Gift", "gift", "Other"]).unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_transaction_type_parsing() {
        assert_eq!("income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert_eq!(" Expense ".parse::<TransactionType>(), Ok(TransactionType::Expense));
        assert!("transfer".parse::<TransactionType>().is_err());

        assert_eq!(TransactionType::from_lenient("income"), TransactionType::Income);
        assert_eq!(TransactionType::from_lenient("INCOME"), TransactionType::Expense);
        assert_eq!(TransactionType::from_lenient(" income "), TransactionType::Expense);
        assert_eq!(TransactionType::from_lenient("transfer"), TransactionType::Expense);
        assert_eq!(TransactionType::from_lenient(""), TransactionType::Expense);
    }

    #[test]
    fn test_transaction_type_serde() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, "\"income\"");
        let parsed: TransactionType = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(parsed, TransactionType::Expense);
    }

    #[test]
    fn test_has_category_is_case_sensitive() {
        assert!(TransactionType::Expense.has_category("Travel"));
        assert!(!TransactionType::Expense.has_category("travel"));
        assert!(!TransactionType::Income.has_category("Travel"));
    }
}
