//! Response parsing for AI category answers
//!
//! Models are asked to reply with only a category name, but often wrap it in
//! code fences, quotes, a "Category:" label, or a full sentence. These helpers
//! resolve such text to an exact taxonomy label, or report that it can't be.

use std::sync::OnceLock;

use regex::Regex;

struct NoisePatterns {
    leading_fence: Regex,
    trailing_fence: Regex,
    label_prefix: Regex,
    punctuation: Regex,
}

fn noise_patterns() -> &'static NoisePatterns {
    static PATTERNS: OnceLock<NoisePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| NoisePatterns {
        leading_fence: Regex::new(r"(?i)^```(?:text)?\s*").expect("static regex"),
        trailing_fence: Regex::new(r"```$").expect("static regex"),
        label_prefix: Regex::new(r"(?i)^category\s*[:\-]\s*").expect("static regex"),
        punctuation: Regex::new(r#"["'*.]"#).expect("static regex"),
    })
}

/// Strip formatting noise from a raw AI response
///
/// Removes a leading code fence (optionally tagged `text`), a trailing code
/// fence, a leading `category:` / `category -` label, and every quote,
/// asterisk and period, then trims whitespace.
pub fn clean_response(raw: &str) -> String {
    let p = noise_patterns();
    let text = p.leading_fence.replace(raw, "");
    let text = p.trailing_fence.replace(&text, "");
    let text = p.label_prefix.replace(&text, "");
    let text = p.punctuation.replace_all(&text, "");
    text.trim().to_string()
}

/// Resolve a raw AI response to a member of `taxonomy`
///
/// Resolution order, first hit wins:
/// 1. exact (case-sensitive) match of the untouched text
/// 2. case-insensitive match of the cleaned text
/// 3. first label, in declaration order, contained in the cleaned text
pub fn normalize_category(raw: &str, taxonomy: &[&'static str]) -> Option<&'static str> {
    if let Some(&exact) = taxonomy.iter().find(|&&label| label == raw) {
        return Some(exact);
    }

    let lower = clean_response(raw).to_lowercase();

    taxonomy
        .iter()
        .find(|label| label.to_lowercase() == lower)
        .or_else(|| {
            taxonomy
                .iter()
                .find(|label| lower.contains(&label.to_lowercase()))
        })
        .copied()
}
