//! Categorization prompt template
//!
//! The prompt is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/clarity/prompts/overrides/)
//! 2. Fall back to the embedded default (compiled into binary)
//!
//! An override that cannot be read or parsed is skipped with a warning, so a
//! broken local edit never takes categorization down.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::taxonomy::TransactionType;

/// Identifier (and file stem) of the categorization prompt
pub const PROMPT_ID: &str = "categorize_transaction";

/// Embedded default prompt (compiled into binary)
const DEFAULT_PROMPT: &str = include_str!("../../../prompts/categorize_transaction.md");

/// Prompt frontmatter metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    /// Unique identifier
    pub id: String,
    /// Version number for tracking changes
    pub version: u32,
    /// Task type hint (e.g. fast_classification)
    pub task_type: String,
}

/// A loaded prompt with metadata and body
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Metadata from frontmatter
    pub metadata: PromptMetadata,
    /// Template body with `{{var}}` placeholders
    pub content: String,
    /// Path to the override file this came from, if any
    pub override_path: Option<PathBuf>,
}

impl PromptTemplate {
    /// The embedded default prompt
    pub fn embedded() -> Result<Self> {
        let (metadata, content) = parse_prompt(DEFAULT_PROMPT)?;
        Ok(Self {
            metadata,
            content,
            override_path: None,
        })
    }

    /// Load from the default override directory, or the embedded default
    pub fn load() -> Result<Self> {
        Self::load_from(default_prompts_dir().as_deref())
    }

    /// Load from a specific override directory, or the embedded default
    pub fn load_from(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_dir.map(override_file) {
            if path.exists() {
                match Self::read_override(&path) {
                    Ok(template) => {
                        debug!(path = %path.display(), "Using prompt override");
                        return Ok(template);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), "Ignoring prompt override: {}", e);
                    }
                }
            }
        }
        Self::embedded()
    }

    fn read_override(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Prompt(format!("Failed to read prompt override: {}", e)))?;
        let (metadata, content) = parse_prompt(&content)?;
        if metadata.id != PROMPT_ID {
            return Err(Error::Prompt(format!(
                "Override has id '{}', expected '{}'",
                metadata.id, PROMPT_ID
            )));
        }
        Ok(Self {
            metadata,
            content,
            override_path: Some(path.to_path_buf()),
        })
    }

    /// Whether this came from an override file
    pub fn is_override(&self) -> bool {
        self.override_path.is_some()
    }

    /// Render the template with `{{var}}` placeholders replaced
    ///
    /// Substitution is single-pass: placeholder-like text inside a value is
    /// left alone. Unknown placeholders are kept verbatim.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> String {
        placeholder_regex()
            .replace_all(&self.content, |caps: &Captures| {
                let key = &caps[1];
                vars.get(key)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Render the categorization prompt for one transaction
    pub fn render_for(&self, description: &str, transaction_type: TransactionType) -> String {
        let categories = transaction_type.categories().join(", ");
        let mut vars = HashMap::new();
        vars.insert("categories", categories.as_str());
        vars.insert("description", description);
        vars.insert("transaction_type", transaction_type.as_str());
        self.render(&vars)
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("static regex"))
}

/// Default prompts override directory
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("clarity").join("prompts").join("overrides"))
}

/// Override file location inside an override directory
pub fn override_file(dir: &Path) -> PathBuf {
    dir.join(format!("{}.md", PROMPT_ID))
}

/// Parse a prompt file into metadata and body
fn parse_prompt(content: &str) -> Result<(PromptMetadata, String)> {
    let content = content.trim();

    let rest = content
        .strip_prefix("---")
        .ok_or_else(|| Error::Prompt("Prompt must start with YAML frontmatter (---)".into()))?;

    let end = rest.find("\n---").ok_or_else(|| {
        Error::Prompt("Prompt frontmatter not closed (missing second ---)".into())
    })?;

    let frontmatter = rest[..end].trim();
    let body = rest[end + 4..].trim();

    let metadata: PromptMetadata = serde_yaml::from_str(frontmatter)
        .map_err(|e| Error::Prompt(format!("Invalid prompt frontmatter: {}", e)))?;

    if body.is_empty() {
        return Err(Error::Prompt("Prompt body is empty".into()));
    }

    Ok((metadata, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_prompt() {
        let content = r#"---
id: test_prompt
version: 2
task_type: fast_classification
---

Categorize {{description}}.
"#;

        let (metadata, body) = parse_prompt(content).unwrap();
        assert_eq!(metadata.id, "test_prompt");
        assert_eq!(metadata.version, 2);
        assert_eq!(metadata.task_type, "fast_classification");
        assert_eq!(body, "Categorize {{description}}.");
    }

    #[test]
    fn test_parse_prompt_errors() {
        assert!(parse_prompt("no frontmatter").is_err());
        assert!(parse_prompt("---\nid: x\nversion: 1\n").is_err());
        assert!(parse_prompt("---\nid: [\n---\nbody").is_err());
        assert!(parse_prompt("---\nid: x\nversion: 1\ntask_type: t\n---\n").is_err());
    }

    #[test]
    fn test_embedded_prompt_parses() {
        let template = PromptTemplate::embedded().unwrap();
        assert_eq!(template.metadata.id, PROMPT_ID);
        assert!(!template.is_override());
        assert!(template.content.contains("{{categories}}"));
    }

    #[test]
    fn test_render_for_expense() {
        let template = PromptTemplate::embedded().unwrap();
        let prompt = template.render_for("Starbucks coffee", TransactionType::Expense);

        assert!(prompt.starts_with("You are a financial transaction categorizer."));
        assert!(prompt.contains(
            "exactly one of these categories: Food & Dining, Transportation, Housing, \
             Utilities, Entertainment, Shopping, Healthcare, Education, Personal, Travel, \
             Bills & Subscriptions, Other."
        ));
        assert!(prompt.contains("Transaction description: \"Starbucks coffee\"\n"));
        assert!(prompt.contains("Transaction type: expense\n"));
        assert!(prompt.ends_with("If unsure, respond with \"Other\"."));
    }

    #[test]
    fn test_render_for_income() {
        let template = PromptTemplate::embedded().unwrap();
        let prompt = template.render_for("ACME payroll", TransactionType::Income);
        assert!(prompt.contains(
            "categories: Salary, Freelance, Investment, Gift, Business, Other."
        ));
        assert!(prompt.contains("Transaction type: income"));
    }

    #[test]
    fn test_render_is_single_pass() {
        let template = PromptTemplate::embedded().unwrap();
        let prompt = template.render_for("{{categories}}", TransactionType::Expense);
        assert!(prompt.contains("Transaction description: \"{{categories}}\""));
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let template = PromptTemplate {
            metadata: PromptMetadata {
                id: "t".into(),
                version: 1,
                task_type: "t".into(),
            },
            content: "{{ known }} and {{unknown}}".into(),
            override_path: None,
        };
        let mut vars = HashMap::new();
        vars.insert("known", "yes");
        assert_eq!(template.render(&vars), "yes and {{unknown}}");
    }

    #[test]
    fn test_override_takes_precedence() {
        let dir = TempDir::new().unwrap();
        fs::write(
            override_file(dir.path()),
            "---\nid: categorize_transaction\nversion: 7\ntask_type: fast_classification\n---\nPick one of {{categories}} for {{description}}",
        )
        .unwrap();

        let template = PromptTemplate::load_from(Some(dir.path())).unwrap();
        assert!(template.is_override());
        assert_eq!(template.metadata.version, 7);
        assert_eq!(
            template.render_for("Netflix", TransactionType::Income),
            "Pick one of Salary, Freelance, Investment, Gift, Business, Other for Netflix"
        );
    }

    #[test]
    fn test_broken_override_falls_back_to_embedded() {
        let dir = TempDir::new().unwrap();
        fs::write(override_file(dir.path()), "not a prompt").unwrap();

        let template = PromptTemplate::load_from(Some(dir.path())).unwrap();
        assert!(!template.is_override());
        assert_eq!(template.metadata.id, PROMPT_ID);
    }

    #[test]
    fn test_override_with_wrong_id_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(
            override_file(dir.path()),
            "---\nid: something_else\nversion: 1\ntask_type: t\n---\nbody",
        )
        .unwrap();

        let template = PromptTemplate::load_from(Some(dir.path())).unwrap();
        assert!(!template.is_override());
    }

    #[test]
    fn test_missing_override_dir() {
        let template = PromptTemplate::load_from(None).unwrap();
        assert!(!template.is_override());
    }
}
