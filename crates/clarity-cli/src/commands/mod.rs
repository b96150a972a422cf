//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categorize` - Categorize descriptions and list categories
//! - `ai` - AI backend diagnostics
//! - `prompts` - Prompt template inspection
//! - `serve` - Web server command

pub mod ai;
pub mod categorize;
pub mod prompts;
pub mod serve;

// Re-export command functions for main.rs
pub use ai::*;
pub use categorize::*;
pub use prompts::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
