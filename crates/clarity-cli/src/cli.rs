//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use clarity_core::TransactionType;

/// Clarity - Categorize transactions with AI and keyword fallback
#[derive(Parser)]
#[command(name = "clarity")]
#[command(about = "Transaction categorizer for the Clarity finance tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize a transaction description
    Categorize {
        /// Transaction description (e.g. "Coffee at Starbucks")
        description: String,

        /// Transaction type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: TransactionType,

        /// Skip the AI backend and use keyword rules only
        #[arg(long)]
        keywords_only: bool,

        /// Show where the category came from
        #[arg(long)]
        explain: bool,
    },

    /// List categories
    Categories {
        /// Only list categories for this type (income or expense)
        #[arg(short = 't', long = "type")]
        transaction_type: Option<TransactionType>,
    },

    /// Check the AI backend
    Ai {
        #[command(subcommand)]
        action: AiAction,
    },

    /// Inspect the categorization prompt
    Prompt {
        #[command(subcommand)]
        action: Option<PromptAction>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand)]
pub enum AiAction {
    /// Test the AI connection and run sample categorizations
    Test {
        /// Categorize this description instead of the built-in samples
        #[arg(long)]
        description: Option<String>,

        /// Transaction type for --description
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: TransactionType,
    },
}

#[derive(Subcommand)]
pub enum PromptAction {
    /// Show the active prompt (override or default)
    Show,

    /// Show the path where a prompt override should be placed
    Path,
}
