//! Clarity CLI - Transaction categorizer
//!
//! Usage:
//!   clarity categorize "Coffee at Starbucks"     Categorize a description
//!   clarity categories --type income             List categories
//!   clarity ai test                              Check the AI backend
//!   clarity serve --port 5000                    Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Categorize {
            description,
            transaction_type,
            keywords_only,
            explain,
        } => commands::cmd_categorize(&description, transaction_type, keywords_only, explain).await,
        Commands::Categories { transaction_type } => commands::cmd_categories(transaction_type),
        Commands::Ai { action } => match action {
            AiAction::Test {
                description,
                transaction_type,
            } => commands::cmd_ai_test(description.as_deref(), transaction_type).await,
        },
        Commands::Prompt { action } => match action {
            None | Some(PromptAction::Show) => commands::cmd_prompt_show(),
            Some(PromptAction::Path) => commands::cmd_prompt_path(),
        },
        Commands::Serve { port, host } => commands::cmd_serve(&host, port).await,
    }
}
