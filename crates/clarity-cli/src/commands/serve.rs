//! Server command implementation

use anyhow::{Context, Result};
use clarity_core::Categorizer;

pub async fn cmd_serve(host: &str, port: u16) -> Result<()> {
    let config = clarity_server::ServerConfig::from_env();
    let categorizer =
        Categorizer::from_env().context("Failed to load categorizer configuration")?;

    println!("🚀 Starting Clarity API server...");
    println!("   Listening: http://{}:{}", host, port);
    if categorizer.is_ai_configured() {
        println!("   AI models: {}", categorizer.models().join(" → "));
    } else {
        println!("   AI: not configured (keyword categorization only)");
    }
    if config.allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", config.allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    clarity_server::serve(categorizer, host, port, config)
        .await
        .with_context(|| format!("Server failed on {}:{}", host, port))?;

    Ok(())
}
