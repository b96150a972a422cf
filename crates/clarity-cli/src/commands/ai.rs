//! AI backend command implementations

use anyhow::{Context, Result};
use clarity_core::{
    ai::normalize_category, keywords, AIBackend, AIClient, Categorizer, ModelConfig,
    PromptTemplate, TransactionType,
};

use super::truncate;

/// Descriptions used when no --description is given
const SAMPLES: &[(&str, TransactionType)] = &[
    ("Coffee at Starbucks", TransactionType::Expense),
    ("Uber to airport", TransactionType::Expense),
    ("Monthly Netflix subscription", TransactionType::Expense),
    ("Paycheck deposit", TransactionType::Income),
    ("Dividend from index fund", TransactionType::Income),
];

/// Test the AI connection and run sample categorizations
pub async fn cmd_ai_test(
    description: Option<&str>,
    transaction_type: TransactionType,
) -> Result<()> {
    println!("🔍 Testing AI backend...\n");

    let config = ModelConfig::load().context("Failed to load model config")?;
    let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "gemini".to_string());
    println!("  AI_BACKEND: {}", backend);
    println!("  Models: {}", config.candidates().join(" → "));
    println!("  Timeout: {}s\n", config.timeout.as_secs());

    let Some(client) = AIClient::from_env(config.timeout) else {
        println!("⚠️  No AI backend configured; categorization uses keywords only.");
        println!("\nTo enable AI categorization:");
        println!("  Gemini: export GEMINI_API_KEY=<your key>");
        println!("  Ollama: export AI_BACKEND=ollama OLLAMA_HOST=http://localhost:11434");
        println!("          export CLARITY_MODEL=<model> CLARITY_FALLBACK_MODEL=");
        return Ok(());
    };

    print!("Checking {} at {}... ", client.name(), client.host());
    if client.health_check().await {
        println!("✅ Connected");
    } else {
        println!("❌ Not responding (calls below will likely fall back to keywords)");
    }

    let prompt = PromptTemplate::load()?;
    let categorizer = Categorizer::new(Some(client.clone()), &config, prompt.clone());

    let samples: Vec<(&str, TransactionType)> = match description {
        Some(d) => vec![(d, transaction_type)],
        None => SAMPLES.to_vec(),
    };

    println!("\n📋 Sample categorizations...\n");

    for (description, t) in samples {
        println!("  \"{}\" ({})", description, t);

        let rendered = prompt.render_for(description, t);
        for model in categorizer.models() {
            match client.generate(model, &rendered).await {
                Ok(raw) => {
                    let normalized = normalize_category(raw.trim(), t.categories());
                    println!(
                        "    {}: {:?} → {}",
                        model,
                        truncate(raw.trim(), 60),
                        normalized.unwrap_or("(unresolved)")
                    );
                }
                Err(e) => println!("    {}: ❌ {}", model, truncate(&e.to_string(), 100)),
            }
        }

        let result = categorizer.categorize_detailed(description, t).await;
        println!(
            "    result: {} via {} (keywords alone: {})\n",
            result.category,
            result.source,
            keywords::classify(description, t)
        );
    }

    Ok(())
}
