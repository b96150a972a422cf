//! Prompt-related command implementations

use anyhow::Result;
use clarity_core::prompts::{default_prompts_dir, override_file, PromptTemplate};

/// Show the active categorization prompt
pub fn cmd_prompt_show() -> Result<()> {
    let prompt = PromptTemplate::load()?;

    println!("Prompt: {}", prompt.metadata.id);
    println!("Version: {}", prompt.metadata.version);
    println!("Task Type: {}", prompt.metadata.task_type);
    println!(
        "Source: {}",
        if prompt.is_override() {
            "Override"
        } else {
            "Default"
        }
    );

    if let Some(ref path) = prompt.override_path {
        println!("Override Path: {}", path.display());
    }

    println!();
    println!("--- Content ---");
    println!("{}", prompt.content);

    Ok(())
}

/// Show the path where a prompt override should be placed
pub fn cmd_prompt_path() -> Result<()> {
    match default_prompts_dir() {
        Some(dir) => {
            println!("{}", override_file(&dir).display());

            if !dir.exists() {
                eprintln!();
                eprintln!("Note: This directory does not exist yet.");
                eprintln!("Create it and copy the default prompt there to customize it.");
            }
        }
        None => {
            eprintln!("Could not determine prompts directory.");
            eprintln!("The data directory is not available on this system.");
        }
    }

    Ok(())
}
