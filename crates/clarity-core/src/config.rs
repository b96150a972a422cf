//! Model candidates configuration
//!
//! Decides which models the categorizer tries, in which order, and the
//! per-request timeout handed to the HTTP client.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/clarity/config/models.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! `CLARITY_MODEL` and `CLARITY_FALLBACK_MODEL` then override the file values.
//! An empty `CLARITY_FALLBACK_MODEL` disables the secondary model.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/models.toml");

/// Which models to try, and how long to wait on each
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model tried first
    pub primary: String,
    /// Model tried once if the primary fails or answers with nothing
    pub fallback: Option<String>,
    /// Timeout for a single AI call
    pub timeout: Duration,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            primary: "gemini-2.0-flash".to_string(),
            fallback: Some("gemini-1.5-flash".to_string()),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ModelConfig {
    /// Load from the default override location (or embedded defaults), then
    /// apply environment overrides
    pub fn load() -> Result<Self> {
        let path = default_config_path();
        Ok(Self::load_from(path.as_deref())?.with_env_overrides())
    }

    /// Load from a specific override path, falling back to embedded defaults
    /// when the file does not exist
    pub fn load_from(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) if path.exists() => fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?,
            _ => DEFAULT_CONFIG.to_string(),
        };
        parse_config(&content)
    }

    /// Embedded defaults only
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("CLARITY_MODEL").ok(),
            std::env::var("CLARITY_FALLBACK_MODEL").ok(),
        )
    }

    /// Apply explicit primary/fallback overrides
    ///
    /// A blank primary is ignored; a blank fallback disables the fallback.
    pub fn with_overrides(mut self, primary: Option<String>, fallback: Option<String>) -> Self {
        if let Some(primary) = primary.map(|p| p.trim().to_string()) {
            if !primary.is_empty() {
                self.primary = primary;
            }
        }
        if let Some(fallback) = fallback.map(|f| f.trim().to_string()) {
            self.fallback = if fallback.is_empty() {
                None
            } else {
                Some(fallback)
            };
        }
        self
    }

    /// Models to try in order: primary, then fallback unless it repeats the primary
    pub fn candidates(&self) -> Vec<String> {
        let mut models = vec![self.primary.clone()];
        if let Some(ref fallback) = self.fallback {
            if fallback != &self.primary {
                models.push(fallback.clone());
            }
        }
        models
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("clarity").join("config").join("models.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    defaults: Option<RawDefaults>,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    model: Option<String>,
    fallback_model: Option<String>,
    timeout_secs: Option<u64>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<ModelConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = ModelConfig::default();

    if let Some(defaults) = raw.defaults {
        if let Some(model) = defaults.model.filter(|m| !m.trim().is_empty()) {
            config.primary = model;
        }
        if let Some(fallback) = defaults.fallback_model {
            config.fallback = Some(fallback).filter(|f| !f.trim().is_empty());
        }
        if let Some(timeout) = defaults.timeout_secs {
            if timeout == 0 {
                return Err(Error::Config("timeout_secs must be positive".into()));
            }
            config.timeout = Duration::from_secs(timeout);
        }
    }

    Ok(config)
}
