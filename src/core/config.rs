//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::Language;

/// Default Gemini API host
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default clipboard helper script
pub const DEFAULT_HELPER_SCRIPT: &str = "scripts/clipboard-image.sh";

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub target_language: String,
    pub helper_script: PathBuf,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            target_language: Language::default().code,
            helper_script: PathBuf::from(DEFAULT_HELPER_SCRIPT),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    ///
    /// A missing `GEMINI_API_KEY` is not an error here; requests report it as
    /// a missing credential instead.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            warn!("GEMINI_API_KEY is not set");
        }

        Self {
            api_key,
            api_endpoint: std::env::var("GEMINI_API_ENDPOINT").unwrap_or(defaults.api_endpoint),
            model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.model),
            target_language: std::env::var("GTRANSLATOR_TARGET_LANG")
                .unwrap_or(defaults.target_language),
            helper_script: std::env::var("GTRANSLATOR_HELPER_SCRIPT")
                .map(PathBuf::from)
                .unwrap_or(defaults.helper_script),
        }
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_endpoint.trim().is_empty() {
            return Err(config_error("API endpoint is required"));
        }

        if !self.api_endpoint.starts_with("http://") && !self.api_endpoint.starts_with("https://") {
            return Err(config_error(format!(
                "API endpoint must be an http(s) URL: {}",
                self.api_endpoint
            )));
        }

        if self.model.trim().is_empty() {
            return Err(config_error("model is required"));
        }

        if self.target_language.trim().is_empty() {
            return Err(config_error("target language is required"));
        }

        Ok(())
    }

    /// Configured target language
    pub fn language(&self) -> Language {
        Language::resolve(self.target_language.trim())
    }

    /// Full `generateContent` URL for the configured model
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

fn config_error(message: impl Into<String>) -> TranslationError {
    TranslationError::ConfigError {
        message: message.into(),
    }
}
