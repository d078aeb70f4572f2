//! Core data models for translation and extraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in target languages offered by the language picker
pub const LANGUAGES: &[(&str, &str)] = &[
    ("it", "Italiano"),
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("de", "Deutsch"),
    ("pt", "Português"),
    ("zh", "中文 (Chinese)"),
    ("ja", "日本語 (Japanese)"),
    ("ru", "Русский (Russian)"),
    ("ar", "العربية (Arabic)"),
];

/// Target language descriptor: display name plus language code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

impl Language {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Look up one of the built-in languages by code
    pub fn from_code(code: &str) -> Option<Self> {
        LANGUAGES
            .iter()
            .find(|(c, _)| c.eq_ignore_ascii_case(code))
            .map(|(c, n)| Self::new(*c, *n))
    }

    /// Resolve a code, treating unknown codes as custom languages named after the code
    pub fn resolve(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| Self::new(code, code))
    }

    /// All built-in languages, in picker order
    pub fn all() -> Vec<Self> {
        LANGUAGES.iter().map(|(c, n)| Self::new(*c, *n)).collect()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new("it", "Italiano")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Translation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub source_text: String,
    pub context: Option<String>,
    pub target_language: Language,
    pub api_key: String,
}

impl TranslationRequest {
    pub fn new(source_text: impl Into<String>, target_language: Language) -> Self {
        Self {
            source_text: source_text.into(),
            context: None,
            target_language,
            api_key: String::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Context trimmed, or `None` when blank
    pub fn effective_context(&self) -> Option<&str> {
        self.context
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Image text extraction request
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub image_bytes: Vec<u8>,
    pub mime_type: String,
    pub api_key: String,
}

impl ExtractionRequest {
    pub fn new(image_bytes: Vec<u8>) -> Self {
        Self {
            image_bytes,
            mime_type: "image/png".to_string(),
            api_key: String::new(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

/// Successful translation or extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: String,
    pub model: String,
}
