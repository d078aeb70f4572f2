//! Custom error types for translation and extraction operations

use std::fmt;
use thiserror::Error;

/// Coarse error category, stable across message wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Blank text or empty image
    EmptyInput,
    /// No API key
    MissingCredential,
    /// Non-200 provider status
    ProviderError,
    /// 200 response without candidate text
    MalformedResponse,
    /// Image contained no text
    NoTextFound,
    /// Request failed before a response arrived
    TransportFailure,
    /// Clipboard helper script failed
    HelperFailure,
    /// Invalid or unreadable configuration
    ConfigError,
}

/// Provider call a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Text translation
    Translate,
    /// Image text extraction
    Extract,
}

impl ErrorKind {
    /// Snake case identifier used in HTTP error bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::NoTextFound => "no_text_found",
            ErrorKind::TransportFailure => "transport_failure",
            ErrorKind::HelperFailure => "helper_failure",
            ErrorKind::ConfigError => "config_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Nothing to send
    #[error("{message}")]
    EmptyInput { message: String },

    /// No API key configured
    #[error("API key not configured. Set GEMINI_API_KEY or pass --api-key.")]
    MissingCredential,

    /// Provider answered with a non-200 status
    #[error("{}", provider_message(.operation, .status, .message))]
    ProviderError {
        operation: Operation,
        status: u16,
        message: Option<String>,
    },

    /// 200 response without the expected text path
    #[error("Invalid API response: {message}")]
    MalformedResponse { message: String },

    /// Extraction succeeded but the image held no text
    #[error("No text found in image")]
    NoTextFound,

    /// Request never produced a response
    #[error("Network error: {message}")]
    TransportFailure { message: String },

    /// Clipboard helper script failed
    #[error("{message}")]
    HelperFailure { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn provider_message(operation: &Operation, status: &u16, message: &Option<String>) -> String {
    match (message, operation) {
        (Some(message), _) => format!("API Error: {} ({})", message, status),
        (None, Operation::Translate) => format!("API call error ({})", status),
        (None, Operation::Extract) => format!("Error extracting text from image ({})", status),
    }
}

impl TranslationError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslationError::EmptyInput { .. } => ErrorKind::EmptyInput,
            TranslationError::MissingCredential => ErrorKind::MissingCredential,
            TranslationError::ProviderError { .. } => ErrorKind::ProviderError,
            TranslationError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            TranslationError::NoTextFound => ErrorKind::NoTextFound,
            TranslationError::TransportFailure { .. } => ErrorKind::TransportFailure,
            TranslationError::HelperFailure { .. } => ErrorKind::HelperFailure,
            TranslationError::ConfigError { .. }
            | TranslationError::IoError(_)
            | TranslationError::JsonError(_) => ErrorKind::ConfigError,
        }
    }

    pub(crate) fn empty_input(message: impl Into<String>) -> Self {
        TranslationError::EmptyInput {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        TranslationError::TransportFailure {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
