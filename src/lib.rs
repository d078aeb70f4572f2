//! GTranslator - Gemini-backed translation library
//!
//! This library translates text and extracts text from images through the
//! Google Gemini `generateContent` API, with a CLI and a small HTTP service
//! on top.

#![forbid(unsafe_code)]

pub mod capture;
pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    busy::BusyGate,
    client::TranslationClient,
    config::TranslatorConfig,
    errors::{ErrorKind, Operation, TranslationError},
    models::{ExtractionRequest, Language, Translation, TranslationRequest},
};

pub use capture::clipboard::{CapturedImage, ClipboardCapture};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
