//! Clipboard image capture through an external helper script
//!
//! The helper writes the clipboard image to a temporary file and prints its
//! path on stdout. On failure it exits non-zero with a message on stderr.

use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::ExtractionRequest;

/// Image bytes ready to send for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl CapturedImage {
    /// Read an image file from disk
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| helper_failure(format!("Error processing image: {}", e)))?;

        if bytes.is_empty() {
            return Err(helper_failure("Unable to convert image for processing"));
        }

        Ok(Self {
            bytes,
            mime_type: mime_type_for(path).to_string(),
        })
    }

    /// Extraction request for this image
    pub fn into_request(self, api_key: impl Into<String>) -> ExtractionRequest {
        ExtractionRequest::new(self.bytes)
            .with_mime_type(self.mime_type)
            .with_api_key(api_key)
    }
}

/// Runs the clipboard helper script
#[derive(Debug, Clone)]
pub struct ClipboardCapture {
    script: PathBuf,
}

impl ClipboardCapture {
    pub fn new(script: impl Into<PathBuf>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// Capture the current clipboard image
    pub async fn capture(&self) -> Result<CapturedImage> {
        debug!("Running clipboard helper {}", self.script.display());

        let output = Command::new("/bin/bash")
            .arg(&self.script)
            .output()
            .await
            .map_err(|e| helper_failure(format!("Unable to execute script for image: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let temp_path = first_line(&stdout);

        let temp_path = match temp_path {
            Some(path) if output.status.success() => PathBuf::from(path),
            _ => {
                let message = first_line(&stderr).unwrap_or("No image found in clipboard");
                return Err(helper_failure(message));
            }
        };

        info!("Image temporarily saved at: {}", temp_path.display());

        let image = CapturedImage::from_file(&temp_path).await;

        if let Err(e) = tokio::fs::remove_file(&temp_path).await {
            warn!("Failed to delete {}: {}", temp_path.display(), e);
        }

        image
    }
}

fn first_line(output: &str) -> Option<&str> {
    output.lines().next().map(str::trim).filter(|l| !l.is_empty())
}

/// MIME type from the file extension, PNG when unknown
fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    }
}

fn helper_failure(message: impl Into<String>) -> TranslationError {
    TranslationError::HelperFailure {
        message: message.into(),
    }
}
