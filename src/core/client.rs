//! Async Gemini client for translation and image text extraction

use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Operation, Result, TranslationError};
use crate::core::gemini::{self, GenerateContentRequest};
use crate::core::models::{ExtractionRequest, Language, Translation, TranslationRequest};
use crate::core::prompt;

/// User agent sent with every provider request
const USER_AGENT: &str = "GTranslator";

/// Async translation client. One POST per call, no retries.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
}

impl TranslationClient {
    /// Create a new client
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(TranslatorConfig::from_env())
    }

    /// Active configuration
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translation request carrying the configured key
    pub fn translation_request(
        &self,
        text: impl Into<String>,
        language: Language,
        context: Option<String>,
    ) -> TranslationRequest {
        let mut request =
            TranslationRequest::new(text, language).with_api_key(self.config.api_key.clone());
        request.context = context;
        request
    }

    /// Extraction request carrying the configured key
    pub fn extraction_request(&self, image_bytes: Vec<u8>) -> ExtractionRequest {
        ExtractionRequest::new(image_bytes).with_api_key(self.config.api_key.clone())
    }

    /// Translate a single request
    pub async fn translate(&self, request: &TranslationRequest) -> Result<Translation> {
        if request.source_text.trim().is_empty() {
            return Err(TranslationError::empty_input("Enter text to translate"));
        }
        let api_key = credential(&request.api_key)?;

        let body = GenerateContentRequest::text(
            prompt::translation_prompt(request),
            prompt::translation_config(),
        );

        info!(
            "Translating {} chars into {}",
            request.source_text.trim().len(),
            request.target_language
        );

        let text = self
            .send_request(&body, api_key, Operation::Translate)
            .await?;

        Ok(Translation {
            text,
            model: self.config.model.clone(),
        })
    }

    /// Extract the text shown in an image
    pub async fn extract_text(&self, request: &ExtractionRequest) -> Result<Translation> {
        if request.image_bytes.is_empty() {
            return Err(TranslationError::empty_input("No image to extract text from"));
        }
        let api_key = credential(&request.api_key)?;

        let body = GenerateContentRequest::image(
            &request.image_bytes,
            request.mime_type.as_str(),
            prompt::EXTRACTION_PROMPT,
            prompt::extraction_config(),
        );

        info!(
            "Extracting text from {} byte {} image",
            request.image_bytes.len(),
            request.mime_type
        );

        let extracted = self
            .send_request(&body, api_key, Operation::Extract)
            .await?;
        if prompt::is_no_text(&extracted) {
            return Err(TranslationError::NoTextFound);
        }

        Ok(Translation {
            text: extracted.trim().to_string(),
            model: self.config.model.clone(),
        })
    }

    /// Extract text from an image, then translate it.
    ///
    /// Returns the extracted text alongside its translation.
    pub async fn extract_and_translate(
        &self,
        request: &ExtractionRequest,
        language: Language,
        context: Option<String>,
    ) -> Result<(String, Translation)> {
        let extracted = self.extract_text(request).await?;

        let mut translation_request = TranslationRequest::new(extracted.text.clone(), language)
            .with_api_key(request.api_key.clone());
        translation_request.context = context;

        let translation = self.translate(&translation_request).await?;
        Ok((extracted.text, translation))
    }

    /// Send actual HTTP request and pull out the candidate text
    async fn send_request(
        &self,
        body: &GenerateContentRequest,
        api_key: &str,
        operation: Operation,
    ) -> Result<String> {
        let url = self.config.generate_content_url();
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TranslationError::TransportFailure {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranslationError::TransportFailure {
                message: e.to_string(),
            })?;

        if status == StatusCode::OK {
            let json: serde_json::Value =
                serde_json::from_str(&body).map_err(|e| TranslationError::MalformedResponse {
                    message: e.to_string(),
                })?;

            let text = gemini::candidate_text(&json).ok_or_else(|| {
                TranslationError::MalformedResponse {
                    message: "No text in response".to_string(),
                }
            })?;

            Ok(text.to_string())
        } else {
            let message = gemini::error_message(&body);
            warn!("Provider returned {}: {:?}", status.as_u16(), message);

            Err(TranslationError::ProviderError {
                operation,
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// API key, or `MissingCredential` if blank
fn credential(api_key: &str) -> Result<&str> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(TranslationError::MissingCredential);
    }
    Ok(api_key)
}
