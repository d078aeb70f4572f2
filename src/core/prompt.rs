//! Prompt templates and generation presets

use crate::core::gemini::GenerationConfig;
use crate::core::models::TranslationRequest;

/// Marker the model is asked to return when an image has no text
pub const NO_TEXT_MARKER: &str = "[NO_TEXT_FOUND]";

/// Fixed instruction sent alongside an image
pub const EXTRACTION_PROMPT: &str = "Extract all text content from this image. If no text is found, respond with an empty string or a specific marker like '[NO_TEXT_FOUND]'. Please return ONLY the text found in the image, without any additional comments or explanations.";

/// Build the translation instruction for a request
pub fn translation_prompt(request: &TranslationRequest) -> String {
    let language = &request.target_language;
    let text = request.source_text.trim();

    match request.effective_context() {
        Some(context) => format!(
            "Translate the following text into {} (language code: {}), considering the following context: '{}'. Return only the translated text, without comments or explanations. Text to translate: '{}'",
            language.name, language.code, context, text
        ),
        None => format!(
            "Translate the following text into {} (language code: {}). Return only the translated text, without comments or explanations. Text to translate: '{}'",
            language.name, language.code, text
        ),
    }
}

/// Low temperature for a more literal translation
pub fn translation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.2,
        top_k: 40,
        top_p: 0.95,
        max_output_tokens: 2048,
    }
}

pub fn extraction_config() -> GenerationConfig {
    GenerationConfig {
        temperature: 0.1,
        top_k: 32,
        top_p: 0.95,
        max_output_tokens: 2048,
    }
}

/// Whether an extraction answer means the image had no text
pub fn is_no_text(extracted: &str) -> bool {
    let extracted = extracted.trim();
    extracted.is_empty() || extracted == NO_TEXT_MARKER
}
