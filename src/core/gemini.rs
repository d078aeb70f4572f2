//! Gemini `generateContent` payloads

use base64::Engine;
use serde::Serialize;
use serde_json::Value;

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// A single prompt part: plain text or inline media
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

/// Base64 inline payload used for image requests
#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Top-k sampling cutoff
    pub top_k: u32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Maximum tokens in the answer
    pub max_output_tokens: u32,
}

impl GenerateContentRequest {
    /// Text-only request
    pub fn text(prompt: impl Into<String>, generation_config: GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: prompt.into(),
                }],
            }],
            generation_config,
        }
    }

    /// Image followed by an instruction
    pub fn image(
        image_bytes: &[u8],
        mime_type: impl Into<String>,
        prompt: impl Into<String>,
        generation_config: GenerationConfig,
    ) -> Self {
        let data = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.into(),
                            data,
                        },
                    },
                    Part::Text {
                        text: prompt.into(),
                    },
                ],
            }],
            generation_config,
        }
    }
}

/// Text at `candidates[0].content.parts[0].text`, if present
pub fn candidate_text(json: &Value) -> Option<&str> {
    json["candidates"]
        .get(0)
        .and_then(|c| c["content"]["parts"].get(0))
        .and_then(|p| p["text"].as_str())
}

/// Provider message at `error.message`, if the body is an error envelope
pub fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json["error"]["message"].as_str().map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn config() -> GenerationConfig {
        GenerationConfig {
            temperature: 0.5,
            top_k: 40,
            top_p: 0.5,
            max_output_tokens: 2048,
        }
    }

    #[test]
    fn test_text_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::text("hi", config())).unwrap();
        assert_json_eq!(
            body,
            json!({
                "contents": [{ "parts": [{ "text": "hi" }] }],
                "generationConfig": {
                    "temperature": 0.5,
                    "topK": 40,
                    "topP": 0.5,
                    "maxOutputTokens": 2048
                }
            })
        );
    }

    #[test]
    fn test_image_request_shape() {
        let body = serde_json::to_value(GenerateContentRequest::image(
            b"abc",
            "image/png",
            "read it",
            config(),
        ))
        .unwrap();
        assert_json_eq!(
            body["contents"][0]["parts"],
            json!([
                { "inline_data": { "mime_type": "image/png", "data": "YWJj" } },
                { "text": "read it" }
            ])
        );
    }

    #[test]
    fn test_candidate_text() {
        let ok = json!({"candidates": [{"content": {"parts": [{"text": "Ciao"}]}}]});
        assert_eq!(candidate_text(&ok), Some("Ciao"));

        assert_eq!(candidate_text(&json!({"candidates": []})), None);
        assert_eq!(candidate_text(&json!({"candidates": [{"content": {}}]})), None);
        assert_eq!(
            candidate_text(&json!({"candidates": [{"content": {"parts": [{"text": 3}]}}]})),
            None
        );
        assert_eq!(candidate_text(&json!("nope")), None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"error": {"code": 400, "message": "bad key"}}"#),
            Some("bad key".to_string())
        );
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"error": "flat"}"#), None);
    }
}
