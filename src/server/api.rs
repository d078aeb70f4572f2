//! HTTP API server implementation

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::busy::BusyGate;
use crate::core::client::TranslationClient;
use crate::core::errors::{ErrorKind, TranslationError};
use crate::core::models::Language;

/// Application state
#[derive(Clone)]
pub struct AppState {
    client: Arc<TranslationClient>,
    gate: BusyGate,
}

impl AppState {
    /// State with an idle busy gate
    pub fn new(client: TranslationClient) -> Self {
        Self {
            client: Arc::new(client),
            gate: BusyGate::new(),
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    busy: bool,
}

/// Language list response
#[derive(Serialize)]
struct LanguagesResponse {
    default: String,
    data: Vec<Language>,
}

/// Translation request body
#[derive(Deserialize)]
pub struct TranslateBody {
    pub text: String,
    pub context: Option<String>,
    pub target_lang: Option<String>,
}

/// Extraction request body
#[derive(Deserialize)]
pub struct ExtractBody {
    pub image_base64: String,
    pub mime_type: Option<String>,
    #[serde(default)]
    pub translate: bool,
    pub target_lang: Option<String>,
    pub context: Option<String>,
}

/// Successful response
#[derive(Serialize)]
pub struct TextResponse {
    pub text: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error message and snake case code
#[derive(Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
}

/// Error surfaced by a handler
pub enum ApiError {
    Busy,
    BadRequest(String),
    Translation(TranslationError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<TranslationError> for ApiError {
    fn from(err: TranslationError) -> Self {
        ApiError::Translation(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, code) = match self {
            ApiError::Busy => (
                StatusCode::CONFLICT,
                "A request is already in progress".to_string(),
                "busy".to_string(),
            ),
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, message, "invalid_request".to_string())
            }
            ApiError::Translation(err) => {
                let kind = err.kind();
                (status_for(kind), err.to_string(), kind.as_str().to_string())
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                message: format!("Error: {}", message),
                code,
            },
        };

        (status, Json(body)).into_response()
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptyInput | ErrorKind::MissingCredential => StatusCode::BAD_REQUEST,
        ErrorKind::NoTextFound => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ProviderError | ErrorKind::MalformedResponse | ErrorKind::TransportFailure => {
            StatusCode::BAD_GATEWAY
        }
        ErrorKind::HelperFailure | ErrorKind::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Health check handler
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "gtranslator".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        busy: state.gate.is_busy(),
    })
}

/// Get languages handler
async fn get_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        default: state.client.config().language().code,
        data: Language::all(),
    })
}

fn language_for(state: &AppState, target_lang: Option<&str>) -> Language {
    target_lang
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(Language::resolve)
        .unwrap_or_else(|| state.client.config().language())
}

/// Translation handler
async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let Json(payload) = payload?;
    let _guard = state.gate.try_begin().ok_or(ApiError::Busy)?;

    let language = language_for(&state, payload.target_lang.as_deref());
    let request = state
        .client
        .translation_request(payload.text, language.clone(), payload.context);

    let translation = state.client.translate(&request).await.map_err(|e| {
        warn!("Translation failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(TextResponse {
        text: translation.text,
        model: translation.model,
        extracted_text: None,
        target_lang: Some(language.code),
    }))
}

/// Extraction handler, optionally translating the extracted text
async fn extract(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ExtractBody>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let Json(payload) = payload?;
    let _guard = state.gate.try_begin().ok_or(ApiError::Busy)?;

    let image_bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.image_base64.trim())
        .map_err(|e| ApiError::BadRequest(format!("image_base64 is not valid base64: {}", e)))?;

    let mut request = state.client.extraction_request(image_bytes);
    if let Some(mime_type) = payload.mime_type {
        request = request.with_mime_type(mime_type);
    }

    if payload.translate {
        let language = language_for(&state, payload.target_lang.as_deref());
        let (extracted, translation) = state
            .client
            .extract_and_translate(&request, language.clone(), payload.context)
            .await
            .map_err(|e| {
                warn!("Extraction failed: {}", e);
                ApiError::from(e)
            })?;

        return Ok(Json(TextResponse {
            text: translation.text,
            model: translation.model,
            extracted_text: Some(extracted),
            target_lang: Some(language.code),
        }));
    }

    let extracted = state.client.extract_text(&request).await.map_err(|e| {
        warn!("Extraction failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(TextResponse {
        text: extracted.text,
        model: extracted.model,
        extracted_text: None,
        target_lang: None,
    }))
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/languages", get(get_languages))
        .route("/translate", post(translate))
        .route("/extract", post(extract))
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(client: TranslationClient, host: String, port: u16) -> anyhow::Result<()> {
    let app = router(AppState::new(client));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TranslatorConfig;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn spawn(config: TranslatorConfig) -> (String, AppState) {
        let state = AppState::new(TranslationClient::new(config).unwrap());
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), state)
    }

    fn provider_config(provider: &MockServer) -> TranslatorConfig {
        TranslatorConfig {
            api_key: "key".to_string(),
            api_endpoint: provider.uri(),
            ..Default::default()
        }
    }

    fn candidate(text: &str) -> Value {
        json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
    }

    async fn post(base: &str, route: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{}{}", base, route))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_health_and_languages() {
        let (base, _) = spawn(TranslatorConfig::default()).await;
        let client = reqwest::Client::new();

        let health: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
        assert_eq!(health["status"], "ok");
        assert_eq!(health["busy"], false);

        let languages: Value = client
            .get(format!("{}/languages", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(languages["default"], "it");
        assert_eq!(languages["data"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_translate_without_key() {
        let (base, _) = spawn(TranslatorConfig::default()).await;

        let response = reqwest::Client::new()
            .post(format!("{}/translate", base))
            .json(&json!({ "text": "Hello" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["code"], "missing_credential");
        assert!(body["error"]["message"].as_str().unwrap().starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_busy_gate_rejects_second_request() {
        let (base, state) = spawn(TranslatorConfig {
            api_key: "key".to_string(),
            ..Default::default()
        })
        .await;

        let _guard = state.gate.try_begin().unwrap();

        let response = reqwest::Client::new()
            .post(format!("{}/translate", base))
            .json(&json!({ "text": "Hello" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 409);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["code"], "busy");
    }

    #[tokio::test]
    async fn test_extract_rejects_bad_base64() {
        let (base, _) = spawn(TranslatorConfig {
            api_key: "key".to_string(),
            ..Default::default()
        })
        .await;

        let response = reqwest::Client::new()
            .post(format!("{}/extract", base))
            .json(&json!({ "image_base64": "***" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_invalid_body_gets_error_envelope() {
        let (base, _) = spawn(TranslatorConfig {
            api_key: "key".to_string(),
            ..Default::default()
        })
        .await;

        let (status, body) = post(&base, "/translate", json!({ "txt": "Hello" })).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "invalid_request");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error: "));

        let (status, body) = post(&base, "/extract", json!({ "image_base64": 42 })).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "invalid_request");

        // No Content-Type header
        let response = reqwest::Client::new()
            .post(format!("{}/translate", base))
            .body(r#"{"text": "Hello"}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_translate_success() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("Bonjour")))
            .expect(1)
            .mount(&provider)
            .await;

        let (base, state) = spawn(provider_config(&provider)).await;
        let (status, body) = post(
            &base,
            "/translate",
            json!({ "text": "Hello", "target_lang": "fr" }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["text"], "Bonjour");
        assert_eq!(body["model"], "gemini-1.5-flash");
        assert_eq!(body["target_lang"], "fr");
        assert!(body.get("extracted_text").is_none());
        assert!(!state.gate.is_busy());
    }

    #[tokio::test]
    async fn test_extract_then_translate() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "generationConfig": { "topK": 32 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("Good morning")))
            .expect(1)
            .mount(&provider)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "generationConfig": { "topK": 40 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("Buongiorno")))
            .expect(1)
            .mount(&provider)
            .await;

        let (base, _) = spawn(provider_config(&provider)).await;
        let (status, body) = post(
            &base,
            "/extract",
            json!({ "image_base64": "AQID", "translate": true }),
        )
        .await;

        assert_eq!(status, 200);
        assert_eq!(body["extracted_text"], "Good morning");
        assert_eq!(body["text"], "Buongiorno");
        assert_eq!(body["target_lang"], "it");
    }

    #[tokio::test]
    async fn test_no_text_found_is_422() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate("[NO_TEXT_FOUND]")))
            .mount(&provider)
            .await;

        let (base, _) = spawn(provider_config(&provider)).await;
        let (status, body) = post(&base, "/extract", json!({ "image_base64": "AQID" })).await;

        assert_eq!(status, 422);
        assert_eq!(body["error"]["code"], "no_text_found");
        assert_eq!(body["error"]["message"], "Error: No text found in image");
    }

    #[tokio::test]
    async fn test_provider_error_is_502() {
        let provider = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "error": { "message": "API key not valid" } })),
            )
            .mount(&provider)
            .await;

        let (base, _) = spawn(provider_config(&provider)).await;
        let (status, body) = post(&base, "/translate", json!({ "text": "Hello" })).await;

        assert_eq!(status, 502);
        assert_eq!(body["error"]["code"], "provider_error");
        assert_eq!(
            body["error"]["message"],
            "Error: API Error: API key not valid (400)"
        );
    }
}
