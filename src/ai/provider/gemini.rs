//! Google Gemini Backend
//!
//! Calls the Generative Language API `generateContent` endpoint.
//! The API has no system role in its basic form, so the system instruction
//! is inlined ahead of the query.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModelBackend, prompt_utils};
use crate::types::{CogniError, ErrorCategory, ErrorClassifier, Result};

const PROVIDER_NAME: &str = "gemini";

/// Gemini backend with secure API key handling
pub struct GeminiBackend {
    api_key: Option<SecretString>,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiBackend {
    pub fn new(client: reqwest::Client, api_base: &str, api_key: Option<SecretString>) -> Self {
        Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn build_request(query: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt_utils::build_inline_prompt(query),
                }],
            }],
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    async fn complete(&self, model: &str, query: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            CogniError::llm_with_category(ErrorCategory::Auth, "GEMINI_API_KEY not set")
        })?;

        let url = format!("{}/models/{}:generateContent", self.api_base, model);
        debug!(model, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&Self::build_request(query))
            .send()
            .await
            .map_err(|e| CogniError::LlmApi(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Gemini API error ({}): {}", status, body),
                PROVIDER_NAME,
            )
            .into());
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CogniError::LlmApi(format!("Failed to parse Gemini response: {}", e)))?;

        body.text()
            .ok_or_else(|| CogniError::LlmApi("No content in Gemini response".to_string()))
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::test_support::spawn_stub;
    use axum::{Json, Router, extract::Path, http::HeaderMap, routing::post};
    use serde_json::{Value, json};

    fn backend(base: &str) -> GeminiBackend {
        GeminiBackend::new(
            reqwest::Client::new(),
            base,
            Some(SecretString::from("g-test-key")),
        )
    }

    #[tokio::test]
    async fn test_complete_returns_candidate_text() {
        let app = Router::new().route(
            "/models/:call",
            post(
                |Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    assert_eq!(call, "gemini-1.5-flash:generateContent");
                    assert_eq!(headers["x-goog-api-key"], "g-test-key");
                    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
                    assert!(prompt.ends_with("Query: what is gravity"));
                    Json(json!({
                        "candidates": [
                            { "content": { "role": "model", "parts": [
                                { "text": "Gravity is " },
                                { "text": "a fundamental interaction." }
                            ] } }
                        ]
                    }))
                },
            ),
        );
        let base = spawn_stub(app).await;

        let text = backend(&base)
            .complete("gemini-1.5-flash", "what is gravity")
            .await
            .unwrap();
        assert_eq!(text, "Gravity is a fundamental interaction.");
    }

    #[tokio::test]
    async fn test_http_error_is_classified() {
        let app = Router::new().route(
            "/models/:call",
            post(|| async { (axum::http::StatusCode::FORBIDDEN, "key rejected") }),
        );
        let base = spawn_stub(app).await;

        let err = backend(&base)
            .complete("gemini-pro", "q")
            .await
            .unwrap_err();
        match err {
            CogniError::Llm(llm) => assert_eq!(llm.category, ErrorCategory::Auth),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_an_error() {
        let app = Router::new().route(
            "/models/:call",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base = spawn_stub(app).await;

        assert!(backend(&base).complete("gemini-pro", "q").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let backend = GeminiBackend::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        assert!(!backend.is_configured());
        assert!(backend.complete("gemini-pro", "q").await.is_err());
    }
}
