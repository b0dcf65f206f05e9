//! OpenRouter Backend
//!
//! OpenAI-compatible Chat Completions API fronting many free models.
//! Model labels default to `OpenRouter (<model name>)`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModelBackend, prompt_utils};
use crate::types::{CogniError, ErrorCategory, ErrorClassifier, Result};

const PROVIDER_NAME: &str = "openrouter";

/// OpenRouter backend with secure API key handling
pub struct OpenRouterBackend {
    /// API key stored securely - never exposed in logs or debug output
    api_key: Option<SecretString>,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenRouterBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterBackend")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl OpenRouterBackend {
    pub fn new(client: reqwest::Client, api_base: &str, api_key: Option<SecretString>) -> Self {
        Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn build_request(model: &str, query: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt_utils::SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: query.to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl ModelBackend for OpenRouterBackend {
    async fn complete(&self, model: &str, query: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            CogniError::llm_with_category(ErrorCategory::Auth, "OPENROUTER_API_KEY not set")
        })?;

        let url = format!("{}/chat/completions", self.api_base);
        debug!(model, "Sending request to OpenRouter API");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", api_key.expose_secret()),
            )
            .json(&Self::build_request(model, query))
            .send()
            .await
            .map_err(|e| CogniError::LlmApi(format!("OpenRouter request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("OpenRouter API error ({}): {}", status, body),
                PROVIDER_NAME,
            )
            .into());
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            CogniError::LlmApi(format!("Failed to parse OpenRouter response: {}", e))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CogniError::LlmApi("No content in OpenRouter response".to_string()))
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn default_label(&self, model: &str) -> String {
        let short = model.split_once('/').map_or(model, |(_, name)| name);
        format!("OpenRouter ({})", short)
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::test_support::spawn_stub;
    use axum::{Json, Router, http::HeaderMap, routing::post};
    use serde_json::{Value, json};

    fn backend(base: &str) -> OpenRouterBackend {
        OpenRouterBackend::new(
            reqwest::Client::new(),
            base,
            Some(SecretString::from("sk-or-test")),
        )
    }

    #[test]
    fn test_default_label_uses_model_name() {
        let backend = backend("http://unused");
        assert_eq!(
            backend.default_label("google/gemma-2-9b-it:free"),
            "OpenRouter (gemma-2-9b-it:free)"
        );
        assert_eq!(backend.default_label("local"), "OpenRouter (local)");
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_messages() {
        let app = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-or-test");
                assert_eq!(body["model"], "mistralai/mistral-7b-instruct:free");
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "what is devops");
                Json(json!({
                    "choices": [
                        { "message": { "role": "assistant", "content": "DevOps combines development and operations." } }
                    ]
                }))
            }),
        );
        let base = spawn_stub(app).await;

        let text = backend(&base)
            .complete("mistralai/mistral-7b-instruct:free", "what is devops")
            .await
            .unwrap();
        assert_eq!(text, "DevOps combines development and operations.");
    }

    #[tokio::test]
    async fn test_rate_limit_is_classified() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base = spawn_stub(app).await;

        let err = backend(&base).complete("m", "q").await.unwrap_err();
        match err {
            CogniError::Llm(llm) => assert_eq!(llm.category, ErrorCategory::RateLimit),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_null_content_is_an_error() {
        let app = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({ "choices": [ { "message": { "content": null } } ] })) }),
        );
        let base = spawn_stub(app).await;

        assert!(backend(&base).complete("m", "q").await.is_err());
    }
}
