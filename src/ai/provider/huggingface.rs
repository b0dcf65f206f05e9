//! Hugging Face Inference Backend
//!
//! Raw text-generation endpoint (`POST {api_base}/{model}`). The model echoes
//! the prompt at the start of `generated_text`, so it is stripped before the
//! answer is returned.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModelBackend, prompt_utils};
use crate::constants::chain as chain_constants;
use crate::types::{CogniError, ErrorCategory, ErrorClassifier, Result};

const PROVIDER_NAME: &str = "huggingface";

pub struct HuggingFaceBackend {
    api_key: Option<SecretString>,
    api_base: String,
    max_new_tokens: u32,
    client: reqwest::Client,
}

impl std::fmt::Debug for HuggingFaceBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceBackend")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .field("max_new_tokens", &self.max_new_tokens)
            .finish()
    }
}

impl HuggingFaceBackend {
    pub fn new(client: reqwest::Client, api_base: &str, api_key: Option<SecretString>) -> Self {
        Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            max_new_tokens: chain_constants::MAX_NEW_TOKENS,
            client,
        }
    }
}

#[async_trait]
impl ModelBackend for HuggingFaceBackend {
    async fn complete(&self, model: &str, query: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            CogniError::llm_with_category(ErrorCategory::Auth, "HUGGINGFACE_API_KEY not set")
        })?;

        let prompt = prompt_utils::build_instruct_prompt(query);
        let request = TextGenerationRequest {
            inputs: &prompt,
            parameters: GenerationParameters {
                max_new_tokens: self.max_new_tokens,
            },
        };
        let url = format!("{}/{}", self.api_base, model);
        debug!(model, "Sending request to Hugging Face Inference API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| CogniError::LlmApi(format!("Hugging Face request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("Hugging Face API error ({}): {}", status, body),
                PROVIDER_NAME,
            )
            .into());
        }

        let body: TextGenerationResponse = response.json().await.map_err(|e| {
            CogniError::LlmApi(format!("Failed to parse Hugging Face response: {}", e))
        })?;

        let generated = body
            .generated_text()
            .ok_or_else(|| CogniError::LlmApi("No content in Hugging Face response".to_string()))?;

        Ok(prompt_utils::strip_echoed_prompt(generated, &prompt))
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
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
}

/// The endpoint answers with either a list or a single object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextGenerationResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

impl TextGenerationResponse {
    fn generated_text(&self) -> Option<&str> {
        match self {
            Self::Batch(items) => items.first().map(|g| g.generated_text.as_str()),
            Self::Single(item) => Some(item.generated_text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::test_support::spawn_stub;
    use axum::{Json, Router, extract::Path, routing::post};
    use serde_json::{Value, json};

    fn backend(base: &str) -> HuggingFaceBackend {
        HuggingFaceBackend::new(
            reqwest::Client::new(),
            base,
            Some(SecretString::from("hf-test")),
        )
    }

    #[tokio::test]
    async fn test_complete_strips_echoed_prompt() {
        let app = Router::new().route(
            "/:org/:model",
            post(
                |Path((org, model)): Path<(String, String)>, Json(body): Json<Value>| async move {
                    assert_eq!(format!("{org}/{model}"), "meta-llama/Meta-Llama-3-8B-Instruct");
                    assert_eq!(body["parameters"]["max_new_tokens"], 1000);
                    let inputs = body["inputs"].as_str().unwrap().to_string();
                    Json(json!([
                        { "generated_text": format!("{inputs}\n  RAM is volatile working memory.  ") }
                    ]))
                },
            ),
        );
        let base = spawn_stub(app).await;

        let text = backend(&base)
            .complete("meta-llama/Meta-Llama-3-8B-Instruct", "what is ram")
            .await
            .unwrap();
        assert_eq!(text, "RAM is volatile working memory.");
    }

    #[tokio::test]
    async fn test_single_object_response() {
        let app = Router::new().route(
            "/:org/:model",
            post(|| async { Json(json!({ "generated_text": "Standalone answer text." })) }),
        );
        let base = spawn_stub(app).await;

        let text = backend(&base).complete("a/b", "q").await.unwrap();
        assert_eq!(text, "Standalone answer text.");
    }

    #[tokio::test]
    async fn test_model_loading_is_an_error() {
        let app = Router::new().route(
            "/:org/:model",
            post(|| async {
                (
                    axum::http::StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "Model is currently loading" })),
                )
            }),
        );
        let base = spawn_stub(app).await;

        let err = backend(&base).complete("a/b", "q").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
