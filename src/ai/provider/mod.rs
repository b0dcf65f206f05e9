//! Research Provider Abstraction
//!
//! Two layers:
//!
//! - [`ModelBackend`]: one upstream service, single-call semantics
//!   ("given a model and a query, return text or fail").
//! - [`ResearchProvider`]: the uniform per-request contract the orchestrator
//!   consumes. [`ProviderAdapter`] implements it by walking a fallback chain
//!   of models over one backend.
//!
//! ## Modules
//!
//! - `chain`: Model fallback chain and response qualification
//! - `gemini`, `openrouter`, `huggingface`: HTTP backends

mod chain;
mod gemini;
mod huggingface;
mod openrouter;
mod prompt_utils;

pub use chain::{ModelAttempt, ProviderAdapter, ResponseFilter};
pub use gemini::GeminiBackend;
pub use huggingface::HuggingFaceBackend;
pub use openrouter::OpenRouterBackend;
pub use prompt_utils::SYSTEM_PROMPT;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, Secrets};
use crate::constants::network;
use crate::types::{CogniError, ProviderId, ProviderResult, Result};

// =============================================================================
// Traits
// =============================================================================

/// Single-call client for one upstream text-generation service
///
/// Owns no retry, timeout or fallback policy; that belongs to the adapter.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Generate an answer to `query` with `model`
    async fn complete(&self, model: &str, query: &str) -> Result<String>;

    /// Backend name for logging
    fn name(&self) -> &str;

    /// Whether a credential is available; unconfigured backends are never called
    fn is_configured(&self) -> bool;

    /// Display label for a model that has none configured
    fn default_label(&self, model: &str) -> String {
        model.to_string()
    }
}

/// Uniform provider contract consumed by the orchestrator
///
/// Implementations never fail: every error is folded into the returned
/// [`ProviderResult`].
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn invoke(&self, query: &str) -> ProviderResult;

    fn id(&self) -> ProviderId;

    /// Deadline the orchestrator applies to `invoke`
    fn timeout(&self) -> Duration;
}

/// Shared provider type for concurrent access across requests.
pub type SharedProvider = Arc<dyn ResearchProvider>;

// =============================================================================
// Factory
// =============================================================================

/// Build an HTTP client whose per-request timeout matches the provider deadline
///
/// Detached calls that outlive the orchestrator's deadline still end here.
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(network::CONNECTION_TIMEOUT_SECS))
        .user_agent(network::USER_AGENT)
        .build()
        .map_err(|e| CogniError::LlmApi(format!("Failed to create HTTP client: {}", e)))
}

/// Create all providers from configuration, in fixed priority order
pub fn build_providers(config: &Config, secrets: &Secrets) -> Result<Vec<SharedProvider>> {
    let mut providers: Vec<SharedProvider> = Vec::with_capacity(ProviderId::ALL.len());

    for id in ProviderId::ALL {
        let provider_config = config.providers.get(id);
        let client = build_http_client(provider_config.timeout())?;
        let key = secrets.get(id).cloned();

        let backend: Arc<dyn ModelBackend> = match id {
            ProviderId::Gemini => Arc::new(GeminiBackend::new(
                client,
                &provider_config.api_base,
                key,
            )),
            ProviderId::OpenRouter => Arc::new(OpenRouterBackend::new(
                client,
                &provider_config.api_base,
                key,
            )),
            ProviderId::HuggingFace => Arc::new(HuggingFaceBackend::new(
                client,
                &provider_config.api_base,
                key,
            )),
        };

        let filter = match id {
            ProviderId::OpenRouter => {
                ResponseFilter::new(config.chain.min_response_chars).rejecting_error_pages()
            }
            _ => ResponseFilter::new(config.chain.min_response_chars),
        };

        providers.push(Arc::new(ProviderAdapter::from_config(
            id,
            backend,
            provider_config,
            filter,
        )));
    }

    Ok(providers)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_providers_in_priority_order() {
        let providers = build_providers(&Config::default(), &Secrets::default()).unwrap();
        let ids: Vec<ProviderId> = providers.iter().map(|p| p.id()).collect();
        assert_eq!(ids, ProviderId::ALL.to_vec());
        assert_eq!(providers[1].timeout(), Duration::from_millis(8_000));
    }

    #[tokio::test]
    async fn test_missing_keys_degrade_to_failure() {
        let providers = build_providers(&Config::default(), &Secrets::default()).unwrap();
        for provider in providers {
            let result = provider.invoke("what is ai").await;
            assert!(!result.is_success());
            assert_eq!(result.display_name(), provider.id().display_name());
        }
    }
}
