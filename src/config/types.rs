//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Secrets are kept apart from `Config` so the config can be printed
//! and serialized without ever touching an API key.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{chain, enrichment, network, timeout};
use crate::types::{CogniError, ProviderId, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Upstream text-generation providers
    pub providers: ProvidersConfig,

    /// Image enrichment settings
    pub enrichment: EnrichmentConfig,

    /// Response qualification rules shared by all adapters
    pub chain: ChainConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
            enrichment: EnrichmentConfig::default(),
            chain: ChainConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `CogniError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        for id in ProviderId::ALL {
            let provider = self.providers.get(id);
            if provider.timeout_ms == 0 {
                return Err(CogniError::Config(format!(
                    "providers.{}.timeout_ms must be greater than 0",
                    id
                )));
            }
            if provider.enabled && provider.models.is_empty() {
                return Err(CogniError::Config(format!(
                    "providers.{} is enabled but has no models",
                    id
                )));
            }
            if provider.api_base.trim().is_empty() {
                return Err(CogniError::Config(format!(
                    "providers.{}.api_base must not be empty",
                    id
                )));
            }
        }

        if self.enrichment.timeout_ms == 0 {
            return Err(CogniError::Config(
                "enrichment.timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.chain.min_response_chars == 0 {
            return Err(CogniError::Config(
                "chain.min_response_chars must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: network::DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

// =============================================================================
// Provider Configuration
// =============================================================================

/// One model in a provider's fallback chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Upstream model identifier
    pub id: String,
    /// Display name surfaced in `sources`; derived from `id` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ModelSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    pub fn labeled(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Disabled providers report failure without any network call
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// API base URL
    pub api_base: String,
    /// Deadline for the whole fallback chain, in milliseconds
    pub timeout_ms: u64,
    /// Fallback chain, tried in order
    pub models: Vec<ModelSpec>,
}

fn default_true() -> bool {
    true
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub gemini: ProviderConfig,
    pub openrouter: ProviderConfig,
    pub huggingface: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::Gemini => &self.gemini,
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::HuggingFace => &self.huggingface,
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            gemini: ProviderConfig {
                enabled: true,
                api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                timeout_ms: timeout::GEMINI_MS,
                models: vec![
                    ModelSpec::labeled("gemini-1.5-flash", "Gemini 1.5 Flash"),
                    ModelSpec::labeled("gemini-pro", "Gemini Pro"),
                ],
            },
            openrouter: ProviderConfig {
                enabled: true,
                api_base: "https://openrouter.ai/api/v1".to_string(),
                timeout_ms: timeout::OPENROUTER_MS,
                models: vec![
                    ModelSpec::new("google/gemma-2-9b-it:free"),
                    ModelSpec::new("microsoft/phi-3-mini-128k-instruct:free"),
                    ModelSpec::new("mistralai/mistral-7b-instruct:free"),
                    ModelSpec::new("meta-llama/llama-3.1-8b-instruct:free"),
                    ModelSpec::new("huggingfaceh4/zephyr-7b-beta:free"),
                    ModelSpec::new("nousresearch/hermes-3-llama-3.1-405b:free"),
                ],
            },
            huggingface: ProviderConfig {
                enabled: true,
                api_base: "https://api-inference.huggingface.co/models".to_string(),
                timeout_ms: timeout::HUGGINGFACE_MS,
                models: vec![
                    ModelSpec::labeled("meta-llama/Meta-Llama-3-8B-Instruct", "Llama 3"),
                    ModelSpec::labeled("mistralai/Mistral-7B-Instruct-v0.2", "Mistral (HF)"),
                ],
            },
        }
    }
}

// =============================================================================
// Enrichment Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    /// Wikimedia Commons API endpoint
    pub api_url: String,
    /// Deadline in milliseconds
    pub timeout_ms: u64,
    /// Number of images requested
    pub limit: u32,
}

impl EnrichmentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://commons.wikimedia.org/w/api.php".to_string(),
            timeout_ms: timeout::ENRICHMENT_MS,
            limit: enrichment::RESULT_LIMIT,
        }
    }
}

// =============================================================================
// Chain Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Responses must be strictly longer than this many characters
    pub min_response_chars: usize,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            min_response_chars: chain::MIN_RESPONSE_CHARS,
        }
    }
}

// =============================================================================
// Secrets
// =============================================================================

/// Provider API keys, resolved once at startup and read-only afterwards
///
/// Never serialized; redacted in debug output.
#[derive(Clone, Default)]
pub struct Secrets {
    gemini: Option<SecretString>,
    openrouter: Option<SecretString>,
    huggingface: Option<SecretString>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<SecretString>| key.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Secrets")
            .field("gemini", &redact(&self.gemini))
            .field("openrouter", &redact(&self.openrouter))
            .field("huggingface", &redact(&self.huggingface))
            .finish()
    }
}

impl Secrets {
    /// Read provider keys from the process environment
    ///
    /// Missing or blank variables leave that provider without a key.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve keys through an arbitrary lookup (environment, test fixture, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |id: ProviderId| {
            lookup(id.key_env_var())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(SecretString::from)
        };
        Self {
            gemini: read(ProviderId::Gemini),
            openrouter: read(ProviderId::OpenRouter),
            huggingface: read(ProviderId::HuggingFace),
        }
    }

    pub fn with_key(mut self, id: ProviderId, key: impl Into<String>) -> Self {
        let key = Some(SecretString::from(key.into()));
        match id {
            ProviderId::Gemini => self.gemini = key,
            ProviderId::OpenRouter => self.openrouter = key,
            ProviderId::HuggingFace => self.huggingface = key,
        }
        self
    }

    pub fn get(&self, id: ProviderId) -> Option<&SecretString> {
        match id {
            ProviderId::Gemini => self.gemini.as_ref(),
            ProviderId::OpenRouter => self.openrouter.as_ref(),
            ProviderId::HuggingFace => self.huggingface.as_ref(),
        }
    }

    /// Providers that have a key configured, in priority order
    pub fn configured(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| self.get(*id).is_some())
            .collect()
    }
}
