//! Research request/response data model
//!
//! Closed records for everything that crosses a component boundary:
//! provider outcomes, enrichment images and the final report.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Providers
// =============================================================================

/// Upstream text-generation providers, declared in fixed priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    OpenRouter,
    HuggingFace,
}

impl ProviderId {
    /// All providers in priority order
    pub const ALL: [ProviderId; 3] = [Self::Gemini, Self::OpenRouter, Self::HuggingFace];

    /// Generic display name used when no specific model produced an answer
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::OpenRouter => "OpenRouter",
            Self::HuggingFace => "HuggingFace",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
            Self::HuggingFace => "huggingface",
        }
    }

    /// Environment variable holding this provider's API key
    pub fn key_env_var(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenRouter => "OPENROUTER_API_KEY",
            Self::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one provider invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Success,
    Failure,
    Timeout,
}

/// Result of one provider invocation for one request
///
/// `content` is present exactly when `status` is `Success`; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderResult {
    provider: ProviderId,
    display_name: String,
    content: Option<String>,
    status: ProviderStatus,
}

impl ProviderResult {
    pub fn success(
        provider: ProviderId,
        display_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            display_name: display_name.into(),
            content: Some(content.into()),
            status: ProviderStatus::Success,
        }
    }

    pub fn failure(provider: ProviderId) -> Self {
        Self {
            provider,
            display_name: provider.display_name().to_string(),
            content: None,
            status: ProviderStatus::Failure,
        }
    }

    pub fn timeout(provider: ProviderId) -> Self {
        Self {
            provider,
            display_name: provider.display_name().to_string(),
            content: None,
            status: ProviderStatus::Timeout,
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn status(&self) -> ProviderStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ProviderStatus::Success
    }
}

// =============================================================================
// Enrichment
// =============================================================================

/// Illustrative image found for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,
    pub title: String,
    pub source: String,
}

// =============================================================================
// Report
// =============================================================================

/// Coarse confidence label derived from the number of successful providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_success_count(count: usize) -> Self {
        match count {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Medium => write!(f, "Medium"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// How the answer in a response was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchMode {
    Synthesized,
    OfflineFallback,
    HeuristicFallback,
}

/// One display block of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub icon: String,
    pub heading: String,
    pub content: String,
}

impl Section {
    pub fn new(
        icon: impl Into<String>,
        heading: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            icon: icon.into(),
            heading: heading.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub title: String,
    pub answer: String,
    pub confidence: String,
    pub sources: Vec<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub provider_count: usize,
    /// Set only for degraded answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ResearchMode>,
    /// Set only for provider-synthesized answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Full body returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub research: ResearchReport,
    pub images: Vec<ImageResult>,
    pub meta: ResponseMeta,
}

impl ResearchResponse {
    /// Mode the answer was produced in (synthesized unless marked degraded)
    pub fn mode(&self) -> ResearchMode {
        self.meta.mode.unwrap_or(ResearchMode::Synthesized)
    }
}
