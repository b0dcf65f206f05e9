//! Model Fallback Chain
//!
//! Cascading model attempts within one provider.
//!
//! ## Strategy
//!
//! 1. Skip the provider entirely if it is disabled or has no credential
//! 2. Try each model in ascending priority order
//! 3. On error, classify and log it, then move to the next model
//! 4. On a response that fails the [`ResponseFilter`], log and move on
//! 5. Return the first qualifying response; never try further models
//! 6. If every model is exhausted, report failure
//!
//! Errors never leave the adapter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::{ModelBackend, ResearchProvider};
use crate::config::{ModelSpec, ProviderConfig};
use crate::constants::chain as chain_constants;
use crate::types::{ErrorClassifier, ProviderId, ProviderResult};

/// One step of a provider's fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAttempt {
    /// Upstream model identifier
    pub model: String,
    /// Display name reported when this model answers
    pub label: String,
    /// Lower = try first
    pub priority: u8,
}

impl ModelAttempt {
    pub fn new(model: impl Into<String>, label: impl Into<String>, priority: u8) -> Self {
        Self {
            model: model.into(),
            label: label.into(),
            priority,
        }
    }
}

/// Why a response was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort { chars: usize },
    ErrorPage,
}

/// Qualification rules for a model response
#[derive(Debug, Clone)]
pub struct ResponseFilter {
    min_chars: usize,
    reject_error_pages: bool,
}

impl Default for ResponseFilter {
    fn default() -> Self {
        Self::new(chain_constants::MIN_RESPONSE_CHARS)
    }
}

impl ResponseFilter {
    /// Responses must be strictly longer than `min_chars`
    pub fn new(min_chars: usize) -> Self {
        Self {
            min_chars,
            reject_error_pages: false,
        }
    }

    /// Also reject bodies that look like a raw HTML error page
    pub fn rejecting_error_pages(mut self) -> Self {
        self.reject_error_pages = true;
        self
    }

    pub fn check(&self, text: &str) -> Result<(), Rejection> {
        let chars = text.chars().count();
        if chars <= self.min_chars {
            return Err(Rejection::TooShort { chars });
        }
        if self.reject_error_pages
            && text
                .to_lowercase()
                .contains(chain_constants::ERROR_PAGE_MARKER)
        {
            return Err(Rejection::ErrorPage);
        }
        Ok(())
    }
}

/// Provider adapter: one backend plus an ordered model fallback chain
pub struct ProviderAdapter {
    id: ProviderId,
    backend: Arc<dyn ModelBackend>,
    attempts: Vec<ModelAttempt>,
    filter: ResponseFilter,
    timeout: Duration,
    enabled: bool,
}

impl ProviderAdapter {
    pub fn new(id: ProviderId, backend: Arc<dyn ModelBackend>) -> Self {
        Self {
            id,
            backend,
            attempts: Vec::new(),
            filter: ResponseFilter::default(),
            timeout: Duration::from_millis(crate::constants::timeout::GEMINI_MS),
            enabled: true,
        }
    }

    /// Build from configuration; models keep their configured order
    pub fn from_config(
        id: ProviderId,
        backend: Arc<dyn ModelBackend>,
        config: &ProviderConfig,
        filter: ResponseFilter,
    ) -> Self {
        let mut adapter = Self::new(id, backend)
            .with_filter(filter)
            .with_timeout(config.timeout());
        adapter.enabled = config.enabled;
        for spec in &config.models {
            adapter = adapter.with_model(spec);
        }
        adapter
    }

    /// Append a model at the next priority
    pub fn with_model(mut self, spec: &ModelSpec) -> Self {
        let label = spec
            .label
            .clone()
            .unwrap_or_else(|| self.backend.default_label(&spec.id));
        let priority = self.attempts.len() as u8;
        self.attempts
            .push(ModelAttempt::new(spec.id.clone(), label, priority));
        self
    }

    /// Add an attempt with explicit priority
    pub fn with_attempt(mut self, attempt: ModelAttempt) -> Self {
        self.attempts.push(attempt);
        self
    }

    pub fn with_filter(mut self, filter: ResponseFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Attempts in the order they will be tried
    pub fn ordered_attempts(&self) -> Vec<&ModelAttempt> {
        let mut ordered: Vec<&ModelAttempt> = self.attempts.iter().collect();
        // Stable: equal priorities keep insertion order
        ordered.sort_by_key(|attempt| attempt.priority);
        ordered
    }

    /// Walk the fallback chain
    #[instrument(skip(self, query), fields(provider = %self.id, models = self.attempts.len()))]
    pub async fn run_chain(&self, query: &str) -> ProviderResult {
        if !self.enabled {
            debug!("Provider disabled");
            return ProviderResult::failure(self.id);
        }
        if !self.backend.is_configured() {
            warn!(
                env_var = self.id.key_env_var(),
                "No API key configured, skipping provider"
            );
            return ProviderResult::failure(self.id);
        }

        let start = Instant::now();

        for attempt in self.ordered_attempts() {
            debug!(model = %attempt.model, priority = attempt.priority, "Chain attempt");

            match self.backend.complete(&attempt.model, query).await {
                Ok(text) => {
                    let text = text.trim();
                    match self.filter.check(text) {
                        Ok(()) => {
                            info!(
                                model = %attempt.model,
                                elapsed_ms = start.elapsed().as_millis() as u64,
                                "Chain succeeded"
                            );
                            return ProviderResult::success(self.id, &attempt.label, text);
                        }
                        Err(rejection) => {
                            warn!(model = %attempt.model, ?rejection, "Response rejected");
                        }
                    }
                }
                Err(err) => {
                    let classified = ErrorClassifier::classify_error(&err, self.backend.name());
                    warn!(
                        model = %attempt.model,
                        category = %classified.category,
                        error = %err,
                        "Model failed"
                    );
                }
            }
        }

        warn!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "All models in chain failed"
        );
        ProviderResult::failure(self.id)
    }
}

#[async_trait]
impl ResearchProvider for ProviderAdapter {
    async fn invoke(&self, query: &str) -> ProviderResult {
        self.run_chain(query).await
    }

    fn id(&self) -> ProviderId {
        self.id
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
