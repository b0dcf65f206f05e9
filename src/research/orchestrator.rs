//! Request Orchestrator
//!
//! One research request end to end:
//!
//! 1. Launch every provider and the image source concurrently, each raced
//!    against its own deadline under a request-scoped [`TimeoutGuard`]
//! 2. Wait for all of them to settle
//! 3. Put provider results in priority order and screen the images
//! 4. Synthesize from the qualifying successes, or degrade when there are
//!    none; degraded answers carry no images

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use super::consensus::{PhraseSource, RandomPhrase, synthesize};
use super::degradation::degrade;
use super::knowledge::{KnowledgeLookup, StaticKnowledgeBase};
use crate::ai::{ResponseFilter, SharedProvider, TimeoutGuard, build_providers};
use crate::config::{Config, Secrets};
use crate::constants::timeout as timeout_constants;
use crate::enrichment::{NoImages, SharedImageSource, build_image_source, filter_safe};
use crate::types::{ImageResult, ProviderResult, Query, ResearchResponse, Result};

pub struct ResearchOrchestrator {
    providers: Vec<SharedProvider>,
    images: SharedImageSource,
    enrichment_timeout: Duration,
    response_filter: ResponseFilter,
    knowledge: Arc<dyn KnowledgeLookup>,
    phrases: Arc<dyn PhraseSource>,
}

impl std::fmt::Debug for ResearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResearchOrchestrator")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.id()).collect::<Vec<_>>(),
            )
            .field("enrichment_timeout", &self.enrichment_timeout)
            .finish()
    }
}

impl ResearchOrchestrator {
    pub fn builder() -> ResearchOrchestratorBuilder {
        ResearchOrchestratorBuilder::new()
    }

    /// Wire the HTTP providers and image source described by `config`
    pub fn from_config(config: &Config, secrets: &Secrets) -> Result<Self> {
        let mut builder = Self::builder()
            .with_images(build_image_source(&config.enrichment)?)
            .with_enrichment_timeout(config.enrichment.timeout())
            .with_response_filter(ResponseFilter::new(config.chain.min_response_chars));
        for provider in build_providers(config, secrets)? {
            builder = builder.add_provider(provider);
        }
        Ok(builder.build())
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Answer a query; never fails
    pub async fn research(&self, query: impl Into<Query>) -> ResearchResponse {
        let query = query.into();
        let request_id = Uuid::new_v4();
        let span = info_span!("research", %request_id, query = %query);
        self.run(query).instrument(span).await
    }

    async fn run(&self, query: Query) -> ResearchResponse {
        let start = Instant::now();
        let guard = TimeoutGuard::new();

        let provider_calls = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let id = provider.id();
            let deadline = provider.timeout();
            let query = query.clone();
            guard.race(
                async move { provider.invoke(query.as_str()).await },
                deadline,
                ProviderResult::timeout(id),
            )
        });

        let images = Arc::clone(&self.images);
        let image_query = query.clone();
        let image_call = guard.race(
            async move { images.fetch_images(image_query.as_str()).await },
            self.enrichment_timeout,
            Vec::<ImageResult>::new(),
        );

        let (mut results, raw_images) = tokio::join!(join_all(provider_calls), image_call);
        drop(guard);

        results.sort_by_key(ProviderResult::provider);
        for result in &results {
            info!(
                provider = %result.provider(),
                status = ?result.status(),
                source = result.display_name(),
                "Provider settled"
            );
        }

        let images = filter_safe(&raw_images);
        debug!(
            fetched = raw_images.len(),
            kept = images.len(),
            "Images screened"
        );

        let synthesized = synthesize(
            query.as_str(),
            &results,
            &self.response_filter,
            self.phrases.as_ref(),
        );
        let response = match synthesized {
            Some(answer) => {
                info!(tier = %answer.tier, successes = answer.meta.provider_count, "Synthesized answer");
                ResearchResponse {
                    research: answer.report,
                    images,
                    meta: answer.meta,
                }
            }
            None => {
                let degraded = degrade(query.as_str(), self.knowledge.as_ref());
                ResearchResponse {
                    research: degraded.report,
                    images: Vec::new(),
                    meta: degraded.meta,
                }
            }
        };

        info!(
            mode = ?response.mode(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Research complete"
        );
        response
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`ResearchOrchestrator`]
pub struct ResearchOrchestratorBuilder {
    providers: Vec<SharedProvider>,
    images: SharedImageSource,
    enrichment_timeout: Duration,
    response_filter: ResponseFilter,
    knowledge: Arc<dyn KnowledgeLookup>,
    phrases: Arc<dyn PhraseSource>,
}

impl ResearchOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            images: Arc::new(NoImages),
            enrichment_timeout: Duration::from_millis(timeout_constants::ENRICHMENT_MS),
            response_filter: ResponseFilter::default(),
            knowledge: Arc::new(StaticKnowledgeBase),
            phrases: Arc::new(RandomPhrase),
        }
    }

    /// Add a provider; results are ordered by provider id, not insertion
    pub fn add_provider(mut self, provider: SharedProvider) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn with_images(mut self, images: SharedImageSource) -> Self {
        self.images = images;
        self
    }

    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    /// Qualification applied to every reported success before synthesis
    pub fn with_response_filter(mut self, filter: ResponseFilter) -> Self {
        self.response_filter = filter;
        self
    }

    pub fn with_knowledge(mut self, knowledge: Arc<dyn KnowledgeLookup>) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_phrases(mut self, phrases: Arc<dyn PhraseSource>) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn build(self) -> ResearchOrchestrator {
        ResearchOrchestrator {
            providers: self.providers,
            images: self.images,
            enrichment_timeout: self.enrichment_timeout,
            response_filter: self.response_filter,
            knowledge: self.knowledge,
            phrases: self.phrases,
        }
    }
}

impl Default for ResearchOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
