//! Consensus synthesis
//!
//! Builds the report when at least one provider answered. The answer is the
//! content of the highest-priority successful provider; the other successes
//! only raise the confidence tier and appear in `sources`.

use chrono::{SecondsFormat, Utc};
use rand::Rng;

use crate::ai::ResponseFilter;
use crate::types::{ConfidenceTier, ProviderResult, ResearchReport, ResponseMeta, Section};

const HIGH_PHRASES: [&str; 4] = [
    "Verified Multi-Model Consensus",
    "Corroborated Expert View",
    "Cross-Validated Synthesis",
    "High-Confidence Consensus",
];

const MEDIUM_PHRASES: [&str; 4] = [
    "Established Interpretation",
    "Conceptually Accepted View",
    "Standard Industry Definition",
    "Commonly Understood Model",
];

const LOW_PHRASES: [&str; 4] = [
    "General Industry Understanding",
    "Derived from Standard References",
    "Informed Technical Explanation",
    "Commonly Accepted Interpretation",
];

impl ConfidenceTier {
    /// Confidence labels this tier may be reported with
    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Self::High => &HIGH_PHRASES,
            Self::Medium => &MEDIUM_PHRASES,
            Self::Low => &LOW_PHRASES,
        }
    }
}

// =============================================================================
// Phrase Selection
// =============================================================================

/// Chooses an index into a phrase pool
pub trait PhraseSource: Send + Sync {
    /// Index in `0..len`; `len` is never zero
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPhrase;

impl PhraseSource for RandomPhrase {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Always the same position, wrapped to the pool size
#[derive(Debug, Clone, Copy)]
pub struct FixedPhrase(pub usize);

impl PhraseSource for FixedPhrase {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

pub fn confidence_phrase(tier: ConfidenceTier, source: &dyn PhraseSource) -> &'static str {
    let pool = tier.phrases();
    pool[source.pick(pool.len()).min(pool.len() - 1)]
}

// =============================================================================
// Synthesis
// =============================================================================

/// Synthesized report and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAnswer {
    pub report: ResearchReport,
    pub meta: ResponseMeta,
    pub tier: ConfidenceTier,
}

/// Whether a result counts toward synthesis
///
/// A success only counts when its content also passes `filter`; providers
/// that report success with an empty or short answer are treated as failed.
pub fn qualifies(result: &ProviderResult, filter: &ResponseFilter) -> bool {
    result.is_success()
        && result
            .content()
            .is_some_and(|content| filter.check(content.trim()).is_ok())
}

/// Build a report from provider results
///
/// `results` must already be in provider priority order. Returns `None`
/// when none of them qualifies.
pub fn synthesize(
    query: &str,
    results: &[ProviderResult],
    filter: &ResponseFilter,
    phrases: &dyn PhraseSource,
) -> Option<SynthesizedAnswer> {
    let successes: Vec<&ProviderResult> =
        results.iter().filter(|r| qualifies(r, filter)).collect();
    let answer = successes.first()?.content()?.trim().to_string();

    let tier = ConfidenceTier::from_success_count(successes.len());
    let sources = successes
        .iter()
        .map(|r| r.display_name().to_string())
        .collect();

    Some(SynthesizedAnswer {
        report: ResearchReport {
            title: format!("Research: {}", query),
            confidence: confidence_phrase(tier, phrases).to_string(),
            sources,
            sections: vec![Section::new("💡", "Explanation", answer.as_str())],
            answer,
        },
        meta: ResponseMeta {
            provider_count: successes.len(),
            mode: None,
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        },
        tier,
    })
}
