//! Degradation chain
//!
//! Used when no provider produced a qualifying answer: knowledge base first,
//! structural heuristic otherwise. Always yields a complete report.

use tracing::info;

use super::heuristic::generate_meta_heuristic_answer;
use super::knowledge::KnowledgeLookup;
use crate::constants::fallback;
use crate::types::{ResearchMode, ResearchReport, ResponseMeta, Section};

/// Report and metadata for a degraded answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedAnswer {
    pub report: ResearchReport,
    pub meta: ResponseMeta,
}

impl DegradedAnswer {
    pub fn mode(&self) -> ResearchMode {
        self.meta.mode.unwrap_or(ResearchMode::HeuristicFallback)
    }
}

/// Answer from the knowledge base
pub fn offline_report(query: &str, answer: &str) -> DegradedAnswer {
    DegradedAnswer {
        report: ResearchReport {
            title: format!("Research: {}", query),
            answer: answer.to_string(),
            confidence: fallback::OFFLINE_CONFIDENCE.to_string(),
            sources: vec![fallback::OFFLINE_SOURCE.to_string()],
            sections: vec![Section::new("📚", "Definition", answer)],
        },
        meta: ResponseMeta {
            provider_count: 0,
            mode: Some(ResearchMode::OfflineFallback),
            timestamp: None,
        },
    }
}

/// Generated research framework
pub fn heuristic_report(query: &str) -> DegradedAnswer {
    let answer = generate_meta_heuristic_answer(query);
    DegradedAnswer {
        report: ResearchReport {
            title: format!("Framework: {}", query),
            confidence: fallback::HEURISTIC_CONFIDENCE.to_string(),
            sources: vec![fallback::HEURISTIC_SOURCE.to_string()],
            sections: vec![Section::new("🏗️", "Research Framework", answer.as_str())],
            answer,
        },
        meta: ResponseMeta {
            provider_count: 0,
            mode: Some(ResearchMode::HeuristicFallback),
            timestamp: None,
        },
    }
}

/// Run the chain for a query
pub fn degrade(query: &str, knowledge: &dyn KnowledgeLookup) -> DegradedAnswer {
    match knowledge.lookup(query) {
        Some(answer) => {
            info!("Answered from offline knowledge base");
            offline_report(query, answer)
        }
        None => {
            info!("No knowledge entry, using structural heuristic");
            heuristic_report(query)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::knowledge::StaticKnowledgeBase;

    struct EmptyKnowledge;

    impl KnowledgeLookup for EmptyKnowledge {
        fn lookup(&self, _query: &str) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_knowledge_hit_produces_offline_report() {
        let degraded = degrade("what is blockchain", &StaticKnowledgeBase);

        assert_eq!(degraded.mode(), ResearchMode::OfflineFallback);
        assert_eq!(degraded.report.title, "Research: what is blockchain");
        assert!(degraded.report.confidence.contains("Offline"));
        assert_eq!(degraded.report.sources, vec!["Internal Database"]);
        assert_eq!(degraded.report.sections.len(), 1);
        assert_eq!(degraded.report.sections[0].heading, "Definition");
        assert_eq!(degraded.report.sections[0].content, degraded.report.answer);
        assert_eq!(degraded.meta.provider_count, 0);
        assert!(degraded.meta.timestamp.is_none());
    }

    #[test]
    fn test_miss_produces_heuristic_report() {
        let degraded = degrade("What is Quantum Foo?", &EmptyKnowledge);

        assert_eq!(degraded.mode(), ResearchMode::HeuristicFallback);
        assert_eq!(degraded.report.title, "Framework: What is Quantum Foo?");
        assert_eq!(degraded.report.confidence, "Structural Heuristic (Offline Mode)");
        assert_eq!(degraded.report.sources, vec!["CogniFlow Logic Engine"]);
        assert_eq!(degraded.report.sections[0].icon, "🏗️");
        assert!(degraded.report.answer.contains("Quantum Foo"));
        assert_eq!(degraded.meta.provider_count, 0);
    }

    #[test]
    fn test_empty_query_answers_from_first_entry() {
        let degraded = degrade("", &StaticKnowledgeBase);
        assert_eq!(degraded.mode(), ResearchMode::OfflineFallback);
        assert!(degraded.report.answer.starts_with("Cybersecurity is the practice"));
    }
}
