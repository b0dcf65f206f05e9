//! Research Core
//!
//! Turns settled provider results into a single report.
//!
//! ## Modules
//!
//! - `orchestrator`: Concurrent fan-out, join and routing per request
//! - `consensus`: Report from one or more successful providers
//! - `degradation`: Knowledge base, then heuristic, when none succeeded
//! - `knowledge`: Curated offline definitions
//! - `heuristic`: Generated research outline

pub mod consensus;
pub mod degradation;
pub mod heuristic;
pub mod knowledge;
mod orchestrator;

pub use consensus::{FixedPhrase, PhraseSource, RandomPhrase, SynthesizedAnswer, synthesize};
pub use degradation::{DegradedAnswer, degrade};
pub use heuristic::generate_meta_heuristic_answer;
pub use knowledge::{KnowledgeLookup, StaticKnowledgeBase, search_local_knowledge};
pub use orchestrator::{ResearchOrchestrator, ResearchOrchestratorBuilder};
