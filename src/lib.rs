//! CogniFlow - Multi-Provider Research Orchestrator
//!
//! Answers a free-text query by racing several AI text providers and an
//! image search in parallel, then returning a single report whose
//! confidence label reflects how many providers agreed to answer.
//!
//! ## Core Features
//!
//! - **Deadline Racing**: Every upstream call is time-boxed; late calls are
//!   abandoned, never awaited
//! - **Fallback Chains**: Each provider walks its own ordered list of models
//! - **Confidence Tiers**: Label derived from the success count
//! - **Graceful Degradation**: Knowledge base, then structural heuristic;
//!   some answer is always returned
//! - **Safe Enrichment**: Wikimedia images screened by a banned-term filter
//!
//! ## Quick Start
//!
//! ```ignore
//! use cogniflow::{Config, ResearchOrchestrator, Secrets};
//!
//! let orchestrator = ResearchOrchestrator::from_config(&Config::default(), &Secrets::from_env())?;
//! let response = orchestrator.research("what is photosynthesis").await;
//! println!("{}", response.research.answer);
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: Provider backends, fallback chains, deadline racing
//! - [`enrichment`]: Image search and safety filtering
//! - [`research`]: Orchestration, synthesis and degradation
//! - [`server`]: axum HTTP surface
//! - [`config`]: Layered configuration and secrets

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod enrichment;
pub mod research;
pub mod server;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, Secrets};

// Error Types
pub use types::error::{CogniError, ErrorCategory, Result};

// Data Model
pub use types::{
    ConfidenceTier, ImageResult, ProviderId, ProviderResult, ProviderStatus, Query, ResearchMode,
    ResearchReport, ResearchResponse, ResponseMeta, Section,
};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use research::{ResearchOrchestrator, ResearchOrchestratorBuilder};

// =============================================================================
// AI Re-exports
// =============================================================================

pub use ai::{ResearchProvider, SharedProvider, TimeoutGuard};

// =============================================================================
// Enrichment Re-exports
// =============================================================================

pub use enrichment::{ImageSource, filter_safe};
