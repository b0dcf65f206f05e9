//! AI Integration Layer
//!
//! Provider backends, fallback chains and deadline racing.

pub mod provider;
pub mod timeout;

pub use provider::{
    GeminiBackend, HuggingFaceBackend, ModelAttempt, ModelBackend, OpenRouterBackend,
    ProviderAdapter, ResearchProvider, ResponseFilter, SharedProvider, build_providers,
};
pub use timeout::{TimeoutGuard, race};
