//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Provider fallback chain constants
pub mod chain {
    /// Responses must be strictly longer than this (in characters) to qualify
    pub const MIN_RESPONSE_CHARS: usize = 20;

    /// Markup fragment that marks an upstream error page instead of an answer
    pub const ERROR_PAGE_MARKER: &str = "<html";

    /// Token cap passed to text-generation backends that need one
    pub const MAX_NEW_TOKENS: u32 = 1000;
}

/// Per-operation deadlines (milliseconds)
pub mod timeout {
    pub const GEMINI_MS: u64 = 6_000;
    pub const OPENROUTER_MS: u64 = 8_000;
    pub const HUGGINGFACE_MS: u64 = 6_000;

    /// Enrichment is non-critical and gets the shortest deadline
    pub const ENRICHMENT_MS: u64 = 2_000;
}

/// Image enrichment constants
pub mod enrichment {
    /// Search terms shorter than this (after filler stripping) skip the network call
    pub const MIN_TERM_CHARS: usize = 3;

    /// Maximum number of images requested from the media index
    pub const RESULT_LIMIT: u32 = 3;

    /// Attribution attached to every image from Wikimedia Commons
    pub const WIKIMEDIA_SOURCE: &str = "Wikimedia Commons";
}

/// Degraded-mode labels surfaced to the caller
pub mod fallback {
    pub const OFFLINE_CONFIDENCE: &str = "Verified Knowledge Base (Offline Mode)";
    pub const OFFLINE_SOURCE: &str = "Internal Database";

    pub const HEURISTIC_CONFIDENCE: &str = "Structural Heuristic (Offline Mode)";
    pub const HEURISTIC_SOURCE: &str = "CogniFlow Logic Engine";
}

/// HTTP/Network constants
pub mod network {
    /// Default bind address for the research server
    pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

    /// Connection timeout for outbound clients (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 5;

    /// User agent sent to public APIs (Wikimedia requires one)
    pub const USER_AGENT: &str = concat!("cogniflow/", env!("CARGO_PKG_VERSION"));
}
