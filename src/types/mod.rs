pub mod error;
pub mod research;

pub use error::{CogniError, ErrorCategory, ErrorClassifier, LlmError, Result};
pub use research::{
    ConfidenceTier, ImageResult, ProviderId, ProviderResult, ProviderStatus, ResearchMode,
    ResearchReport, ResearchResponse, ResponseMeta, Section,
};

// =============================================================================
// Domain Newtypes
// =============================================================================

use std::fmt;
use std::sync::Arc;

/// Immutable research query shared by every concurrent task of one request
///
/// Cloning is cheap; each task gets its own handle and none can mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(Arc<str>);

impl Query {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
