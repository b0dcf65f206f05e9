//! CLI Common Utilities
//!
//! Shared initialization for command handlers.

use std::path::Path;

use crate::config::{Config, ConfigLoader, Secrets};
use crate::research::ResearchOrchestrator;
use crate::types::Result;

/// Command execution context
///
/// Resolved configuration plus provider keys from the environment.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
    pub secrets: Secrets,
}

impl CommandContext {
    /// Load configuration (optionally from an explicit file) and secrets
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Ok(Self {
            config: ConfigLoader::load(config_path)?,
            secrets: Secrets::from_env(),
        })
    }

    pub fn new(config: Config, secrets: Secrets) -> Self {
        Self { config, secrets }
    }

    /// Orchestrator wired from this context
    pub fn orchestrator(&self) -> Result<ResearchOrchestrator> {
        ResearchOrchestrator::from_config(&self.config, &self.secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builds_orchestrator_without_keys() {
        let ctx = CommandContext::new(Config::default(), Secrets::default());
        let orchestrator = ctx.orchestrator().unwrap();
        assert_eq!(orchestrator.provider_count(), 3);
    }
}
