//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/cogniflow/config.toml)
//! 3. Project config (.cogniflow/config.toml) or `--config`
//! 4. Environment variables (COGNIFLOW_*)
//!
//! Provider API keys are resolved separately into [`Secrets`].

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
