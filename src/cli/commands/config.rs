//! Config Command
//!
//! Inspect CogniFlow configuration.
//!
//! Usage:
//!   cogniflow config show [-f toml|json]
//!   cogniflow config path

use crate::config::{Config, ConfigLoader};
use crate::types::{CogniError, Result};

/// Render the effective configuration
///
/// Secrets live outside `Config`, so nothing here can leak a key.
pub fn render(config: &Config, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(config)?),
        "toml" => toml::to_string_pretty(config)
            .map_err(|e| CogniError::Config(format!("Failed to render TOML: {}", e))),
        other => Err(CogniError::Config(format!(
            "Invalid format '{}'. Valid values: toml, json",
            other
        ))),
    }
}

/// Show merged effective configuration
pub fn show(config: &Config, format: &str) -> Result<()> {
    println!("{}", render(config, format)?);
    Ok(())
}

/// Show configuration file paths
pub fn path() -> Result<()> {
    let marker = |exists: bool| if exists { "✓" } else { "✗" };

    match ConfigLoader::global_config_path() {
        Some(global) => println!("Global:  {} {}", marker(global.exists()), global.display()),
        None => println!("Global:  (cannot determine config directory)"),
    }

    let project = ConfigLoader::project_config_path();
    println!("Project: {} {}", marker(project.exists()), project.display());
    println!("Env:     COGNIFLOW_<SECTION>__<KEY> (e.g. COGNIFLOW_SERVER__BIND)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml_and_json() {
        let config = Config::default();

        let toml_out = render(&config, "toml").unwrap();
        assert!(toml_out.contains("[server]"));
        assert!(toml_out.contains("gemini-1.5-flash"));

        let json_out = render(&config, "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json_out).unwrap();
        assert_eq!(value["enrichment"]["timeout_ms"], 2000);
    }

    #[test]
    fn test_render_rejects_unknown_format() {
        assert!(render(&Config::default(), "yaml").is_err());
    }
}
