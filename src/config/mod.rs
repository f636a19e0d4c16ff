//! Application configuration - database, HTTP listener, and calculator presets.
//!
//! Secrets and deployment settings come from the environment (optionally via `.env`);
//! calculator presets come from config.toml.

/// Database configuration and connection management
pub mod database;

/// Calculator preset loading from config.toml
pub mod presets;

/// HTTP listener settings from environment variables
pub mod server;

use crate::errors::{Error, Result};
use presets::CalculatorPresets;
use serde::Deserialize;
use server::ServerConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file used when `CORPUS_BUDDY_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Contents of config.toml. Every table is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub presets: CalculatorPresets,
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub presets: CalculatorPresets,
    pub server: ServerConfig,
}

/// Path of the config file, from `CORPUS_BUDDY_CONFIG` or the default.
#[must_use]
pub fn config_path() -> PathBuf {
    std::env::var("CORPUS_BUDDY_CONFIG").map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Parses config.toml contents.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is malformed or a preset is out of bounds.
pub fn parse_config(contents: &str) -> Result<FileConfig> {
    let config: FileConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.presets.validate()?;
    Ok(config)
}

/// Loads config.toml from `path`. A missing file yields the built-in defaults.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);

    if !path.exists() {
        info!("No config file at {:?}; using built-in presets.", path);
        return Ok(FileConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads the config file and environment settings.
///
/// # Errors
/// Returns [`Error::Config`] if the config file or `BIND_ADDRESS` is invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    let file = load_config(config_path())?;
    let server = ServerConfig::from_env()?;
    Ok(AppConfig {
        presets: file.presets,
        server,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_config_with_presets() {
        let toml_str = r#"
            [presets.lumpsum]
            investment = 250000
            durationYears = 20
            expectedReturn = 10

            [presets.sip-stepup]
            monthlyInvestment = 15000
            durationYears = 20
            expectedReturn = 12
            annualIncrease = 5
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.presets.lump_sum.investment, 250_000.0);
        assert_eq!(config.presets.step_up.annual_increase, 5.0);
        assert_eq!(config.presets.sip, CalculatorPresets::default().sip);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.presets, CalculatorPresets::default());
    }

    #[test]
    fn test_invalid_preset_is_rejected() {
        let toml_str = r"
            [presets.sip]
            monthlyInvestment = 100
            durationYears = 10
            expectedReturn = 12
        ";
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.presets, CalculatorPresets::default());
    }
}
