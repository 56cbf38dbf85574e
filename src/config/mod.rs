//! Configuration
//!
//! Layered settings: built-in defaults, the global config file, an explicit
//! `--config` file, then `DAQ_APPENV__*` environment variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::DaqEnvError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaqEnvConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration database access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Scheme prepended to the locator fragment given on the command line
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

fn default_scheme() -> String {
    "yamlconfig".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report format: text, json
    #[serde(default = "default_output_format")]
    pub format: String,
    /// Style text reports when stdout is a terminal
    #[serde(default = "default_output_color")]
    pub color: bool,
}

fn default_output_color() -> bool {
    true
}

fn default_output_format() -> String {
    "text".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            color: default_output_color(),
        }
    }
}

/// Report format for command output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = DaqEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(DaqEnvError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DaqEnvConfig::default();
        assert_eq!(config.database.scheme, "yamlconfig");
        assert_eq!(config.output.format, "text");
        assert!(config.output.color);
        assert_eq!(config.logging.output, "stderr");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
