//! XDG Base Directory utilities for locating configuration.

use crate::error::DaqEnvError;
use std::path::PathBuf;

/// Application directory name under XDG roots.
pub const APP_DIR: &str = "daq-appenv";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, DaqEnvError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        DaqEnvError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Get the global config file path
///
/// Returns `$XDG_CONFIG_HOME/daq-appenv/config.toml`. The file may not exist.
pub fn global_config_path() -> Result<PathBuf, DaqEnvError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}
