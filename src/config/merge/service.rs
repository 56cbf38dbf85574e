//! MergeService: orchestrates sources, applies merge policy, deserializes to DaqEnvConfig.

use crate::config::sources::{environment, global_file};
use crate::config::DaqEnvConfig;
use config::{ConfigError, File};
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<DaqEnvConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    /// The global file is skipped.
    pub fn load_from_file(path: &Path) -> Result<DaqEnvConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests in this module read the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[database]\nscheme = \"jsonconfig\"\n\n[logging]\nlevel = \"debug\"\n\n[logging.modules]\ndaq_appenv = \"trace\"\n",
        )
        .unwrap();

        let config = MergeService::load_from_file(&path).unwrap();
        assert_eq!(config.database.scheme, "jsonconfig");
        assert_eq!(config.output.format, "text");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.output, "stderr");
        assert_eq!(
            config.logging.modules.get("daq_appenv").map(String::as_str),
            Some("trace")
        );
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(MergeService::load_from_file(&path).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nformat = \"text\"\ncolor = true\n").unwrap();

        std::env::set_var("DAQ_APPENV__OUTPUT__FORMAT", "json");
        std::env::set_var("DAQ_APPENV__OUTPUT__COLOR", "false");
        let loaded = MergeService::load_from_file(&path);
        std::env::remove_var("DAQ_APPENV__OUTPUT__FORMAT");
        std::env::remove_var("DAQ_APPENV__OUTPUT__COLOR");

        let config = loaded.unwrap();
        assert_eq!(config.output.format, "json");
        assert!(!config.output.color);
        assert_eq!(config.database.scheme, "yamlconfig");
    }
}
