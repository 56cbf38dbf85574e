//! Error types for configuration database access, resolution, and CLI plumbing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DaqEnvError {
    /// Semantic configuration problem (bad log directive, unknown format, ...)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to load settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration database {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid database locator: {0}")]
    InvalidLocator(String),

    #[error("Object not found: {id}@{class}")]
    NotFound { class: String, id: String },

    #[error("Object '{id}' is a {actual}, not a {expected}")]
    WrongClass {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("Duplicate object id in configuration database: {id}")]
    DuplicateObject { id: String },

    #[error("Invalid relationship '{relationship}' of object '{id}': {message}")]
    InvalidRelationship {
        id: String,
        relationship: String,
        message: String,
    },

    #[error("Reached maximum allowed recursion ({limit}) during calculation of {goal}; possibly there is a circular dependency between these objects: {objects}")]
    CircularDependency {
        limit: usize,
        goal: String,
        objects: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DaqEnvError {
    pub(crate) fn not_found(class: &str, id: &str) -> Self {
        DaqEnvError::NotFound {
            class: class.to_string(),
            id: id.to_string(),
        }
    }
}
