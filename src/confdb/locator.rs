//! Database locators: `scheme:path`, where the scheme picks the file backend.

use crate::error::DaqEnvError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// File backend named by a locator scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Yaml,
    Json,
}

impl Backend {
    pub const ALL: [Backend; 2] = [Backend::Yaml, Backend::Json];

    pub fn scheme(&self) -> &'static str {
        match self {
            Backend::Yaml => "yamlconfig",
            Backend::Json => "jsonconfig",
        }
    }

    pub fn from_scheme(scheme: &str) -> Option<Backend> {
        Backend::ALL.into_iter().find(|b| b.scheme() == scheme)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLocator {
    pub backend: Backend,
    pub path: PathBuf,
}

impl DatabaseLocator {
    /// Combine a locator fragment with the configured scheme prefix.
    ///
    /// A fragment that already names a known scheme is used as given.
    pub fn with_scheme(scheme: &str, fragment: &str) -> Result<Self, DaqEnvError> {
        let already_prefixed = Backend::ALL
            .iter()
            .any(|b| fragment.starts_with(&format!("{}:", b.scheme())));
        if already_prefixed {
            fragment.parse()
        } else {
            format!("{}:{}", scheme, fragment).parse()
        }
    }
}

impl FromStr for DatabaseLocator {
    type Err = DaqEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, path) = s.split_once(':').ok_or_else(|| {
            DaqEnvError::InvalidLocator(format!("'{}' has no scheme (expected scheme:path)", s))
        })?;
        let backend = Backend::from_scheme(scheme).ok_or_else(|| {
            DaqEnvError::InvalidLocator(format!(
                "unknown scheme '{}' (supported: {})",
                scheme,
                Backend::ALL
                    .iter()
                    .map(|b| b.scheme())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })?;
        if path.trim().is_empty() {
            return Err(DaqEnvError::InvalidLocator(format!(
                "'{}' has an empty path",
                s
            )));
        }
        Ok(DatabaseLocator {
            backend,
            path: PathBuf::from(path),
        })
    }
}

impl fmt::Display for DatabaseLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.backend.scheme(), self.path.display())
    }
}
