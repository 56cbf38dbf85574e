//! Core types shared by the resolver, the walker, and the report formatters.

use std::collections::BTreeMap;

/// Environment dictionary: variable name -> value.
///
/// Keys stay sorted so reports render identically run to run.
pub type EnvMap = BTreeMap<String, String>;

/// Display identifier reported for applications with no enclosing controller
pub const ROOT_CONTROLLER: &str = "root-controller";
