//! Config composition: defaults and precedence of sources.

pub mod merge_policy;
pub mod service;
