//! Tooling Layer
//!
//! Command-line surface and report formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
