//! DAQ App Environment: per-application runtime environments from a
//! configuration database.
//!
//! Walks a run-control session's segment tree, merges session defaults with
//! each application's own parameters, and reports the responsible controller
//! for every enabled application.

pub mod confdb;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod tooling;
pub mod types;
pub mod walker;
