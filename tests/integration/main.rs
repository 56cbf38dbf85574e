//! Integration tests for daq-appenv

mod cli_parse;
mod merge_properties;
mod output_contracts;
mod support;
mod walker_behavior;
