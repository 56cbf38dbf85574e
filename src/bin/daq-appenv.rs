//! daq-appenv CLI Binary
//!
//! Prints the resolved environment of every application in a session.

use clap::Parser;
use daq_appenv::logging::init_logging;
use daq_appenv::tooling::cli::{Cli, CliContext};
use std::io::IsTerminal;
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let context = match CliContext::new(config) {
        Ok(ctx) => ctx
            .with_overrides(&cli.disable, &cli.enable)
            .with_color(std::io::stdout().is_terminal()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
