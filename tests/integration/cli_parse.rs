use clap::Parser;
use daq_appenv::tooling::cli::{Cli, Commands};

#[test]
fn env_takes_database_and_session() {
    let cli = Cli::try_parse_from(["daq-appenv", "env", "run.yaml", "run"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Env {
            database: "run.yaml".to_string(),
            session: "run".to_string(),
        }
    );
    assert!(cli.format.is_none());
    assert!(!cli.verbose);
}

#[test]
fn apps_accepts_table_flag() {
    let cli = Cli::try_parse_from(["daq-appenv", "apps", "run.yaml", "run", "--table"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Apps {
            database: "run.yaml".to_string(),
            session: "run".to_string(),
            table: true,
        }
    );
}

#[test]
fn parents_takes_component() {
    let cli =
        Cli::try_parse_from(["daq-appenv", "parents", "run.yaml", "run", "link-1"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Parents {
            database: "run.yaml".to_string(),
            session: "run".to_string(),
            component: "link-1".to_string(),
        }
    );
}

#[test]
fn resources_takes_application() {
    let cli = Cli::try_parse_from(["daq-appenv", "resources", "run.yaml", "ru-01"]).unwrap();
    assert_eq!(
        cli.command,
        Commands::Resources {
            database: "run.yaml".to_string(),
            application: "ru-01".to_string(),
        }
    );
}

#[test]
fn logging_flags_are_global() {
    let cli = Cli::try_parse_from([
        "daq-appenv",
        "--log-level",
        "debug",
        "--log-output",
        "file",
        "--log-file",
        "/tmp/daq.log",
        "env",
        "run.yaml",
        "run",
        "--enable",
        "link-1",
    ])
    .unwrap();
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert_eq!(cli.log_output.as_deref(), Some("file"));
    assert_eq!(
        cli.log_file.as_deref(),
        Some(std::path::Path::new("/tmp/daq.log"))
    );
    assert_eq!(cli.enable, vec!["link-1"]);
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["daq-appenv"]).is_err());
    assert!(Cli::try_parse_from(["daq-appenv", "resolve", "a", "b"]).is_err());
}
