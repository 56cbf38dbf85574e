//! CLI Tooling
//!
//! Command-line interface: resolve application environments, list a session's
//! applications, and show the segment paths enclosing a component.

use crate::confdb::{
    all_applications, component_parents, used_host_resources, ConfigDatabase, Configuration,
    DatabaseLocator, DisabledComponents, DisablementOracle, Session,
};
use crate::config::{ConfigLoader, DaqEnvConfig, OutputFormat};
use crate::error::DaqEnvError;
use crate::tooling::format::{
    format_app_list_lines, format_app_list_table, format_host_resources_text,
    format_parents_text, format_session_report_text, AppListEntry, AppListOutput,
    HostResourcesOutput, ModuleEntry, ParentsOutput,
};
use crate::walker::SegmentWalker;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

/// Resolve runtime environments of applications in a DAQ configuration database
#[derive(Parser, Debug)]
#[command(name = "daq-appenv")]
#[command(about = "Resolve per-application runtime environments from a DAQ configuration database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json); defaults to the configured format
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Disable a component for this run (repeatable)
    #[arg(long = "disable", value_name = "ID", global = true)]
    pub disable: Vec<String>,

    /// Enable a component the session disables (repeatable)
    #[arg(long = "enable", value_name = "ID", global = true)]
    pub enable: Vec<String>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the session environment and the merged environment of every application
    Env {
        /// Database locator fragment (prefixed with the configured scheme)
        database: String,
        /// Session object id
        session: String,
    },
    /// List all applications of a session with their disabled state
    Apps {
        database: String,
        session: String,
        /// Render as a table instead of one line per application
        #[arg(long)]
        table: bool,
    },
    /// Show the segment paths from the session down to a component
    Parents {
        database: String,
        session: String,
        /// Component object id (segment, application, module, or resource)
        component: String,
    },
    /// List the host resources used by the modules of a DaqApplication
    Resources {
        database: String,
        /// DaqApplication object id
        application: String,
    },
}

impl Cli {
    /// Load configuration for this invocation and fold CLI logging flags into it.
    pub fn load_config(&self) -> Result<DaqEnvConfig, DaqEnvError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        config.logging.apply_cli_overrides(
            self.verbose,
            self.log_level.as_deref(),
            self.log_format.as_deref(),
            self.log_output.as_deref(),
            self.log_file.clone(),
        );
        if let Some(format) = &self.format {
            config.output.format = format.clone();
        }
        Ok(config)
    }
}

/// CLI context: loaded settings plus per-run disablement overrides
pub struct CliContext {
    config: DaqEnvConfig,
    format: OutputFormat,
    oracle: DisabledComponents,
    color: bool,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(config: DaqEnvConfig) -> Result<Self, DaqEnvError> {
        let format = config.output.format.parse::<OutputFormat>()?;
        Ok(Self {
            config,
            format,
            oracle: DisabledComponents::new(),
            color: false,
        })
    }

    /// Components to disable or force-enable for this run.
    pub fn with_overrides(mut self, disable: &[String], enable: &[String]) -> Self {
        self.oracle.set_disabled(disable.iter().cloned());
        self.oracle.set_enabled(enable.iter().cloned());
        debug!(
            disabled = ?self.oracle.user_disabled(),
            enabled = ?self.oracle.user_enabled(),
            "Per-run component overrides"
        );
        self
    }

    /// Allow ANSI styling in text output (e.g. when stdout is a terminal).
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color && self.config.output.color;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Open the database named by a locator fragment.
    pub fn open_database(&self, fragment: &str) -> Result<Configuration, DaqEnvError> {
        let locator = DatabaseLocator::with_scheme(&self.config.database.scheme, fragment)?;
        Configuration::from_locator(locator)
    }

    /// Open the database and look up the session, rejecting per-run
    /// overrides that name no component.
    fn open_session(
        &self,
        fragment: &str,
        session_id: &str,
    ) -> Result<(Configuration, Session), DaqEnvError> {
        let db = self.open_database(fragment)?;
        let session = db.session(session_id)?;
        for id in self
            .oracle
            .user_disabled()
            .iter()
            .chain(self.oracle.user_enabled())
        {
            db.get_dal("Component", id)?;
        }
        Ok((db, session))
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, DaqEnvError> {
        match command {
            Commands::Env { database, session } => self.handle_env(database, session),
            Commands::Apps {
                database,
                session,
                table,
            } => self.handle_apps(database, session, *table),
            Commands::Parents {
                database,
                session,
                component,
            } => self.handle_parents(database, session, component),
            Commands::Resources {
                database,
                application,
            } => self.handle_resources(database, application),
        }
    }

    fn handle_env(&self, database: &str, session_id: &str) -> Result<String, DaqEnvError> {
        let (db, session) = self.open_session(database, session_id)?;
        let walker = SegmentWalker::new(&db, &self.oracle, &session);
        let report = walker.walk_session()?;
        info!(
            session = %report.session,
            applications = report.applications.len(),
            "Walked session"
        );
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => Ok(format_session_report_text(&report)),
        }
    }

    fn handle_apps(
        &self,
        database: &str,
        session_id: &str,
        table: bool,
    ) -> Result<String, DaqEnvError> {
        let (db, session) = self.open_session(database, session_id)?;

        let mut entries = Vec::new();
        for app in all_applications(&db, &session)? {
            let disabled = self.oracle.component_disabled(&db, &session.id, &app.id)?;
            let mut entry = AppListEntry::new(&app, disabled);
            if !disabled && app.is_daq_application() {
                let modules = app
                    .contains
                    .iter()
                    .map(|module| {
                        Ok::<_, DaqEnvError>(ModuleEntry {
                            id: module.id.clone(),
                            disabled: self
                                .oracle
                                .component_disabled(&db, &session.id, &module.id)?,
                        })
                    })
                    .collect::<Result<Vec<_>, DaqEnvError>>()?;
                entry.modules = Some(modules);
            }
            entries.push(entry);
        }
        let output = AppListOutput::new(session.id.clone(), entries);

        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
            OutputFormat::Text if table => Ok(format_app_list_table(&output, self.color)),
            OutputFormat::Text => Ok(format_app_list_lines(&output)),
        }
    }

    fn handle_parents(
        &self,
        database: &str,
        session_id: &str,
        component: &str,
    ) -> Result<String, DaqEnvError> {
        let db = self.open_database(database)?;
        let session = db.session(session_id)?;
        let output = ParentsOutput {
            session: session.id.clone(),
            component: component.to_string(),
            paths: component_parents(&db, &session, component)?,
        };
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => Ok(format_parents_text(&output)),
        }
    }

    fn handle_resources(&self, database: &str, application: &str) -> Result<String, DaqEnvError> {
        let db = self.open_database(database)?;
        let output = HostResourcesOutput {
            application: application.to_string(),
            resources: used_host_resources(&db, application)?,
        };
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
            OutputFormat::Text => Ok(format_host_resources_text(&output)),
        }
    }
}
