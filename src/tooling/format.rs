//! Format environment, application, and parent reports as text or JSON.

use crate::confdb::{Application, ObjectRef};
use crate::types::EnvMap;
use crate::walker::{AppEnvironmentReport, SessionEnvironmentReport};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Format a section heading with bold/underline when color is enabled.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Render an environment as `{"NAME": "value", ...}`.
pub fn format_env(env: &EnvMap) -> String {
    format!("{:?}", env)
}

/// Text report mirroring the walk: session defaults, then one block per
/// application in visit order.
pub fn format_session_report_text(report: &SessionEnvironmentReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Session environment={}\n",
        format_env(&report.session_environment)
    ));
    for app in &report.applications {
        out.push('\n');
        match app {
            AppEnvironmentReport::Enabled {
                controller,
                application,
                environment,
            } => {
                out.push_str(&format!("Controller: {}, App: {}\n", controller, application));
                out.push_str(&format!(
                    "Application environment={}\n",
                    format_env(environment)
                ));
            }
            AppEnvironmentReport::Disabled { application } => {
                out.push_str(&format!("Ignoring disabled app {}\n", application.id));
            }
        }
    }
    out
}

/// One row of the application listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppListEntry {
    pub application: ObjectRef,
    pub disabled: bool,
    /// Modules of an enabled DaqApplication with their disabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<ModuleEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleEntry {
    pub id: String,
    pub disabled: bool,
}

impl AppListEntry {
    pub fn new(app: &Application, disabled: bool) -> Self {
        Self {
            application: app.reference(),
            disabled,
            modules: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppListOutput {
    pub session: String,
    pub applications: Vec<AppListEntry>,
    pub total: usize,
    pub disabled_count: usize,
}

impl AppListOutput {
    pub fn new(session: String, applications: Vec<AppListEntry>) -> Self {
        let total = applications.len();
        let disabled_count = applications.iter().filter(|a| a.disabled).count();
        Self {
            session,
            applications,
            total,
            disabled_count,
        }
    }
}

/// `Application: <id>[<disabled>][ Modules: m1 m2<disabled>]` per line.
pub fn format_app_list_lines(output: &AppListOutput) -> String {
    let mut out = String::new();
    for entry in &output.applications {
        out.push_str(&format!("Application: {}", entry.application.id));
        if entry.disabled {
            out.push_str("<disabled>");
        } else if let Some(ref modules) = entry.modules {
            out.push_str(" Modules:");
            for module in modules {
                out.push(' ');
                out.push_str(&module.id);
                if module.disabled {
                    out.push_str("<disabled>");
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Application listing as a heading plus table.
pub fn format_app_list_table(output: &AppListOutput, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Applications in session {}", output.session), color)
    ));
    if output.applications.is_empty() {
        out.push_str("No applications.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Application", "Class", "Status", "Modules"]);
    for entry in &output.applications {
        let status = if entry.disabled { "disabled" } else { "enabled" };
        let modules = entry
            .modules
            .as_ref()
            .map(|mods| {
                mods.iter()
                    .map(|m| {
                        if m.disabled {
                            format!("{} (disabled)", m.id)
                        } else {
                            m.id.clone()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            entry.application.id.clone(),
            entry.application.class_name.clone(),
            status.to_string(),
            modules,
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Total: {} application(s), {} disabled\n",
        output.total, output.disabled_count
    ));
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct ParentsOutput {
    pub session: String,
    pub component: String,
    pub paths: Vec<Vec<ObjectRef>>,
}

pub fn format_parents_text(output: &ParentsOutput) -> String {
    if output.paths.is_empty() {
        return format!(
            "No path between session {} and component {}\n",
            output.session, output.component
        );
    }
    let mut out = String::new();
    for (i, path) in output.paths.iter().enumerate() {
        let rendered = if path.is_empty() {
            "(top level)".to_string()
        } else {
            path.iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(" / ")
        };
        out.push_str(&format!("Path {}: {}\n", i + 1, rendered));
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct HostResourcesOutput {
    pub application: String,
    pub resources: Vec<ObjectRef>,
}

pub fn format_host_resources_text(output: &HostResourcesOutput) -> String {
    if output.resources.is_empty() {
        return format!("No host resources used by {}\n", output.application);
    }
    let mut out = format!("Host resources used by {}:\n", output.application);
    for resource in &output.resources {
        out.push_str(&format!("  {}\n", resource));
    }
    out
}
