use std::fs;
use std::path::PathBuf;

use daq_appenv::config::DaqEnvConfig;
use daq_appenv::tooling::cli::CliContext;
use tempfile::TempDir;

/// A two-level run: `top` (controlled by `rc-top`) holds `df-01` and the
/// nested `readout` segment, whose DaqApplication `ru-01` holds two links.
/// The session disables `link-1`. Each link runs on its own NIC.
pub const RUN_DB: &str = r#"
objects:
  - class: Session
    id: run
    environment: [v-a, common]
    segments: [top]
    disabled: [link-1]
  - class: Segment
    id: top
    controller: rc-top
    segments: [readout]
    applications: [df-01]
  - class: Segment
    id: readout
    applications: [ru-01]
  - class: RCApplication
    id: rc-top
  - class: Application
    id: df-01
    applicationEnvironment: [v-b3, v-c]
  - class: DaqApplication
    id: ru-01
    contains: [link-0, link-1]
  - class: DaqModule
    id: link-0
    used_resources: [nic-0]
  - class: DaqModule
    id: link-1
    used_resources: [nic-1]
  - class: HostResource
    id: nic-0
  - class: HostResource
    id: nic-1
  - class: Variable
    id: v-a
    name: A
    value: "1"
  - class: Variable
    id: v-b
    name: B
    value: "2"
  - class: VariableSet
    id: common
    contains: [v-b]
  - class: Variable
    id: v-b3
    name: B
    value: "3"
  - class: Variable
    id: v-c
    name: C
    value: "4"
"#;

/// Write `contents` into `name` under the temp dir and return the path.
pub fn write_db(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn context(format: &str) -> CliContext {
    let mut config = DaqEnvConfig::default();
    config.output.format = format.to_string();
    CliContext::new(config).unwrap()
}
