use daq_appenv::confdb::{
    ConfigDatabase, Configuration, DisabledComponents, ObjectRef,
};
use daq_appenv::error::DaqEnvError;
use daq_appenv::walker::{AppEnvironmentReport, SegmentWalker};
use tempfile::TempDir;

use crate::support::{write_db, RUN_DB};

fn open(dir: &TempDir, contents: &str) -> Configuration {
    let path = write_db(dir, "db.yaml", contents);
    Configuration::open(&format!("yamlconfig:{}", path.display())).unwrap()
}

#[test]
fn nested_segment_walk_uses_session_defaults() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir, RUN_DB);
    let session = db.session("run").unwrap();
    let oracle = DisabledComponents::new();
    let walker = SegmentWalker::new(&db, &oracle, &session);

    let readout = db.segment("readout").unwrap();
    let reports = walker
        .walk_segment(&readout, Some(&ObjectRef::new("rc-top", "RCApplication")))
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].application().id, "ru-01");
    match &reports[0] {
        AppEnvironmentReport::Enabled {
            controller,
            environment,
            ..
        } => {
            assert_eq!(controller, "rc-top");
            assert_eq!(environment.get("A").map(String::as_str), Some("1"));
            assert_eq!(environment.get("B").map(String::as_str), Some("2"));
        }
        other => panic!("expected enabled report, got {:?}", other),
    }
}

#[test]
fn top_level_segment_without_controller_reports_root_controller() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir, RUN_DB);
    let session = db.session("run").unwrap();
    let oracle = DisabledComponents::new();
    let walker = SegmentWalker::new(&db, &oracle, &session);

    let readout = db.segment("readout").unwrap();
    let reports = walker.walk_segment(&readout, None).unwrap();
    match &reports[0] {
        AppEnvironmentReport::Enabled { controller, .. } => {
            assert_eq!(controller, "root-controller")
        }
        other => panic!("expected enabled report, got {:?}", other),
    }
}

#[test]
fn segment_cycle_trips_the_fuse() {
    let dir = TempDir::new().unwrap();
    let db = open(
        &dir,
        r#"
objects:
  - class: Session
    id: run
    segments: [a]
  - class: Segment
    id: a
    segments: [b]
  - class: Segment
    id: b
    segments: [a]
"#,
    );
    let session = db.session("run").unwrap();
    let oracle = DisabledComponents::new();
    let walker = SegmentWalker::new(&db, &oracle, &session);
    assert!(matches!(
        walker.walk_session(),
        Err(DaqEnvError::CircularDependency { .. })
    ));
}

#[test]
fn dangling_application_reference_fails_the_walk() {
    let dir = TempDir::new().unwrap();
    let db = open(
        &dir,
        r#"
objects:
  - class: Session
    id: run
    segments: [top]
  - class: Segment
    id: top
    applications: [ghost]
"#,
    );
    let session = db.session("run").unwrap();
    let oracle = DisabledComponents::new();
    let walker = SegmentWalker::new(&db, &oracle, &session);
    assert!(matches!(
        walker.walk_session(),
        Err(DaqEnvError::NotFound { .. })
    ));
}

#[test]
fn controller_must_be_an_application() {
    let dir = TempDir::new().unwrap();
    let db = open(
        &dir,
        r#"
objects:
  - class: Session
    id: run
    segments: [top]
  - class: Segment
    id: top
    controller: knob
  - class: Variable
    id: knob
    name: K
    value: v
"#,
    );
    assert!(matches!(
        db.get_dal("Segment", "top"),
        Err(DaqEnvError::WrongClass { .. })
    ));
}
