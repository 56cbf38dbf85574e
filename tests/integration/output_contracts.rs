use daq_appenv::error::DaqEnvError;
use daq_appenv::tooling::cli::Commands;
use tempfile::TempDir;

use crate::support::{context, write_db, RUN_DB};

fn env_command(path: &std::path::Path) -> Commands {
    Commands::Env {
        database: path.to_string_lossy().to_string(),
        session: "run".to_string(),
    }
}

#[test]
fn env_text_lists_children_before_own_applications() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("text").execute(&env_command(&path)).unwrap();
    assert_eq!(
        output,
        "Session environment={\"A\": \"1\", \"B\": \"2\"}\n\
         \n\
         Controller: rc-top, App: ru-01@DaqApplication\n\
         Application environment={\"A\": \"1\", \"B\": \"2\"}\n\
         \n\
         Controller: rc-top, App: df-01@Application\n\
         Application environment={\"A\": \"1\", \"B\": \"3\", \"C\": \"4\"}\n"
    );
}

#[test]
fn env_json_contract_has_required_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("json").execute(&env_command(&path)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["session"], "run");
    assert_eq!(parsed["session_environment"]["A"], "1");

    let apps = parsed["applications"].as_array().unwrap();
    assert_eq!(apps.len(), 2);
    assert_eq!(apps[1]["status"], "enabled");
    assert_eq!(apps[1]["controller"], "rc-top");
    assert_eq!(apps[1]["application"]["id"], "df-01");
    assert_eq!(apps[1]["application"]["class"], "Application");
    assert_eq!(apps[1]["environment"]["B"], "3");
}

#[test]
fn env_reports_user_disabled_application() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let ctx = context("text").with_overrides(&["df-01".to_string()], &[]);
    let output = ctx.execute(&env_command(&path)).unwrap();
    assert!(output.contains("Controller: rc-top, App: ru-01@DaqApplication\n"));
    assert!(output.ends_with("\nIgnoring disabled app df-01\n"));
}

#[test]
fn env_disabling_a_segment_skips_nested_applications() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let ctx = context("json").with_overrides(&["readout".to_string()], &[]);
    let output = ctx.execute(&env_command(&path)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let apps = parsed["applications"].as_array().unwrap();
    assert_eq!(apps[0]["status"], "disabled");
    assert_eq!(apps[0]["application"]["id"], "ru-01");
    assert_eq!(apps[1]["status"], "enabled");
}

#[test]
fn env_unknown_session_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let result = context("text").execute(&Commands::Env {
        database: path.to_string_lossy().to_string(),
        session: "other".to_string(),
    });
    match result {
        Err(DaqEnvError::NotFound { id, .. }) => assert_eq!(id, "other"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn env_with_explicit_json_scheme() {
    let dir = TempDir::new().unwrap();
    let path = write_db(
        &dir,
        "run.json",
        r#"{"objects": [
            {"class": "Session", "id": "run", "segments": ["top"]},
            {"class": "Segment", "id": "top", "applications": ["app"]},
            {"class": "Application", "id": "app"}
        ]}"#,
    );

    let output = context("text")
        .execute(&Commands::Env {
            database: format!("jsonconfig:{}", path.display()),
            session: "run".to_string(),
        })
        .unwrap();
    assert_eq!(
        output,
        "Session environment={}\n\nController: root-controller, App: app@Application\nApplication environment={}\n"
    );
}

#[test]
fn apps_lines_show_modules_and_disabled_state() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("text")
        .execute(&Commands::Apps {
            database: path.to_string_lossy().to_string(),
            session: "run".to_string(),
            table: false,
        })
        .unwrap();
    assert_eq!(
        output,
        "Application: df-01\nApplication: ru-01 Modules: link-0 link-1<disabled>\n"
    );
}

#[test]
fn apps_enable_override_clears_session_disable() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("json")
        .with_overrides(&[], &["link-1".to_string()])
        .execute(&Commands::Apps {
            database: path.to_string_lossy().to_string(),
            session: "run".to_string(),
            table: false,
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["total"], 2);
    assert_eq!(parsed["disabled_count"], 0);
    let modules = parsed["applications"][1]["modules"].as_array().unwrap();
    assert_eq!(modules[1]["id"], "link-1");
    assert_eq!(modules[1]["disabled"], false);
}

#[test]
fn parents_text_for_module() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("text")
        .execute(&Commands::Parents {
            database: path.to_string_lossy().to_string(),
            session: "run".to_string(),
            component: "link-1".to_string(),
        })
        .unwrap();
    assert_eq!(
        output,
        "Path 1: top@Segment / readout@Segment / ru-01@DaqApplication\n"
    );
}

#[test]
fn parents_json_for_unreachable_component_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("json")
        .execute(&Commands::Parents {
            database: path.to_string_lossy().to_string(),
            session: "run".to_string(),
            component: "rc-top".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["component"], "rc-top");
    assert!(parsed["paths"].as_array().unwrap().is_empty());
}

#[test]
fn apps_disabling_every_module_disables_the_daq_application() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("text")
        .with_overrides(&["link-0".to_string()], &[])
        .execute(&Commands::Apps {
            database: path.to_string_lossy().to_string(),
            session: "run".to_string(),
            table: false,
        })
        .unwrap();
    assert_eq!(output, "Application: df-01\nApplication: ru-01<disabled>\n");
}

#[test]
fn unknown_disable_id_fails_before_the_walk() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let result = context("text")
        .with_overrides(&["df-O1".to_string()], &[])
        .execute(&env_command(&path));
    match result {
        Err(DaqEnvError::NotFound { class, id }) => {
            assert_eq!(class, "Component");
            assert_eq!(id, "df-O1");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn resources_text_lists_host_resources() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let output = context("text")
        .execute(&Commands::Resources {
            database: path.to_string_lossy().to_string(),
            application: "ru-01".to_string(),
        })
        .unwrap();
    assert_eq!(
        output,
        "Host resources used by ru-01:\n  nic-0@HostResource\n  nic-1@HostResource\n"
    );
}

#[test]
fn resources_for_plain_application_is_wrong_class() {
    let dir = TempDir::new().unwrap();
    let path = write_db(&dir, "run.yaml", RUN_DB);

    let result = context("json").execute(&Commands::Resources {
        database: path.to_string_lossy().to_string(),
        application: "df-01".to_string(),
    });
    assert!(matches!(result, Err(DaqEnvError::WrongClass { .. })));
}
