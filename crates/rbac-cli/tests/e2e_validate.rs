//! E2E tests for `rbac validate`.

mod common;

use common::Workspace;
use predicates::str::contains;

const VALID: &str = r#"{
    "kind": "Dashboard",
    "metadata": {"name": "overview", "project": "payments"},
    "spec": {
        "variables": [
            {"kind": "ListVariable", "spec": {"name": "job"}},
            {"kind": "TextVariable", "spec": {"name": "env"}}
        ],
        "datasources": {
            "prom": {"default": true, "plugin": {"kind": "PrometheusDatasource", "spec": {}}}
        }
    }
}"#;

#[test]
fn valid_dashboard() {
    let ws = Workspace::new();
    let file = ws.write("dashboard.json", VALID);
    ws.cmd()
        .arg("validate")
        .arg(file)
        .assert()
        .success()
        .stdout(contains("valid"));
}

#[test]
fn does_not_need_grants() {
    // No --grants and no config: validate must still run.
    let ws = Workspace::new();
    let file = ws.write("dashboard.json", VALID);
    ws.cmd().arg("validate").arg(file).assert().success();
}

#[test]
fn digit_only_variable_rejected() {
    let ws = Workspace::new();
    let file = ws.write(
        "dashboard.json",
        r#"{"spec": {"variables": [{"kind": "TextVariable", "spec": {"name": "1"}}]}}"#,
    );
    ws.cmd()
        .arg("validate")
        .arg(file)
        .assert()
        .code(1)
        .stdout(contains("variable name '1' is not valid"));
}

#[test]
fn builtin_prefix_rejected() {
    let ws = Workspace::new();
    let file = ws.write(
        "dashboard.json",
        r#"{"spec": {"variables": [{"kind": "TextVariable", "spec": {"name": "__range"}}]}}"#,
    );
    ws.cmd()
        .arg("validate")
        .arg(file)
        .assert()
        .code(1)
        .stdout(contains("builtin variable prefix"));
}

#[test]
fn two_defaults_of_one_kind_rejected() {
    let ws = Workspace::new();
    let file = ws.write(
        "dashboard.json",
        r#"{"spec": {"datasources": {
            "a": {"default": true, "plugin": {"kind": "PrometheusDatasource"}},
            "b": {"default": true, "plugin": {"kind": "PrometheusDatasource"}}
        }}}"#,
    );
    ws.cmd()
        .arg("validate")
        .arg(file)
        .assert()
        .code(1)
        .stdout(contains("b can not be defined as default datasource"));
}

#[test]
fn malformed_document_is_invalid() {
    let ws = Workspace::new();
    let file = ws.write("dashboard.json", "{ not json");
    ws.cmd()
        .arg("validate")
        .arg(file)
        .assert()
        .code(1)
        .stdout(contains("invalid dashboard document"));
}

#[test]
fn missing_file_is_error() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["validate", "/nonexistent/dashboard.json"])
        .assert()
        .code(2)
        .stderr(contains("failed to read"));
}
