//! Smoke tests for the `stepscan` binary.

#![expect(clippy::expect_used, reason = "tests require explicit panic messages")]

use std::str;

use assert_cmd::Command;
use stepscan::test_support::{TestWorkspace, WorkspaceBuilder};

fn cats_workspace() -> TestWorkspace {
    WorkspaceBuilder::new()
        .with_settings(
            r#"{
  "cucumberautocomplete.steps": ["steps/*.js", "missing/*.js"],
  "cucumberautocomplete.syncfeatures": "features/*.feature"
}"#,
        )
        .with_file(
            "steps/cats.js",
            "Given('I have {int} cats', fn);\nThen('they purr', fn);",
        )
        .with_file(
            "features/cats.feature",
            "Feature: cats\n  Scenario: s\n    Given I have 2 cats\n    Then they hiss\n",
        )
        .build()
}

fn stepscan(ws: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("stepscan").expect("binary exists");
    cmd.arg("--root").arg(ws.dir.path()).arg("--log-level").arg("error");
    cmd
}

#[test]
fn lists_steps_as_json() {
    let ws = cats_workspace();
    let output = stepscan(&ws).args(["steps", "--json"]).output().expect("runs");
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let steps = parsed.as_array().expect("array");
    assert_eq!(steps.len(), 2);
    let first = steps.first().expect("first step");
    assert_eq!(first.get("text").and_then(|v| v.as_str()), Some("I have {int} cats"));
    assert_eq!(first.get("usage_count").and_then(serde_json::Value::as_u64), Some(1));
}

#[test]
fn check_reports_unmatched_steps_and_fails() {
    let ws = cats_workspace();
    let output = stepscan(&ws).arg("check").output().expect("runs");
    assert_eq!(output.status.code(), Some(1));
    let stdout = str::from_utf8(&output.stdout).expect("utf8");
    assert!(stdout.contains("cats.feature:4:10: warning: Was unable to find step for \"Then they hiss\""));
    assert!(stdout.contains("No steps files found"));
}

#[test]
fn check_passes_for_matching_files() {
    let ws = cats_workspace();
    let clean = ws.path("features/clean.feature");
    std::fs::write(&clean, "Feature: ok\n  Scenario: s\n    Then they purr\n").expect("write");
    stepscan(&ws).arg("check").arg(&clean).assert().success();
}

#[test]
fn prints_definition_location() {
    let ws = cats_workspace();
    let output = stepscan(&ws)
        .arg("definition")
        .arg(ws.path("features/cats.feature"))
        .arg("3")
        .output()
        .expect("runs");
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).expect("utf8");
    assert!(stdout.trim_end().ends_with("cats.js:1:8"));
}

#[test]
fn completes_partial_lines() {
    let ws = cats_workspace();
    let feature = ws.path("features/partial.feature");
    std::fs::write(&feature, "Feature: p\n  Scenario: s\n    Given I ha\n").expect("write");
    let output = stepscan(&ws)
        .arg("complete")
        .arg(&feature)
        .arg("3")
        .output()
        .expect("runs");
    assert!(output.status.success());
    let stdout = str::from_utf8(&output.stdout).expect("utf8");
    assert!(stdout.contains("I have {int} cats\thave {int} cats"));
}

#[test]
fn invalid_settings_exit_with_configuration_status() {
    let ws = WorkspaceBuilder::new().build();
    let settings = ws.path("broken.json");
    std::fs::write(&settings, "{ not json").expect("write");
    stepscan(&ws)
        .arg("--settings")
        .arg(&settings)
        .arg("steps")
        .assert()
        .code(2);
}
