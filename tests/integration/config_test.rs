use crate::{library_queries, library_schema};
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .env_remove("GRAPHQL_COVERAGE_FORMAT")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("coverage.only_leafs: false <- default"))
        .stdout(predicate::str::contains("coverage.depth: 1 <- default"))
        .stdout(predicate::str::contains("report.csv_path: (none) <- default"));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".graphql-coverage.toml"),
        r#"
[defaults]
format = "json"

[coverage]
only_leafs = true
fail_under = 75.0
"#,
    )
    .unwrap();

    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(".graphql-coverage.toml"))
        .stdout(predicate::str::contains("defaults.format: json <- project config"))
        .stdout(predicate::str::contains("coverage.fail_under: 75 <- project config"));
}

#[test]
fn config_explain_section() {
    let tmp = tempfile::tempdir().unwrap();
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["config", "explain", "targeting", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Section: targeting"))
        .stdout(predicate::str::contains("targeting.extensions"));
}

#[test]
fn config_env_var_shown() {
    let tmp = tempfile::tempdir().unwrap();
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .env("GRAPHQL_COVERAGE_STRICT", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "coverage.strict: true <- env var (GRAPHQL_COVERAGE_STRICT)",
        ));
}

#[test]
fn invalid_project_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".graphql-coverage.toml"), "[coverage]\nbogus = 1\n").unwrap();

    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project config"));
}

#[test]
fn report_uses_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".graphql-coverage.toml"),
        "[defaults]\nformat = \"json\"\nquiet = true\n\n[coverage]\nonly_leafs = true\n",
    )
    .unwrap();

    let output = Command::cargo_bin("graphql-coverage")
        .unwrap()
        .current_dir(tmp.path())
        .arg("report")
        .arg(library_schema())
        .arg(library_queries())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metadata"]["only_leafs"], true);
    assert_eq!(json["summary"]["total_fields"], 24);
}

#[test]
fn cli_flag_beats_env_var() {
    let output = Command::cargo_bin("graphql-coverage")
        .unwrap()
        .arg("report")
        .arg(library_schema())
        .arg(library_queries())
        .args(["--format", "json", "--quiet", "--depth", "2"])
        .env("GRAPHQL_COVERAGE_DEPTH", "3")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["metadata"]["depth"], 2);
}
