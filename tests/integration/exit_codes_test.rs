use crate::{library_queries, library_schema};
use assert_cmd::Command;
use predicates::prelude::*;

fn report() -> Command {
    let mut cmd = Command::cargo_bin("graphql-coverage").unwrap();
    cmd.arg("report")
        .arg(library_schema())
        .arg(library_queries())
        .arg("--quiet");
    cmd
}

#[test]
fn exit_code_0_above_threshold() {
    report().args(["--fail-under", "25"]).assert().code(0);
}

#[test]
fn exit_code_1_below_threshold() {
    report()
        .args(["--fail-under", "50"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Verdict: FAIL"))
        .stdout(predicate::str::contains(
            "coverage 30.00% is below the required 50.00%",
        ));
}

#[test]
fn strict_fails_on_unknown_fields() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("extra.graphql"), "{ books { isbn } }\n").unwrap();

    let mut cmd = Command::cargo_bin("graphql-coverage").unwrap();
    cmd.arg("report")
        .arg(library_schema())
        .arg(tmp.path())
        .args(["--quiet", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("  - books.isbn"));
}

#[test]
fn missing_schema_fails() {
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["report", "/nonexistent/schema.graphql", "/nonexistent/queries"])
        .assert()
        .failure();
}

#[test]
fn no_query_files_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("notes.txt"), "nothing here").unwrap();

    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .arg("report")
        .arg(library_schema())
        .arg(tmp.path())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No GraphQL query files found"));
}

#[test]
fn schema_without_query_root_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = tmp.path().join("schema.graphql");
    std::fs::write(&schema, "type User { id: ID }\n").unwrap();
    std::fs::write(tmp.path().join("q.graphql"), "{ user { id } }\n").unwrap();

    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .arg("report")
        .arg(&schema)
        .arg(tmp.path())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root query type 'Query' not found"));
}

#[test]
fn schema_passed_as_query_file_is_not_read() {
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .arg("report")
        .arg(library_schema())
        .arg(library_schema())
        .arg("--quiet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No GraphQL query files found"));
}
