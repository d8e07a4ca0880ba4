use crate::{fixture_path, library_schema};
use assert_cmd::Command;
use predicates::prelude::*;

fn fields_stdout(args: &[&str]) -> String {
    let output = Command::cargo_bin("graphql-coverage")
        .unwrap()
        .arg("fields")
        .arg(library_schema())
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn lists_all_fields() {
    let stdout = fields_stdout(&[]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 40);
    assert!(lines.contains(&"book.author.books"));
    assert!(!lines.contains(&"book.author.books.id"));
    assert!(lines.contains(&"addBook.reviews.body"));
}

#[test]
fn lists_leaf_fields() {
    let stdout = fields_stdout(&["--only-leafs"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 24);
    assert!(lines.contains(&"author.books.reviews.rating"));
    assert!(!lines.contains(&"book"));
}

#[test]
fn normalized_fields_are_lowercase() {
    let stdout = fields_stdout(&["--normalize"]);
    assert!(stdout.contains("addbook.title"));
    assert!(!stdout.contains("addBook"));
}

#[test]
fn json_field_list() {
    let stdout = fields_stdout(&["--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["count"], 40);
    assert_eq!(json["fields"][0], "addBook");
}

#[test]
fn custom_roots_fields() {
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .arg("fields")
        .arg(fixture_path("custom_roots").join("schema.graphql"))
        .assert()
        .success()
        .stdout("viewer\nviewer.login\nviewer.repositories\nviewer.repositories.name\n");
}

#[test]
fn malformed_schema_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let schema = tmp.path().join("broken.graphql");
    std::fs::write(&schema, "type Query {\n").unwrap();

    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .arg("fields")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schema parse error"));
}
