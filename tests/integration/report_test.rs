use crate::{fixture_path, library_queries, library_schema};
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn report_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["report", "--format", "json", "--quiet"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success(), "report failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

fn library_args() -> [String; 2] {
    [
        library_schema().to_string_lossy().into_owned(),
        library_queries().to_string_lossy().into_owned(),
    ]
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn text_report_on_library() {
    let [schema, queries] = library_args();
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["report", &schema, &queries, "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("GraphQL Schema Coverage Report"))
        .stdout(predicate::str::contains("Schema Coverage: 30.00%"))
        .stdout(predicate::str::contains("Total Fields:     40"))
        .stdout(predicate::str::contains("Covered Fields:   12"))
        .stdout(predicate::str::contains("Roots:      Query / Mutation"))
        .stdout(predicate::str::contains("Verdict: PASS"));
}

#[test]
fn json_report_on_library() {
    let [schema, queries] = library_args();
    let json = report_json(&[schema.as_str(), queries.as_str()]);

    assert_eq!(json["summary"]["coverage_percentage"], 30.0);
    assert_eq!(json["summary"]["total_fields"], 40);
    assert_eq!(json["summary"]["covered_fields"], 12);
    assert_eq!(json["summary"]["unknown_fields"], 0);
    assert_eq!(json["metadata"]["files_parsed"], 3);
    assert_eq!(json["metadata"]["operations"], 3);
    assert_eq!(json["fields"].as_array().unwrap().len(), 40);
    assert_eq!(json["fields"][0]["usage_count"], 1);
    assert_eq!(json["fields"][39]["usage_count"], 0);
    assert_eq!(json["verdict"], "pass");
}

#[test]
fn fragment_fields_are_counted() {
    let [schema, queries] = library_args();
    let json = report_json(&[schema.as_str(), queries.as_str()]);
    let covered: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|row| row["covered"] == true)
        .map(|row| row["field"].as_str().unwrap())
        .collect();
    assert!(covered.contains(&"books.title"));
    assert!(covered.contains(&"books.reviews.rating"));
    assert!(covered.contains(&"addBook.id"));
}

#[test]
fn only_leafs_report() {
    let [schema, queries] = library_args();
    let json = report_json(&[schema.as_str(), queries.as_str(), "--only-leafs"]);
    assert_eq!(json["summary"]["total_fields"], 24);
    assert_eq!(json["summary"]["covered_fields"], 7);
    assert_eq!(json["summary"]["coverage_percentage"], 29.17);
}

#[test]
fn schema_inside_queries_dir_is_skipped() {
    let schema = library_schema().to_string_lossy().into_owned();
    let dir = fixture_path("library").to_string_lossy().into_owned();
    let json = report_json(&[schema.as_str(), dir.as_str()]);
    assert_eq!(json["metadata"]["files_parsed"], 3);
    assert!(json["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn exclude_pattern_drops_files() {
    let [schema, queries] = library_args();
    let json = report_json(&[schema.as_str(), queries.as_str(), "--exclude", "admin/**"]);
    assert_eq!(json["metadata"]["files_parsed"], 2);
    assert_eq!(json["summary"]["covered_fields"], 9);
    assert_eq!(json["summary"]["coverage_percentage"], 22.5);
}

#[test]
fn single_query_file() {
    let schema = library_schema().to_string_lossy().into_owned();
    let query = library_queries()
        .join("book.graphql")
        .to_string_lossy()
        .into_owned();
    let json = report_json(&[schema.as_str(), query.as_str()]);
    assert_eq!(json["metadata"]["files_parsed"], 1);
    assert_eq!(json["summary"]["covered_fields"], 5);
}

#[test]
fn depth_aggregation() {
    let [schema, queries] = library_args();
    let json = report_json(&[schema.as_str(), queries.as_str(), "--depth", "1"]);
    let book = json["aggregated"]
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["field"] == "book")
        .unwrap()
        .clone();
    assert_eq!(book["fields"], 10);
    assert_eq!(book["covered_fields"], 5);
    assert_eq!(book["usage_count"], 5);

    let json = report_json(&[schema.as_str(), queries.as_str(), "--depth", "0"]);
    assert!(json["aggregated"].as_array().unwrap().is_empty());
}

#[test]
fn custom_root_types() {
    let dir = fixture_path("custom_roots");
    let json = report_json(&[
        dir.join("schema.graphql").to_str().unwrap(),
        dir.join("queries").to_str().unwrap(),
    ]);
    assert_eq!(json["metadata"]["query_root"], "RootQuery");
    assert_eq!(json["summary"]["total_fields"], 4);
    assert_eq!(json["summary"]["coverage_percentage"], 50.0);
}

#[test]
fn csv_export() {
    let [schema, queries] = library_args();
    let tmp = tempfile::tempdir().unwrap();
    let csv = tmp.path().join("usage.csv");

    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["report", &schema, &queries, "--quiet", "--csv"])
        .arg(&csv)
        .assert()
        .success();

    let content = std::fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Field,Usage Count,Covered");
    assert_eq!(lines.len(), 41);
    assert!(lines.contains(&"book.title,1,true"));
    assert!(lines.contains(&"author.name,0,false"));
}

#[test]
fn csv_to_stdout() {
    let [schema, queries] = library_args();
    Command::cargo_bin("graphql-coverage")
        .unwrap()
        .args(["report", &schema, &queries, "--quiet", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Field,Usage Count,Covered\n"));
}

#[test]
fn usage_counts_distinct_files() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "schema.graphql", "type Query { user: User }\ntype User { name: String }\n");
    write(tmp.path(), "q/a.graphql", "{ user { name } }\nquery Again { user { name } }\n");
    write(tmp.path(), "q/b.graphql", "{ user { name } }\n");

    let json = report_json(&[
        tmp.path().join("schema.graphql").to_str().unwrap(),
        tmp.path().join("q").to_str().unwrap(),
    ]);
    assert_eq!(json["fields"][0]["field"], "user");
    assert_eq!(json["fields"][0]["usage_count"], 2);
    assert_eq!(json["metadata"]["operations"], 3);
}

#[test]
fn normalize_matches_case_insensitively() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "schema.graphql", "type Query { userName: String }\n");
    write(tmp.path(), "q/a.graphql", "{ username }\n");
    let schema = tmp.path().join("schema.graphql");
    let queries = tmp.path().join("q");
    let args = [schema.to_str().unwrap(), queries.to_str().unwrap()];

    let json = report_json(&args);
    assert_eq!(json["summary"]["coverage_percentage"], 0.0);
    assert_eq!(json["unknown_fields"][0], "username");

    let mut normalized = args.to_vec();
    normalized.push("--normalize");
    let json = report_json(&normalized);
    assert_eq!(json["summary"]["coverage_percentage"], 100.0);
    assert_eq!(json["fields"][0]["field"], "username");
}

#[test]
fn broken_and_partial_files_become_diagnostics() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "schema.graphql", "type Query { user: User }\ntype User { id: ID name: String }\n");
    write(tmp.path(), "q/broken.graphql", "query { user { \n");
    write(tmp.path(), "q/missing.graphql", "{ user { id ...Gone } }\n");
    write(
        tmp.path(),
        "q/cycle.graphql",
        "{ user { ...A } }\nfragment A on User { name ...B }\nfragment B on User { ...A }\n",
    );
    write(tmp.path(), "q/blank.graphql", "\n   \n");
    let mut huge = String::from("query Huge { user { ...F0 } }\n");
    for i in 0..30 {
        huge.push_str(&format!("fragment F{i} on User {{ ...F{n} ...F{n} }}\n", n = i + 1));
    }
    huge.push_str("fragment F30 on User { name }\n");
    write(tmp.path(), "q/huge.graphql", &huge);

    let json = report_json(&[
        tmp.path().join("schema.graphql").to_str().unwrap(),
        tmp.path().join("q").to_str().unwrap(),
    ]);

    assert_eq!(json["metadata"]["files_parsed"], 3);
    assert_eq!(json["metadata"]["files_skipped"], 2);
    let kinds: Vec<&str> = json["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"parse_error"));
    assert!(kinds.contains(&"missing_fragment"));
    assert!(kinds.contains(&"fragment_cycle"));
    assert!(kinds.contains(&"expansion_limit"));
    assert_eq!(json["summary"]["covered_fields"], 2);
}
