mod config_test;
mod exit_codes_test;
mod fields_test;
mod report_test;

use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn library_schema() -> PathBuf {
    fixture_path("library").join("schema.graphql")
}

pub fn library_queries() -> PathBuf {
    fixture_path("library").join("queries")
}
