//! Schema field coverage for GraphQL query corpora.

pub mod cli;
pub mod config;
pub mod coverage;
pub mod errors;
pub mod output;
pub mod path;
pub mod query;
pub mod report;
pub mod schema;
pub mod walk;
