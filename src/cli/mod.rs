pub mod config;
pub mod fields;
pub mod report;

use crate::errors::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "graphql-coverage",
    version,
    about = "Measure how much of a GraphQL schema a set of queries exercises"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report schema coverage of a directory of query documents
    Report(report::ReportArgs),
    /// List the field paths reachable from the schema roots
    Fields(fields::FieldsArgs),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report(args) => report::run(&args),
        Commands::Fields(args) => fields::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}
