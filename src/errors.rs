use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CoverageError {
    #[error("No GraphQL query files found in {path}")]
    #[diagnostic(code(graphql_coverage::no_files))]
    NoFiles { path: PathBuf },

    #[error("Schema parse error in {source_name}: {message}")]
    #[diagnostic(code(graphql_coverage::schema_parse))]
    SchemaParse {
        source_name: String,
        message: String,
    },

    #[error("Root query type '{name}' not found in schema")]
    #[diagnostic(
        code(graphql_coverage::root_type_not_found),
        help("declare `schema {{ query: ... }}` or define an object type named `Query`")
    )]
    RootTypeNotFound { name: String },

    #[error("Parse error in {file}: {message}")]
    #[diagnostic(code(graphql_coverage::query_parse))]
    QueryParse { file: PathBuf, message: String },

    #[error("Fragment cycle detected at '{fragment}': {chain}")]
    #[diagnostic(code(graphql_coverage::fragment_cycle))]
    FragmentCycle { fragment: String, chain: String },

    #[error("Fragment expansion exceeded {limit} selections")]
    #[diagnostic(code(graphql_coverage::expansion_limit))]
    ExpansionLimit { limit: usize },

    #[error("Invalid coverage input: {message}")]
    #[diagnostic(code(graphql_coverage::invalid_input))]
    InvalidInput { message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(graphql_coverage::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(graphql_coverage::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(graphql_coverage::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(graphql_coverage::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, CoverageError>;
