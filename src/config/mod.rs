pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::output::OutputFormat;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Name of the project config file searched for from the working directory up.
pub const PROJECT_CONFIG_FILE: &str = ".graphql-coverage.toml";

/// Fully resolved configuration. Only genuinely optional settings stay `Option`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Operational
    pub format: OutputFormat,
    pub quiet: bool,
    pub top: Option<usize>,

    // Coverage semantics
    pub coverage: CoverageSettings,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub extensions: Vec<String>,
    pub ignore_patterns: Vec<String>,

    // Report
    pub csv_path: Option<PathBuf>,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageSettings {
    /// Compare leaf fields only.
    pub only_leafs: bool,
    /// Compare field paths case-insensitively.
    pub normalize: bool,
    /// Path depth used to aggregate usage in reports; 0 disables aggregation.
    pub depth: usize,
    /// Fail the run when coverage falls below this percentage.
    pub fail_under: Option<f64>,
    /// Fail the run when queries use fields the schema does not define.
    pub strict: bool,
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            only_leafs: false,
            normalize: false,
            depth: 1,
            fail_under: None,
            strict: false,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quiet: false,
            top: None,
            coverage: CoverageSettings::default(),
            include: Vec::new(),
            exclude: Vec::new(),
            extensions: crate::walk::DEFAULT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            ignore_patterns: Vec::new(),
            csv_path: None,
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Exclude patterns merged with `.graphql-coverageignore` patterns.
    pub fn all_excludes(&self) -> Vec<String> {
        let mut exclude = self.exclude.clone();
        exclude.extend(self.ignore_patterns.iter().cloned());
        exclude
    }
}
