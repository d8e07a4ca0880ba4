use crate::errors::{CoverageError, Result};
use crate::path::{self, FieldSet};
use crate::query::extract::{collect_fragments, extract_operation_fields, operation_name};
use graphql_parser::query::Definition;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Fields one query file uses, with the per-file diagnostics gathered while
/// extracting them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUsage {
    pub file: PathBuf,
    pub fields: FieldSet,
    pub operations: usize,
    pub missing_fragments: BTreeSet<String>,
    /// Operations skipped because of a fragment cycle, with the cycle chain.
    pub fragment_cycles: Vec<String>,
    /// Operations skipped because fragment expansion ran past the limit.
    pub expansion_limited: Vec<String>,
}

impl FileUsage {
    /// Parse one query document and extract the fields of all its operations.
    ///
    /// A document that fails to parse is an error for the whole file, and so
    /// is one without definitions (blank or comments only). An operation with
    /// recursive fragment spreads, or one whose fragments expand past
    /// [`crate::query::extract::MAX_EXPANDED_SELECTIONS`], is dropped and recorded.
    pub fn extract(file: &Path, source: &str, only_leafs: bool) -> Result<Self> {
        let mut usage = FileUsage {
            file: file.to_path_buf(),
            ..Default::default()
        };

        let doc = graphql_parser::parse_query::<String>(source).map_err(|e| {
            CoverageError::QueryParse {
                file: file.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        let fragments = collect_fragments(&doc);

        for def in &doc.definitions {
            let Definition::Operation(operation) = def else {
                continue;
            };
            usage.operations += 1;

            match extract_operation_fields(operation, &fragments, only_leafs) {
                Ok(extracted) => {
                    usage.fields.extend(extracted.fields);
                    usage.missing_fragments.extend(extracted.missing_fragments);
                }
                Err(CoverageError::FragmentCycle { chain, .. }) => {
                    tracing::warn!(
                        "Skipping operation {} in {}: fragment cycle {}",
                        operation_name(operation),
                        file.display(),
                        chain
                    );
                    usage.fragment_cycles.push(chain);
                }
                Err(CoverageError::ExpansionLimit { limit }) => {
                    tracing::warn!(
                        "Skipping operation {} in {}: fragments expand past {} selections",
                        operation_name(operation),
                        file.display(),
                        limit
                    );
                    usage
                        .expansion_limited
                        .push(operation_name(operation).to_string());
                }
                Err(e) => return Err(e),
            }
        }

        for name in &usage.missing_fragments {
            tracing::warn!("{}: fragment '{}' is not defined", file.display(), name);
        }

        Ok(usage)
    }
}

/// Corpus-wide field usage: the union of every file's fields and, per field,
/// the number of distinct files using it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsageIndex {
    pub used_fields: FieldSet,
    pub counts: BTreeMap<String, usize>,
    pub files: usize,
}

impl UsageIndex {
    /// Usage contributed by a single file. With `normalize`, paths are
    /// lowercased first so case variants within one file count once.
    pub fn from_file(usage: &FileUsage, normalize: bool) -> Self {
        let fields = if normalize {
            path::lowercase(&usage.fields)
        } else {
            usage.fields.clone()
        };
        let counts = fields.iter().map(|f| (f.clone(), 1)).collect();
        UsageIndex {
            used_fields: fields,
            counts,
            files: 1,
        }
    }

    /// Combine two indexes. Associative and commutative, so partial results
    /// can be reduced in any order.
    pub fn merge(mut self, other: UsageIndex) -> Self {
        for (field, count) in other.counts {
            *self.counts.entry(field).or_insert(0) += count;
        }
        self.used_fields.extend(other.used_fields);
        self.files += other.files;
        self
    }

    /// Reduce per-file usage in parallel.
    pub fn from_files(files: &[FileUsage], normalize: bool) -> Self {
        use rayon::prelude::*;

        files
            .par_iter()
            .map(|usage| UsageIndex::from_file(usage, normalize))
            .reduce(UsageIndex::default, UsageIndex::merge)
    }

    pub fn count(&self, field: &str) -> usize {
        self.counts.get(field).copied().unwrap_or(0)
    }
}
