pub mod fields;
pub mod index;
pub mod roots;

use crate::errors::{CoverageError, Result};
use crate::path::FieldSet;
use index::TypeIndex;
use roots::RootTypes;
use std::path::Path;

/// A parsed schema reduced to what coverage needs: the object-type index and
/// the root operation type names.
#[derive(Debug, Clone)]
pub struct Schema {
    pub index: TypeIndex,
    pub roots: RootTypes,
}

impl Schema {
    /// Load and parse a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse SDL text. `source_name` labels parse errors.
    pub fn parse(content: &str, source_name: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(CoverageError::RootTypeNotFound {
                name: "Query".to_string(),
            });
        }

        let doc = graphql_parser::parse_schema::<String>(content).map_err(|e| {
            CoverageError::SchemaParse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            }
        })?;

        let index = TypeIndex::from_document(&doc);
        let roots = RootTypes::resolve(&doc)?;
        if index.is_empty() {
            return Err(CoverageError::RootTypeNotFound { name: roots.query });
        }
        tracing::info!(
            "Indexed {} object types (query root {}, mutation root {})",
            index.len(),
            roots.query,
            roots.mutation.as_deref().unwrap_or("-")
        );

        Ok(Schema { index, roots })
    }

    /// Every hierarchical field path reachable from the query root, unioned
    /// with those reachable from the mutation root when it is defined.
    pub fn fields(&self, only_leafs: bool) -> Result<FieldSet> {
        let mut fields = fields::enumerate_fields(&self.index, &self.roots.query, only_leafs)?;

        if let Some(mutation) = &self.roots.mutation {
            if self.index.contains(mutation) {
                fields.extend(fields::enumerate_fields(&self.index, mutation, only_leafs)?);
            } else {
                tracing::debug!("Mutation root {mutation} is not an object type, skipping");
            }
        }

        Ok(fields)
    }
}
