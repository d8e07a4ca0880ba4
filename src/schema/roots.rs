use crate::errors::{CoverageError, Result};
use graphql_parser::schema::{Definition, Document, TypeDefinition};

const DEFAULT_QUERY_TYPE: &str = "Query";
const DEFAULT_MUTATION_TYPE: &str = "Mutation";

/// Names of the root operation types a schema exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootTypes {
    pub query: String,
    pub mutation: Option<String>,
}

impl RootTypes {
    /// Resolve root type names from an explicit `schema { ... }` block, falling
    /// back to object types conventionally named `Query` and `Mutation`.
    pub fn resolve(doc: &Document<'_, String>) -> Result<Self> {
        let mut query: Option<String> = None;
        let mut mutation: Option<String> = None;

        for def in &doc.definitions {
            if let Definition::SchemaDefinition(sd) = def {
                if let Some(q) = &sd.query {
                    query = Some(q.clone());
                }
                if let Some(m) = &sd.mutation {
                    mutation = Some(m.clone());
                }
            }
        }

        if query.is_none() && has_object_type(doc, DEFAULT_QUERY_TYPE) {
            query = Some(DEFAULT_QUERY_TYPE.to_string());
        }
        if mutation.is_none() && has_object_type(doc, DEFAULT_MUTATION_TYPE) {
            mutation = Some(DEFAULT_MUTATION_TYPE.to_string());
        }

        tracing::debug!(?query, ?mutation, "resolved root operation types");

        match query {
            Some(query) => Ok(RootTypes { query, mutation }),
            None => Err(CoverageError::RootTypeNotFound {
                name: DEFAULT_QUERY_TYPE.to_string(),
            }),
        }
    }
}

fn has_object_type(doc: &Document<'_, String>, name: &str) -> bool {
    doc.definitions.iter().any(|def| {
        matches!(def, Definition::TypeDefinition(TypeDefinition::Object(obj)) if obj.name == name)
    })
}
