use crate::errors::{CoverageError, Result};
use crate::path::{self, FieldSet};
use std::borrow::Cow;

/// Result of comparing schema fields against used fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    /// Share of schema fields that are used, in percent (unrounded).
    pub percentage: f64,
    pub covered: FieldSet,
    pub uncovered: FieldSet,
}

/// Compute coverage of `schema_fields` by `used_fields`.
///
/// With `normalize`, both sets are lowercased before comparison, which may
/// merge paths that differ only by case. An empty schema set has zero
/// coverage. Every element must be a canonical path.
pub fn calculate(
    schema_fields: &FieldSet,
    used_fields: &FieldSet,
    normalize: bool,
) -> Result<Coverage> {
    validate("schema", schema_fields)?;
    validate("used", used_fields)?;

    let (schema_fields, used_fields): (Cow<'_, FieldSet>, Cow<'_, FieldSet>) = if normalize {
        (
            Cow::Owned(path::lowercase(schema_fields)),
            Cow::Owned(path::lowercase(used_fields)),
        )
    } else {
        (Cow::Borrowed(schema_fields), Cow::Borrowed(used_fields))
    };

    if schema_fields.is_empty() {
        return Ok(Coverage {
            percentage: 0.0,
            covered: FieldSet::new(),
            uncovered: FieldSet::new(),
        });
    }

    let covered: FieldSet = schema_fields.intersection(&used_fields).cloned().collect();
    let uncovered: FieldSet = schema_fields.difference(&used_fields).cloned().collect();
    let percentage = covered.len() as f64 / schema_fields.len() as f64 * 100.0;

    Ok(Coverage {
        percentage,
        covered,
        uncovered,
    })
}

fn validate(label: &str, fields: &FieldSet) -> Result<()> {
    match fields.iter().find(|f| !path::is_canonical(f)) {
        Some(bad) => Err(CoverageError::InvalidInput {
            message: format!("{label} field set contains non-canonical path '{bad}'"),
        }),
        None => Ok(()),
    }
}
