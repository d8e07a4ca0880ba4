use crate::errors::{CoverageError, Result};
use crate::path::{self, FieldSet};
use crate::schema::index::{TypeDefinition, TypeIndex};
use std::collections::HashSet;

/// Type names already expanded along the current root-to-leaf branch.
///
/// Cloned, never shared, when forking into a field's sub-expansion: a type
/// reached through two sibling fields expands in both, a type reachable from
/// itself along one branch is cut.
pub type VisitedTypes<'i> = HashSet<&'i str>;

/// Enumerate hierarchical field paths reachable from `root`.
///
/// With `only_leafs`, only fields whose named type is not an indexed object
/// type are emitted.
pub fn enumerate_fields(index: &TypeIndex, root: &str, only_leafs: bool) -> Result<FieldSet> {
    let root_type = index
        .get(root)
        .ok_or_else(|| CoverageError::RootTypeNotFound {
            name: root.to_string(),
        })?;

    let mut fields = FieldSet::new();
    expand_type(
        index,
        root_type,
        "",
        &VisitedTypes::new(),
        only_leafs,
        &mut fields,
    );
    Ok(fields)
}

fn expand_type<'i>(
    index: &'i TypeIndex,
    type_def: &'i TypeDefinition,
    parent_path: &str,
    visited: &VisitedTypes<'i>,
    only_leafs: bool,
    fields: &mut FieldSet,
) {
    for field in &type_def.fields {
        let path = path::join(parent_path, &field.name);
        let field_type = field.type_ref.named_type();
        let child = index.get(field_type);

        if !only_leafs || child.is_none() {
            fields.insert(path.clone());
        }

        let Some(child) = child else {
            continue;
        };

        if visited.contains(child.name.as_str()) {
            tracing::debug!("Cycle cut at {path} ({field_type} already on branch)");
            continue;
        }

        let mut branch = visited.clone();
        branch.insert(child.name.as_str());
        expand_type(index, child, &path, &branch, only_leafs, fields);
    }
}
