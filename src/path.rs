//! Hierarchical field paths (`user.address.city`) shared by the schema and
//! query traversals.

use std::collections::BTreeSet;

/// Separator between field names in a hierarchical path.
pub const SEPARATOR: char = '.';

/// A set of hierarchical field paths. Ordered so reports are deterministic.
pub type FieldSet = BTreeSet<String>;

/// Extend `parent` with `field`. An empty parent yields the bare field name.
pub fn join(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        let mut path = String::with_capacity(parent.len() + 1 + field.len());
        path.push_str(parent);
        path.push(SEPARATOR);
        path.push_str(field);
        path
    }
}

/// Keep the first `depth` segments of `path`.
///
/// A depth of zero, or one at least as long as the path, returns the path
/// unchanged.
pub fn truncate(path: &str, depth: usize) -> &str {
    if depth == 0 {
        return path;
    }
    match path.match_indices(SEPARATOR).nth(depth - 1) {
        Some((idx, _)) => &path[..idx],
        None => path,
    }
}

/// True if `path` is non-empty and has no empty segments.
pub fn is_canonical(path: &str) -> bool {
    !path.is_empty() && path.split(SEPARATOR).all(|segment| !segment.is_empty())
}

/// Lowercase every path in `fields`. Paths differing only by case collapse.
pub fn lowercase(fields: &FieldSet) -> FieldSet {
    fields.iter().map(|f| f.to_lowercase()).collect()
}
