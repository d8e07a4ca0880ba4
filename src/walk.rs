use crate::errors::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Default extensions of GraphQL query documents.
pub const DEFAULT_EXTENSIONS: &[&str] = &["graphql", "gql"];

/// Discover query documents under `root`.
///
/// - Respects `.gitignore`
/// - Matches files by extension (case-insensitive)
/// - Applies include/exclude glob patterns
/// - Returns sorted paths for deterministic output
///
/// `skip` lists files that are never returned, such as the schema file when it
/// lives inside the queries directory.
pub fn discover_query_files(
    root: &Path,
    extensions: &[String],
    include_patterns: &[String],
    exclude_patterns: &[String],
    skip: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let exclude_set = build_globset(exclude_patterns)?;
    let include_set = if include_patterns.is_empty() {
        None
    } else {
        Some(build_globset(include_patterns)?)
    };

    if root.is_file() {
        let relative = root.file_name().map(Path::new).unwrap_or(root);
        let selected = is_selected(root, relative, skip, &exclude_set, include_set.as_ref());
        return Ok(if selected {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Walk error under {}: {}", root.display(), e);
                continue;
            }
        };

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let ext_match = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)));

        if !ext_match {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if !is_selected(path, relative, skip, &exclude_set, include_set.as_ref()) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    Ok(files)
}

/// Skip list and glob filters shared by directory walks and single-file roots.
fn is_selected(
    path: &Path,
    relative: &Path,
    skip: &[PathBuf],
    exclude_set: &GlobSet,
    include_set: Option<&GlobSet>,
) -> bool {
    if skip.iter().any(|s| same_file(s, path)) {
        return false;
    }

    if exclude_set.is_match(relative) || exclude_set.is_match(path) {
        return false;
    }
    if let Some(fname) = path.file_name() {
        if exclude_set.is_match(Path::new(fname)) {
            return false;
        }
    }

    match include_set {
        Some(include) => include.is_match(relative) || include.is_match(path),
        None => true,
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
