use std::path::Path;

pub const IGNORE_FILE: &str = ".graphql-coverageignore";

/// Load `.graphql-coverageignore` patterns by walking up from `start`.
/// The nearest file wins; blank lines and `#` comments are skipped.
pub fn load_ignore_patterns(start: &Path) -> Vec<String> {
    let mut dir = start.to_path_buf();
    loop {
        let ignore_path = dir.join(IGNORE_FILE);
        if ignore_path.is_file() {
            match std::fs::read_to_string(&ignore_path) {
                Ok(content) => return parse_ignore_patterns(&content),
                Err(e) => tracing::warn!("Could not read {}: {}", ignore_path.display(), e),
            }
        }
        if !dir.pop() {
            break;
        }
    }
    Vec::new()
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
