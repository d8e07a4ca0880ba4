use crate::config::provenance::Source;
use crate::config::resolve::CONFIG_KEYS;
use crate::config::ResolvedConfig;
use std::io::Write;

const SECTIONS: &[&str] = &["defaults", "coverage", "targeting", "report"];

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    if !config.ignore_patterns.is_empty() {
        writeln!(w, "Ignore patterns: {}", config.ignore_patterns.join(", "))?;
    }
    writeln!(w)?;

    writeln!(w, "Resolved settings:")?;
    for key in CONFIG_KEYS {
        let source = config.provenance.get(key).unwrap_or(&Source::Default);
        writeln!(w, "  {}: {} <- {}", key, value_for_key(config, key), source)?;
    }

    Ok(())
}

/// Render `config explain <section>` output.
pub fn render_explain<W: Write>(
    w: &mut W,
    config: &ResolvedConfig,
    section: &str,
) -> std::io::Result<()> {
    let entries = config.provenance.section(section);

    if entries.is_empty() {
        writeln!(w, "Unknown config section: {section}")?;
        writeln!(w, "Available sections: {}", SECTIONS.join(", "))?;
        return Ok(());
    }

    writeln!(w, "Section: {section}")?;
    writeln!(w)?;
    for (key, source) in entries {
        writeln!(w, "  {}: {} <- {}", key, value_for_key(config, key), source)?;
    }

    Ok(())
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        format!("{values:?}")
    }
}

fn value_for_key(config: &ResolvedConfig, key: &str) -> String {
    let coverage = &config.coverage;
    match key {
        "defaults.format" => config.format.to_string(),
        "defaults.quiet" => config.quiet.to_string(),
        "defaults.top" => config.top.map_or("(all)".to_string(), |n| n.to_string()),
        "coverage.only_leafs" => coverage.only_leafs.to_string(),
        "coverage.normalize" => coverage.normalize.to_string(),
        "coverage.depth" => coverage.depth.to_string(),
        "coverage.fail_under" => coverage
            .fail_under
            .map_or("(none)".to_string(), |p| p.to_string()),
        "coverage.strict" => coverage.strict.to_string(),
        "targeting.include" => list(&config.include),
        "targeting.exclude" => list(&config.exclude),
        "targeting.extensions" => list(&config.extensions),
        "report.csv_path" => config
            .csv_path
            .as_ref()
            .map_or("(none)".to_string(), |p| p.display().to_string()),
        _ => "(unknown)".to_string(),
    }
}
