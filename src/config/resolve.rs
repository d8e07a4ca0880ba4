use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::{ResolvedConfig, PROJECT_CONFIG_FILE};
use crate::errors::{CoverageError, Result};
use crate::output::OutputFormat;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "GRAPHQL_COVERAGE_";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub top: Option<usize>,
    pub only_leafs: bool,
    pub normalize: bool,
    pub depth: Option<usize>,
    pub fail_under: Option<f64>,
    pub strict: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub csv_path: Option<PathBuf>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/graphql-coverage/config.toml)
/// 3. Project config (nearest .graphql-coverage.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_with(working_dir, cli, find_user_config(), &|key: &str| {
        std::env::var(key).ok()
    })
}

fn resolve_with(
    working_dir: &Path,
    cli: &CliOverrides,
    user_config: Option<PathBuf>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::new();
    let mut loaded_files = Vec::new();

    set_all_default_provenance(&mut prov);

    if let Some(path) = user_config.filter(|p| p.is_file()) {
        let file_config = load_file_config(&path, "user")?;
        apply_file_config(&mut config, &file_config, Source::UserConfig(path.clone()), &mut prov)?;
        loaded_files.push(path);
    }

    if let Some(path) = find_project_config(working_dir) {
        let file_config = load_file_config(&path, "project")?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::ProjectConfig(path.clone()),
            &mut prov,
        )?;
        loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov, env);
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.ignore_patterns = crate::config::ignore::load_ignore_patterns(working_dir);
    config.provenance = prov;
    config.loaded_files = loaded_files;

    tracing::debug!(files = ?config.loaded_files, "resolved configuration");
    Ok(config)
}

fn load_file_config(path: &Path, kind: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        CoverageError::Config(format!("Could not read {kind} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content).map_err(|e| {
        CoverageError::Config(format!("Invalid {kind} config {}: {e}", path.display()))
    })
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("graphql-coverage").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Every key `config show` reports.
pub const CONFIG_KEYS: &[&str] = &[
    "defaults.format",
    "defaults.quiet",
    "defaults.top",
    "coverage.only_leafs",
    "coverage.normalize",
    "coverage.depth",
    "coverage.fail_under",
    "coverage.strict",
    "targeting.include",
    "targeting.exclude",
    "targeting.extensions",
    "report.csv_path",
];

fn set_all_default_provenance(prov: &mut ProvenanceMap) {
    for key in CONFIG_KEYS {
        prov.set(*key, Source::Default);
    }
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(ref format) = file.defaults.format {
        config.format = format.parse().map_err(CoverageError::Config)?;
        prov.set("defaults.format", source.clone());
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.set("defaults.quiet", source.clone());
    }
    if let Some(top) = file.defaults.top {
        config.top = Some(top);
        prov.set("defaults.top", source.clone());
    }

    let coverage = &file.coverage;
    if let Some(only_leafs) = coverage.only_leafs {
        config.coverage.only_leafs = only_leafs;
        prov.set("coverage.only_leafs", source.clone());
    }
    if let Some(normalize) = coverage.normalize {
        config.coverage.normalize = normalize;
        prov.set("coverage.normalize", source.clone());
    }
    if let Some(depth) = coverage.depth {
        config.coverage.depth = depth;
        prov.set("coverage.depth", source.clone());
    }
    if let Some(fail_under) = coverage.fail_under {
        config.coverage.fail_under = Some(fail_under);
        prov.set("coverage.fail_under", source.clone());
    }
    if let Some(strict) = coverage.strict {
        config.coverage.strict = strict;
        prov.set("coverage.strict", source.clone());
    }

    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.set("targeting.include", source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.set("targeting.exclude", source.clone());
    }
    if !file.targeting.extensions.is_empty() {
        config.extensions = file.targeting.extensions.clone();
        prov.set("targeting.extensions", source.clone());
    }

    if let Some(ref csv_path) = file.report.csv_path {
        config.csv_path = Some(PathBuf::from(csv_path));
        prov.set("report.csv_path", source);
    }

    Ok(())
}

fn parse_bool(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn apply_env_vars(
    config: &mut ResolvedConfig,
    prov: &mut ProvenanceMap,
    env: &dyn Fn(&str) -> Option<String>,
) {
    let var = |name: &str| {
        let key = format!("{ENV_PREFIX}{name}");
        env(&key).map(|val| (key, val))
    };

    if let Some((key, val)) = var("FORMAT") {
        match val.parse::<OutputFormat>() {
            Ok(format) => {
                config.format = format;
                prov.set("defaults.format", Source::EnvVar(key));
            }
            Err(e) => tracing::warn!("Ignoring {key}: {e}"),
        }
    }
    if let Some((key, val)) = var("QUIET") {
        config.quiet = parse_bool(&val);
        prov.set("defaults.quiet", Source::EnvVar(key));
    }
    if let Some((key, val)) = var("TOP") {
        if let Ok(n) = val.parse::<usize>() {
            config.top = Some(n);
            prov.set("defaults.top", Source::EnvVar(key));
        }
    }
    if let Some((key, val)) = var("ONLY_LEAFS") {
        config.coverage.only_leafs = parse_bool(&val);
        prov.set("coverage.only_leafs", Source::EnvVar(key));
    }
    if let Some((key, val)) = var("NORMALIZE") {
        config.coverage.normalize = parse_bool(&val);
        prov.set("coverage.normalize", Source::EnvVar(key));
    }
    if let Some((key, val)) = var("DEPTH") {
        if let Ok(depth) = val.parse::<usize>() {
            config.coverage.depth = depth;
            prov.set("coverage.depth", Source::EnvVar(key));
        }
    }
    if let Some((key, val)) = var("FAIL_UNDER") {
        if let Ok(pct) = val.parse::<f64>() {
            config.coverage.fail_under = Some(pct);
            prov.set("coverage.fail_under", Source::EnvVar(key));
        }
    }
    if let Some((key, val)) = var("STRICT") {
        config.coverage.strict = parse_bool(&val);
        prov.set("coverage.strict", Source::EnvVar(key));
    }
    if let Some((key, val)) = var("INCLUDE") {
        config.include = split_list(&val);
        prov.set("targeting.include", Source::EnvVar(key));
    }
    if let Some((key, val)) = var("EXCLUDE") {
        config.exclude = split_list(&val);
        prov.set("targeting.exclude", Source::EnvVar(key));
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("defaults.format", Source::CliFlag("--format".into()));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("defaults.quiet", Source::CliFlag("--quiet".into()));
    }
    if let Some(top) = cli.top {
        config.top = Some(top);
        prov.set("defaults.top", Source::CliFlag("--top".into()));
    }
    if cli.only_leafs {
        config.coverage.only_leafs = true;
        prov.set("coverage.only_leafs", Source::CliFlag("--only-leafs".into()));
    }
    if cli.normalize {
        config.coverage.normalize = true;
        prov.set("coverage.normalize", Source::CliFlag("--normalize".into()));
    }
    if let Some(depth) = cli.depth {
        config.coverage.depth = depth;
        prov.set("coverage.depth", Source::CliFlag("--depth".into()));
    }
    if let Some(fail_under) = cli.fail_under {
        config.coverage.fail_under = Some(fail_under);
        prov.set("coverage.fail_under", Source::CliFlag("--fail-under".into()));
    }
    if cli.strict {
        config.coverage.strict = true;
        prov.set("coverage.strict", Source::CliFlag("--strict".into()));
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
        prov.set("targeting.include", Source::CliFlag("--include".into()));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.set("targeting.exclude", Source::CliFlag("--exclude".into()));
    }
    if let Some(ref csv_path) = cli.csv_path {
        config.csv_path = Some(csv_path.clone());
        prov.set("report.csv_path", Source::CliFlag("--csv".into()));
    }
}
