use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::{CoverageError, Result};
use crate::output::OutputFormat;
use crate::query::{FileUsage, UsageIndex};
use crate::report::{CoverageReport, DiagnosticKind, FileDiagnostic, Metadata, Verdict};
use crate::schema::Schema;
use crate::walk;
use clap::Args;
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Path to the schema SDL file
    pub schema: PathBuf,

    /// Query document, or directory searched recursively for query documents
    pub queries: PathBuf,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Compare leaf fields only
    #[arg(long)]
    pub only_leafs: bool,

    /// Compare field paths case-insensitively
    #[arg(long)]
    pub normalize: bool,

    /// Path depth used to aggregate usage (0 disables aggregation)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Number of field rows to show
    #[arg(long)]
    pub top: Option<usize>,

    /// Also write the field table as CSV to this path
    #[arg(long = "csv", value_name = "PATH")]
    pub csv_path: Option<PathBuf>,

    /// Exit with code 1 when coverage is below this percentage
    #[arg(long, value_name = "PCT")]
    pub fail_under: Option<f64>,

    /// Exit with code 1 when queries use fields the schema does not define
    #[arg(long)]
    pub strict: bool,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl ReportArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            format: self.format,
            quiet: self.quiet,
            top: self.top,
            only_leafs: self.only_leafs,
            normalize: self.normalize,
            depth: self.depth,
            fail_under: self.fail_under,
            strict: self.strict,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            csv_path: self.csv_path.clone(),
        }
    }
}

pub fn run(args: &ReportArgs) -> Result<()> {
    let start = Instant::now();

    let working_dir = std::env::current_dir()?;
    let config = resolve_config(&working_dir, &args.overrides())?;
    let settings = &config.coverage;

    let schema = Schema::load(&args.schema)?;
    let schema_fields = schema.fields(settings.only_leafs)?;

    let root = args
        .queries
        .canonicalize()
        .map_err(|_| CoverageError::NoFiles {
            path: args.queries.clone(),
        })?;

    // The schema file often sits next to the queries it describes.
    let skip: Vec<PathBuf> = args.schema.canonicalize().into_iter().collect();
    let files = walk::discover_query_files(
        &root,
        &config.extensions,
        &config.include,
        &config.all_excludes(),
        &skip,
    )?;

    if files.is_empty() {
        return Err(CoverageError::NoFiles { path: root });
    }

    let display_base = if root.is_file() {
        root.parent().unwrap_or(&root).to_path_buf()
    } else {
        root.clone()
    };

    let files_skipped = AtomicUsize::new(0);

    let progress = if !config.quiet {
        let pb = indicatif::ProgressBar::new(files.len() as u64);
        match indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
        {
            Ok(style) => pb.set_style(style.progress_chars("#>-")),
            Err(e) => tracing::debug!("Default progress style: {}", e),
        }
        Some(pb)
    } else {
        None
    };

    let results: Vec<std::result::Result<FileUsage, FileDiagnostic>> = files
        .par_iter()
        .map(|file_path| {
            let relative = file_path
                .strip_prefix(&display_base)
                .unwrap_or(file_path)
                .to_path_buf();
            let result = extract_file(file_path, &relative, settings.only_leafs);
            if result.is_err() {
                files_skipped.fetch_add(1, Ordering::Relaxed);
            }
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            result
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut usages = Vec::with_capacity(results.len());
    let mut diagnostics = Vec::new();
    for result in results {
        match result {
            Ok(usage) => {
                diagnostics.extend(file_diagnostics(&usage));
                usages.push(usage);
            }
            Err(diagnostic) => diagnostics.push(diagnostic),
        }
    }

    let usage = UsageIndex::from_files(&usages, settings.normalize);
    let coverage =
        crate::coverage::calculate(&schema_fields, &usage.used_fields, settings.normalize)?;

    let metadata = Metadata {
        schema: args.schema.clone(),
        queries: args.queries.clone(),
        query_root: schema.roots.query.clone(),
        mutation_root: schema.roots.mutation.clone(),
        only_leafs: settings.only_leafs,
        normalize: settings.normalize,
        depth: settings.depth,
        files_parsed: usages.len(),
        files_skipped: files_skipped.load(Ordering::Relaxed),
        operations: usages.iter().map(|u| u.operations).sum(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    };
    let report = CoverageReport::build(metadata, &coverage, &usage, settings, diagnostics);

    let mut stdout = std::io::stdout();
    match config.format {
        OutputFormat::Text => {
            crate::output::text::write_report_text(&mut stdout, &report, config.top)?
        }
        OutputFormat::Json => {
            crate::output::json::write_report_json(&mut stdout, &report, config.top)?
        }
        OutputFormat::Csv => crate::output::csv::write_report_csv(&mut stdout, &report)?,
    }

    if let Some(ref csv_path) = config.csv_path {
        let mut file = std::io::BufWriter::new(std::fs::File::create(csv_path)?);
        crate::output::csv::write_report_csv(&mut file, &report)?;
        file.flush()?;
        tracing::info!("Wrote field usage table to {}", csv_path.display());
    }

    if !config.quiet {
        eprintln!(
            "Analyzed {} files ({} operations): {:.2}% of {} fields covered in {:.2}s",
            report.metadata.files_parsed,
            report.metadata.operations,
            report.summary.coverage_percentage,
            report.summary.total_fields,
            report.metadata.elapsed_ms as f64 / 1000.0
        );
    }

    if report.verdict == Verdict::Fail {
        stdout.flush()?;
        std::process::exit(1);
    }

    Ok(())
}

/// Read and extract one query file. Unreadable or unparsable files become a
/// diagnostic and are left out of the coverage.
fn extract_file(
    path: &Path,
    relative: &Path,
    only_leafs: bool,
) -> std::result::Result<FileUsage, FileDiagnostic> {
    let parse_error = |message: String| FileDiagnostic {
        file: relative.to_path_buf(),
        kind: DiagnosticKind::ParseError,
        message,
    };

    let source = std::fs::read_to_string(path).map_err(|e| {
        tracing::warn!("Skipping {}: {}", path.display(), e);
        parse_error(e.to_string())
    })?;

    FileUsage::extract(relative, &source, only_leafs).map_err(|e| {
        tracing::warn!("Skipping {}", e);
        match e {
            CoverageError::QueryParse { message, .. } => parse_error(message),
            other => parse_error(other.to_string()),
        }
    })
}

fn file_diagnostics(usage: &FileUsage) -> Vec<FileDiagnostic> {
    let missing = usage.missing_fragments.iter().map(|name| FileDiagnostic {
        file: usage.file.clone(),
        kind: DiagnosticKind::MissingFragment,
        message: format!("fragment '{name}' is not defined"),
    });
    let cycles = usage.fragment_cycles.iter().map(|chain| FileDiagnostic {
        file: usage.file.clone(),
        kind: DiagnosticKind::FragmentCycle,
        message: format!("operation skipped, fragment cycle {chain}"),
    });
    let oversized = usage.expansion_limited.iter().map(|operation| FileDiagnostic {
        file: usage.file.clone(),
        kind: DiagnosticKind::ExpansionLimit,
        message: format!("operation {operation} skipped, fragments expand past the selection limit"),
    });
    missing.chain(cycles).chain(oversized).collect()
}
