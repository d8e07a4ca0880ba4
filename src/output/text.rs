use crate::errors::Result;
use crate::path::FieldSet;
use crate::report::{CoverageReport, Verdict};
use std::io::Write;

/// Write a coverage report as human-readable text.
pub fn write_report_text<W: Write>(
    writer: &mut W,
    report: &CoverageReport,
    top_n: Option<usize>,
) -> Result<()> {
    let metadata = &report.metadata;
    let summary = &report.summary;

    writeln!(writer, "GraphQL Schema Coverage Report")?;
    writeln!(writer, "==============================")?;
    writeln!(writer)?;
    writeln!(writer, "Schema:     {}", metadata.schema.display())?;
    writeln!(writer, "Queries:    {}", metadata.queries.display())?;
    match &metadata.mutation_root {
        Some(mutation) => writeln!(writer, "Roots:      {} / {}", metadata.query_root, mutation)?,
        None => writeln!(writer, "Roots:      {}", metadata.query_root)?,
    }
    writeln!(
        writer,
        "Mode:       {}{}",
        if metadata.only_leafs {
            "leaf fields only"
        } else {
            "all fields"
        },
        if metadata.normalize {
            ", case-insensitive"
        } else {
            ""
        }
    )?;
    writeln!(
        writer,
        "Parsed:     {} files ({} operations)",
        metadata.files_parsed, metadata.operations
    )?;
    writeln!(writer, "Skipped:    {} files", metadata.files_skipped)?;
    writeln!(writer)?;

    writeln!(writer, "Schema Coverage: {:.2}%", summary.coverage_percentage)?;
    writeln!(writer)?;
    writeln!(writer, "Total Fields:     {}", summary.total_fields)?;
    writeln!(writer, "Covered Fields:   {}", summary.covered_fields)?;
    writeln!(writer, "Uncovered Fields: {}", summary.uncovered_fields)?;
    writeln!(writer, "Unknown Fields:   {}", summary.unknown_fields)?;
    writeln!(writer)?;

    let limit = top_n.unwrap_or(report.fields.len()).min(report.fields.len());
    if limit > 0 {
        writeln!(writer, "Detailed Field Usage")?;
        writeln!(writer, "{:-<60}", "")?;
        writeln!(writer, "{:<40} {:>11} {:>7}", "Field", "Usage Count", "Covered")?;
        for row in report.fields.iter().take(limit) {
            writeln!(
                writer,
                "{:<40} {:>11} {:>7}",
                row.field,
                row.usage_count,
                if row.covered { "yes" } else { "no" }
            )?;
        }
        if limit < report.fields.len() {
            writeln!(writer, "... {} more", report.fields.len() - limit)?;
        }
        writeln!(writer)?;
    }

    if !report.aggregated.is_empty() {
        writeln!(writer, "Usage by Depth {}", metadata.depth)?;
        writeln!(writer, "{:-<60}", "")?;
        writeln!(writer, "{:<40} {:>11} {:>7}", "Field", "Usage Count", "Covered")?;
        for row in &report.aggregated {
            writeln!(
                writer,
                "{:<40} {:>11} {:>7}",
                row.field,
                row.usage_count,
                format!("{}/{}", row.covered_fields, row.fields)
            )?;
        }
        writeln!(writer)?;
    }

    if !report.unknown_fields.is_empty() {
        writeln!(writer, "Fields Not Defined in Schema")?;
        writeln!(writer, "{:-<60}", "")?;
        for field in &report.unknown_fields {
            writeln!(writer, "  - {field}")?;
        }
        writeln!(writer)?;
    }

    if !report.diagnostics.is_empty() {
        writeln!(writer, "Diagnostics")?;
        writeln!(writer, "{:-<60}", "")?;
        for diagnostic in &report.diagnostics {
            writeln!(
                writer,
                "  {}: {}",
                diagnostic.file.display(),
                diagnostic.message
            )?;
        }
        writeln!(writer)?;
    }

    match report.verdict {
        Verdict::Pass => writeln!(writer, "Verdict: PASS")?,
        Verdict::Fail => {
            writeln!(writer, "Verdict: FAIL")?;
            for reason in &report.reasons {
                writeln!(writer, "  - {reason}")?;
            }
        }
    }
    writeln!(writer)?;

    writeln!(
        writer,
        "Completed in {:.2}s",
        metadata.elapsed_ms as f64 / 1000.0
    )?;

    Ok(())
}

/// Write a field list, one path per line.
pub fn write_fields_text<W: Write>(writer: &mut W, fields: &FieldSet) -> Result<()> {
    for field in fields {
        writeln!(writer, "{field}")?;
    }
    Ok(())
}
