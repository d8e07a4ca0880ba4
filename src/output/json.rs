use crate::errors::Result;
use crate::path::FieldSet;
use crate::report::{
    AggregateRow, CoverageReport, FieldRow, FileDiagnostic, Metadata, Summary, Verdict,
};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    metadata: &'a Metadata,
    summary: &'a Summary,
    verdict: Verdict,
    reasons: &'a [String],
    fields: &'a [FieldRow],
    aggregated: &'a [AggregateRow],
    unknown_fields: &'a [String],
    diagnostics: &'a [FileDiagnostic],
}

#[derive(Debug, Serialize)]
struct FieldsOutput<'a> {
    count: usize,
    fields: &'a FieldSet,
}

/// Write a coverage report as JSON. `top_n` limits the field rows only;
/// the summary always reflects the whole schema.
pub fn write_report_json<W: Write>(
    writer: &mut W,
    report: &CoverageReport,
    top_n: Option<usize>,
) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &report_output(report, top_n))?;
    writeln!(writer)?;
    Ok(())
}

fn report_output(report: &CoverageReport, top_n: Option<usize>) -> ReportOutput<'_> {
    let limit = top_n.unwrap_or(report.fields.len()).min(report.fields.len());
    ReportOutput {
        metadata: &report.metadata,
        summary: &report.summary,
        verdict: report.verdict,
        reasons: &report.reasons,
        fields: &report.fields[..limit],
        aggregated: &report.aggregated,
        unknown_fields: &report.unknown_fields,
        diagnostics: &report.diagnostics,
    }
}

/// Write a field list as JSON.
pub fn write_fields_json<W: Write>(writer: &mut W, fields: &FieldSet) -> Result<()> {
    let output = FieldsOutput {
        count: fields.len(),
        fields,
    };
    serde_json::to_writer_pretty(&mut *writer, &output)?;
    writeln!(writer)?;
    Ok(())
}
