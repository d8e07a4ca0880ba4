use crate::errors::Result;
use crate::report::CoverageReport;
use std::io::Write;

pub const HEADER: &str = "Field,Usage Count,Covered";

/// Write every field row of a report as CSV, most used first.
pub fn write_report_csv<W: Write>(writer: &mut W, report: &CoverageReport) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    for row in &report.fields {
        writeln!(
            writer,
            "{},{},{}",
            escape(&row.field),
            row.usage_count,
            row.covered
        )?;
    }
    Ok(())
}

fn escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
