//! Coverage report model shared by the text, JSON and CSV writers.

use crate::config::CoverageSettings;
use crate::coverage::Coverage;
use crate::path;
use crate::query::UsageIndex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub metadata: Metadata,
    pub summary: Summary,
    pub verdict: Verdict,
    pub reasons: Vec<String>,
    /// One row per schema field, most used first.
    pub fields: Vec<FieldRow>,
    /// Usage grouped by path prefix of `metadata.depth` segments.
    pub aggregated: Vec<AggregateRow>,
    /// Fields used by queries that the schema does not define.
    pub unknown_fields: Vec<String>,
    pub diagnostics: Vec<FileDiagnostic>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub schema: PathBuf,
    pub queries: PathBuf,
    pub query_root: String,
    pub mutation_root: Option<String>,
    pub only_leafs: bool,
    pub normalize: bool,
    pub depth: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub operations: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Rounded to two decimals.
    pub coverage_percentage: f64,
    pub total_fields: usize,
    pub covered_fields: usize,
    pub uncovered_fields: usize,
    pub used_fields: usize,
    pub unknown_fields: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub field: String,
    pub usage_count: usize,
    pub covered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub field: String,
    pub usage_count: usize,
    pub fields: usize,
    pub covered_fields: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    ParseError,
    MissingFragment,
    FragmentCycle,
    ExpansionLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDiagnostic {
    pub file: PathBuf,
    pub kind: DiagnosticKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl CoverageReport {
    /// Assemble a report from the computed coverage.
    ///
    /// `usage` must have been built with the same `normalize` setting as
    /// `coverage` so usage counts line up with the compared field names.
    pub fn build(
        metadata: Metadata,
        coverage: &Coverage,
        usage: &UsageIndex,
        settings: &CoverageSettings,
        diagnostics: Vec<FileDiagnostic>,
    ) -> Self {
        let mut fields: Vec<FieldRow> = coverage
            .covered
            .iter()
            .map(|f| (f, true))
            .chain(coverage.uncovered.iter().map(|f| (f, false)))
            .map(|(field, covered)| FieldRow {
                field: field.clone(),
                usage_count: usage.count(field),
                covered,
            })
            .collect();
        fields.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then_with(|| a.field.cmp(&b.field))
        });

        let unknown_fields: Vec<String> = usage
            .used_fields
            .iter()
            .filter(|f| !coverage.covered.contains(*f) && !coverage.uncovered.contains(*f))
            .cloned()
            .collect();

        let total = coverage.covered.len() + coverage.uncovered.len();
        let summary = Summary {
            coverage_percentage: (coverage.percentage * 100.0).round() / 100.0,
            total_fields: total,
            covered_fields: coverage.covered.len(),
            uncovered_fields: coverage.uncovered.len(),
            used_fields: usage.used_fields.len(),
            unknown_fields: unknown_fields.len(),
        };

        let aggregated = aggregate(&fields, settings.depth);
        let (verdict, reasons) = evaluate(coverage.percentage, &unknown_fields, settings);

        CoverageReport {
            metadata,
            summary,
            verdict,
            reasons,
            fields,
            aggregated,
            unknown_fields,
            diagnostics,
        }
    }
}

/// Group rows by their first `depth` path segments, summing usage counts.
/// A depth of zero disables aggregation.
pub fn aggregate(rows: &[FieldRow], depth: usize) -> Vec<AggregateRow> {
    if depth == 0 {
        return Vec::new();
    }

    let mut groups: BTreeMap<&str, AggregateRow> = BTreeMap::new();
    for row in rows {
        let prefix = path::truncate(&row.field, depth);
        let group = groups.entry(prefix).or_insert_with(|| AggregateRow {
            field: prefix.to_string(),
            usage_count: 0,
            fields: 0,
            covered_fields: 0,
        });
        group.usage_count += row.usage_count;
        group.fields += 1;
        if row.covered {
            group.covered_fields += 1;
        }
    }

    let mut aggregated: Vec<AggregateRow> = groups.into_values().collect();
    aggregated.sort_by(|a, b| {
        b.usage_count
            .cmp(&a.usage_count)
            .then_with(|| a.field.cmp(&b.field))
    });
    aggregated
}

fn evaluate(
    percentage: f64,
    unknown_fields: &[String],
    settings: &CoverageSettings,
) -> (Verdict, Vec<String>) {
    let mut reasons = Vec::new();

    if let Some(threshold) = settings.fail_under {
        if percentage < threshold {
            reasons.push(format!(
                "coverage {percentage:.2}% is below the required {threshold:.2}%"
            ));
        }
    }
    if settings.strict && !unknown_fields.is_empty() {
        reasons.push(format!(
            "{} used field(s) are not defined in the schema",
            unknown_fields.len()
        ));
    }

    let verdict = if reasons.is_empty() {
        Verdict::Pass
    } else {
        Verdict::Fail
    };
    (verdict, reasons)
}
