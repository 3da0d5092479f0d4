//! Aggregation and presentation of a filtered sheet.
//!
//! Builds per-question count/mean/distribution summaries, category means
//! (unweighted mean of per-column means), and a sheet-wide overall mean.
//! A filtered view with no rows is an informational empty state, never an
//! error. Pure and deterministic apart from the `generated_at` stamp.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::categories::{Category, categories_for};
use crate::normalize::CleanTable;
use crate::sheets::SheetKind;

/// Arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Summary of one question column over the filtered rows.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    /// One bucket per integer score, index 0 = score 1 .. index 9 = score 10.
    pub distribution: [usize; 10],
    /// Non-empty cells discarded by the normalizer for this column.
    pub dropped: usize,
}

/// Summary of one category of question columns.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub name: String,
    /// Unweighted mean of the per-column means. `None` when no column in
    /// the category has any valid value.
    pub mean: Option<f64>,
    pub columns: Vec<ColumnSummary>,
    /// Configured columns absent from the snapshot or without valid values.
    pub missing_columns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportState {
    Success,
    /// No rows matched the active filters. Informational, not an error.
    Empty,
}

/// Full report for one sheet under the active filters.
#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub sheet: SheetKind,
    pub generated_at: DateTime<Utc>,
    pub state: ReportState,
    pub total_responses: usize,
    pub categories: Vec<CategorySummary>,
    /// Unweighted mean over every per-column mean on the sheet.
    pub overall_mean: Option<f64>,
}

fn summarize_column(table: &CleanTable, label: &str) -> Option<ColumnSummary> {
    let col = table.column_index(label)?;
    let values = table.column_values(col);
    if values.is_empty() {
        return None;
    }

    let mut distribution = [0usize; 10];
    for v in &values {
        let bucket = (v.round() as usize).clamp(1, 10);
        distribution[bucket - 1] += 1;
    }

    Some(ColumnSummary {
        label: label.to_string(),
        count: values.len(),
        mean: mean(&values),
        distribution,
        dropped: table.dropped.get(col).copied().unwrap_or(0),
    })
}

fn summarize_category(table: &CleanTable, category: &Category) -> CategorySummary {
    let mut columns = Vec::new();
    let mut missing_columns = Vec::new();

    for label in category.columns {
        match summarize_column(table, label) {
            Some(summary) => columns.push(summary),
            None => missing_columns.push(label.to_string()),
        }
    }

    let column_means: Vec<f64> = columns.iter().map(|c| c.mean).collect();
    let category_mean = (!column_means.is_empty()).then(|| mean(&column_means));

    CategorySummary {
        name: category.name.to_string(),
        mean: category_mean,
        columns,
        missing_columns,
    }
}

/// Builds the report for `kind` over an already-filtered table.
#[tracing::instrument(skip(table), fields(sheet = %kind, rows = table.row_count()))]
pub fn build_report(kind: SheetKind, table: &CleanTable) -> SheetReport {
    let state = if table.is_empty() {
        ReportState::Empty
    } else {
        ReportState::Success
    };

    let categories: Vec<CategorySummary> = categories_for(kind)
        .iter()
        .map(|c| summarize_category(table, c))
        .collect();

    // Overall mean is column-weighted, not category-weighted: one entry per
    // question column, matching how the production dashboard computed it.
    let all_column_means: Vec<f64> = categories
        .iter()
        .flat_map(|c| c.columns.iter().map(|col| col.mean))
        .collect();
    let overall_mean = (!all_column_means.is_empty()).then(|| mean(&all_column_means));

    SheetReport {
        sheet: kind,
        generated_at: Utc::now(),
        state,
        total_responses: table.row_count(),
        categories,
        overall_mean,
    }
}

/// Renders a report as a plain-text document with ASCII distribution bars.
pub fn render_text(report: &SheetReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {} — performance report", report.sheet);
    let _ = writeln!(
        out,
        "Generated {} | {} responses",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.total_responses
    );

    if report.state == ReportState::Empty {
        let _ = writeln!(out);
        let _ = writeln!(out, "No responses match the active filters.");
        return out;
    }

    for category in &report.categories {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {}", category.name);

        for col in &category.columns {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} — mean {:.2} over {} answers",
                col.label.trim(),
                col.mean,
                col.count
            );
            if col.dropped > 0 {
                let _ = writeln!(out, "  ({} invalid answers discarded)", col.dropped);
            }
            for (i, &n) in col.distribution.iter().enumerate() {
                if n > 0 {
                    let _ = writeln!(out, "  {:>2} | {} {}", i + 1, "#".repeat(n.min(60)), n);
                }
            }
        }

        if !category.missing_columns.is_empty() {
            let _ = writeln!(
                out,
                "  {} configured question(s) with no data in this view",
                category.missing_columns.len()
            );
        }

        match category.mean {
            Some(m) => {
                let _ = writeln!(out);
                let _ = writeln!(out, "Category mean: {m:.2}");
            }
            None => {
                let _ = writeln!(out, "No valid answers in this category.");
            }
        }
    }

    let _ = writeln!(out);
    match report.overall_mean {
        Some(m) => {
            let _ = writeln!(out, "## Overall mean: {m:.2}");
        }
        None => {
            let _ = writeln!(out, "## No valid answers on this sheet.");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::clean;
    use crate::table::RawTable;

    fn raw(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::from_records(
            columns.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn test_column_summary_excludes_invalid_scores() {
        // [7, 9, "n/a"] → count 2, mean 8.0
        let table = clean(&raw(
            &["Satisfação pelas atividades realizadas"],
            &[&["7"], &["9"], &["n/a"]],
        ));
        let summary = summarize_column(&table, "Satisfação pelas atividades realizadas").unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 8.0);
        assert_eq!(summary.distribution[6], 1); // one 7
        assert_eq!(summary.distribution[8], 1); // one 9
        assert_eq!(summary.dropped, 1);
    }

    #[test]
    fn test_column_summary_absent_or_empty_is_none() {
        let table = clean(&raw(&["Iniciativa"], &[&["n/a"]]));

        assert!(summarize_column(&table, "Iniciativa").is_none());
        assert!(summarize_column(&table, "No such column").is_none());
    }

    #[test]
    fn test_category_mean_is_unweighted() {
        // Column means {8, 6, 10} with very different row counts → 8.0
        let table = clean(&raw(
            &["Treinamento para desempenhar as suas atividades (em sala ou no local de trabalho)",
              "Conhecimento e habilidade para execução das tarefas",
              "Possibilidade de crescimento dentro da empresa"],
            &[
                &["8", "6", "10"],
                &["8", "6", ""],
                &["8", "", ""],
                &["8", "", ""],
            ],
        ));
        let report = build_report(SheetKind::Climate, &table);
        let category = &report.categories[0];

        assert_eq!(category.mean, Some(8.0));
        assert_eq!(report.overall_mean, Some(8.0));
        // the other 15 configured climate questions have no data here
        assert_eq!(category.missing_columns.len(), 15);
    }

    #[test]
    fn test_empty_table_reports_empty_state() {
        let report = build_report(SheetKind::Climate, &CleanTable::default());

        assert_eq!(report.state, ReportState::Empty);
        assert_eq!(report.total_responses, 0);
        assert_eq!(report.overall_mean, None);

        let text = render_text(&report);
        assert!(text.contains("No responses match the active filters."));
    }

    #[test]
    fn test_report_is_deterministic() {
        let table = clean(&raw(
            &["Satisfação pelas atividades realizadas"],
            &[&["7"], &["9"]],
        ));

        let a = build_report(SheetKind::Climate, &table);
        let b = build_report(SheetKind::Climate, &table);

        assert_eq!(a.overall_mean, b.overall_mean);
        assert_eq!(a.total_responses, b.total_responses);
        assert_eq!(a.categories[0].mean, b.categories[0].mean);
        assert_eq!(
            a.categories[0].columns[0].distribution,
            b.categories[0].columns[0].distribution
        );
    }

    #[test]
    fn test_render_text_success() {
        let table = clean(&raw(
            &["Satisfação pelas atividades realizadas"],
            &[&["7"], &["7"], &["9"]],
        ));
        let report = build_report(SheetKind::Climate, &table);
        let text = render_text(&report);

        assert!(text.contains("CLIMATE"));
        assert!(text.contains("mean 7.67 over 3 answers"));
        assert!(text.contains(" 7 | ## 2"));
    }
}
