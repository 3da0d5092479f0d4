//! Turns a [`RawTable`] of spreadsheet strings into typed rows.
//!
//! Parsing is tolerant by contract: a bad timestamp or a non-numeric score
//! never fails the table, the cell just becomes missing. Scores outside the
//! 1–10 scale are discarded the same way, with a per-column count of what
//! was discarded.

use chrono::{NaiveDate, NaiveDateTime};

use crate::table::RawTable;

/// Header of the form-submission timestamp column.
pub const TIMESTAMP_COLUMN: &str = "Carimbo de data/hora";

/// Header of the respondent-subject identifier column.
pub const SUBJECT_COLUMN: &str = "COLABORADOR";

/// Identifier columns never subjected to numeric coercion.
const IDENTIFIER_COLUMNS: &[&str] = &[
    "AVALIADOR",
    "CARGO",
    "COLABORADOR",
    "CARGO DO COLABORADOR",
    "SETOR",
];

/// Free-text columns are prefixed with this label on every sheet.
const FREE_TEXT_PREFIX: &str = "OBSERVAÇÕES";

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// A normalized sheet: typed date, subject, and score cells, row-parallel.
///
/// `scores` is row-major and column-parallel to `columns`; exempt columns
/// (timestamp, identifiers, free text) always hold `None` there.
#[derive(Debug, Clone, Default)]
pub struct CleanTable {
    pub columns: Vec<String>,
    pub dates: Vec<Option<NaiveDate>>,
    pub subjects: Vec<Option<String>>,
    pub scores: Vec<Vec<Option<f64>>>,
    /// Per-column count of non-empty cells discarded by coercion.
    pub dropped: Vec<usize>,
}

impl CleanTable {
    pub fn row_count(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// All valid scores for one column, in row order.
    pub fn column_values(&self, col: usize) -> Vec<f64> {
        self.scores
            .iter()
            .filter_map(|row| row.get(col).copied().flatten())
            .collect()
    }
}

fn is_exempt(label: &str) -> bool {
    label == TIMESTAMP_COLUMN
        || IDENTIFIER_COLUMNS.contains(&label)
        || label.starts_with(FREE_TEXT_PREFIX)
}

/// Parses a form timestamp cell into a calendar date.
///
/// Google Forms in pt-BR locales writes `dd/mm/yyyy hh:mm:ss`; ISO dates
/// show up when rows were entered by hand. Anything else is `None`.
pub fn parse_timestamp(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, fmt) {
            return Some(dt.date());
        }
    }

    const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%Y-%m-%d"];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(cell, fmt) {
            return Some(d);
        }
    }

    None
}

/// Coerces an answer cell to a score on the 1–10 scale.
///
/// Tolerates a comma decimal separator. Non-numeric text and values outside
/// `[MIN_SCORE, MAX_SCORE]` are treated as missing.
pub fn parse_score(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    let value: f64 = cell.replace(',', ".").parse().ok()?;
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Normalizes a raw sheet into a [`CleanTable`].
///
/// Pure and infallible: every parse failure is demoted to a missing cell.
pub fn clean(raw: &RawTable) -> CleanTable {
    let timestamp_idx = raw.column_index(TIMESTAMP_COLUMN);
    let subject_idx = raw.column_index(SUBJECT_COLUMN);
    let exempt: Vec<bool> = raw.columns.iter().map(|c| is_exempt(c)).collect();

    let mut dates = Vec::with_capacity(raw.rows.len());
    let mut subjects = Vec::with_capacity(raw.rows.len());
    let mut scores = Vec::with_capacity(raw.rows.len());
    let mut dropped = vec![0usize; raw.columns.len()];

    for row in &raw.rows {
        dates.push(timestamp_idx.and_then(|i| parse_timestamp(&row[i])));
        subjects.push(subject_idx.and_then(|i| {
            let s = row[i].trim();
            (!s.is_empty()).then(|| s.to_string())
        }));

        let row_scores: Vec<Option<f64>> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                if exempt[col] {
                    return None;
                }
                let parsed = parse_score(cell);
                if parsed.is_none() && !cell.trim().is_empty() {
                    dropped[col] += 1;
                }
                parsed
            })
            .collect();
        scores.push(row_scores);
    }

    CleanTable {
        columns: raw.columns.clone(),
        dates,
        subjects,
        scores,
        dropped,
    }
}
