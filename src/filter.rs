//! Row filtering over a [`CleanTable`].
//!
//! Filters are recomputed per request and never persisted; the output is a
//! stable subsequence of the input rows.

use chrono::NaiveDate;

use crate::normalize::CleanTable;

/// Sentinel subject meaning "do not filter by subject".
pub const ALL_SUBJECTS: &str = "All";

/// Active filter predicates. Absent fields disable the predicate.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub subject: Option<String>,
}

impl RowFilter {
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        subject: Option<String>,
    ) -> Self {
        // "All" is what the subject selector reports when nothing is picked.
        let subject = subject.filter(|s| s != ALL_SUBJECTS);
        Self {
            start,
            end,
            subject,
        }
    }

    fn date_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    fn matches(&self, date: Option<NaiveDate>, subject: Option<&str>) -> bool {
        if self.date_active() {
            // A row with no parseable date cannot satisfy a date predicate.
            let Some(date) = date else { return false };
            if self.start.is_some_and(|start| date < start) {
                return false;
            }
            if self.end.is_some_and(|end| date > end) {
                return false;
            }
        }

        if let Some(wanted) = &self.subject {
            return subject == Some(wanted.as_str());
        }

        true
    }

    /// Returns the subset of rows satisfying all active predicates.
    pub fn apply(&self, table: &CleanTable) -> CleanTable {
        let keep: Vec<usize> = (0..table.row_count())
            .filter(|&i| self.matches(table.dates[i], table.subjects[i].as_deref()))
            .collect();

        CleanTable {
            columns: table.columns.clone(),
            dates: keep.iter().map(|&i| table.dates[i]).collect(),
            subjects: keep.iter().map(|&i| table.subjects[i].clone()).collect(),
            scores: keep.iter().map(|&i| table.scores[i].clone()).collect(),
            dropped: table.dropped.clone(),
        }
    }
}

/// Minimum and maximum observed dates, used to bound the UI date pickers.
pub fn date_bounds(table: &CleanTable) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = table.dates.iter().flatten();
    let first = *dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), &d| {
        (min.min(d), max.max(d))
    });
    Some((min, max))
}

/// Sorted distinct subject identifiers, used to populate the selector.
pub fn subjects(table: &CleanTable) -> Vec<String> {
    let mut out: Vec<String> = table.subjects.iter().flatten().cloned().collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{TIMESTAMP_COLUMN, clean};
    use crate::table::RawTable;

    fn table() -> CleanTable {
        let raw = RawTable::from_records(
            vec![
                TIMESTAMP_COLUMN.to_string(),
                "COLABORADOR".to_string(),
                "Iniciativa".to_string(),
            ],
            vec![
                vec!["01/03/2024 09:00:00".into(), "Ana".into(), "8".into()],
                vec!["15/03/2024 10:00:00".into(), "Bruno".into(), "6".into()],
                vec!["30/03/2024 11:00:00".into(), "Ana".into(), "10".into()],
                vec!["bad date".into(), "Carla".into(), "7".into()],
            ],
        );
        clean(&raw)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_no_predicates_keeps_everything() {
        let filtered = RowFilter::default().apply(&table());
        assert_eq!(filtered.row_count(), 4);
    }

    #[test]
    fn test_date_range_inclusive() {
        let filter = RowFilter::new(Some(d(2024, 3, 1)), Some(d(2024, 3, 15)), None);
        let filtered = filter.apply(&table());

        assert_eq!(filtered.row_count(), 2);
        assert_eq!(filtered.subjects[0].as_deref(), Some("Ana"));
        assert_eq!(filtered.subjects[1].as_deref(), Some("Bruno"));
    }

    #[test]
    fn test_date_filter_excludes_undated_rows() {
        let filter = RowFilter::new(Some(d(2024, 1, 1)), Some(d(2024, 12, 31)), None);
        let filtered = filter.apply(&table());
        // Carla's row has no parseable date
        assert_eq!(filtered.row_count(), 3);
    }

    #[test]
    fn test_disjoint_range_is_empty() {
        let filter = RowFilter::new(Some(d(2025, 1, 1)), Some(d(2025, 2, 1)), None);
        assert!(filter.apply(&table()).is_empty());
    }

    #[test]
    fn test_subject_exact_match() {
        let filter = RowFilter::new(None, None, Some("Ana".to_string()));
        let filtered = filter.apply(&table());

        assert_eq!(filtered.row_count(), 2);
        assert!(filtered.subjects.iter().all(|s| s.as_deref() == Some("Ana")));
    }

    #[test]
    fn test_all_sentinel_disables_subject_filter() {
        let filter = RowFilter::new(None, None, Some(ALL_SUBJECTS.to_string()));
        assert_eq!(filter.apply(&table()).row_count(), 4);
    }

    #[test]
    fn test_date_bounds() {
        assert_eq!(date_bounds(&table()), Some((d(2024, 3, 1), d(2024, 3, 30))));
        assert_eq!(date_bounds(&CleanTable::default()), None);
    }

    #[test]
    fn test_subjects_sorted_distinct() {
        assert_eq!(subjects(&table()), vec!["Ana", "Bruno", "Carla"]);
    }
}
