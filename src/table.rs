//! In-memory representation of one worksheet tab.
//!
//! Every source (the Sheets API, a local CSV snapshot) is converted into a
//! [`RawTable`] before the pipeline touches it: a header row plus string
//! cells, exactly as the spreadsheet stores them.

/// A named grid of string cells with a header row.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Builds a table from a header row and data rows.
    ///
    /// Rows shorter than the header are padded with empty cells and rows
    /// longer than the header are truncated, so downstream code can index
    /// cells by column position without bounds checks.
    pub fn from_records(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by its exact header label.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_records_pads_short_rows() {
        let table = RawTable::from_records(
            cols(&["a", "b", "c"]),
            vec![vec!["1".to_string()], vec!["1".to_string(), "2".to_string()]],
        );

        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", ""]);
    }

    #[test]
    fn test_from_records_truncates_long_rows() {
        let table = RawTable::from_records(
            cols(&["a"]),
            vec![vec!["1".to_string(), "extra".to_string()]],
        );

        assert_eq!(table.rows[0], vec!["1"]);
    }

    #[test]
    fn test_column_index() {
        let table = RawTable::from_records(cols(&["a", "b"]), vec![]);

        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("z"), None);
        assert!(table.is_empty());
    }
}
