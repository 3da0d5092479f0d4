//! Offline sheet source backed by a directory of CSV snapshots.
//!
//! Layout is one file per tab, `<dir>/<TAB>.csv`, which is exactly what the
//! `snapshot` subcommand writes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::SheetSource;
use crate::sheets::SheetKind;
use crate::table::RawTable;

pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, kind: SheetKind) -> PathBuf {
        self.dir.join(format!("{}.csv", kind.as_tab_title()))
    }
}

#[async_trait]
impl SheetSource for CsvDirSource {
    async fn fetch_sheet(&self, kind: SheetKind) -> Result<RawTable> {
        let path = self.path_for(kind);
        debug!(path = %path.display(), "Reading sheet snapshot");

        let file = File::open(&path)
            .with_context(|| format!("no snapshot for sheet {kind} at {}", path.display()))?;

        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let columns: Vec<String> = rdr
            .headers()
            .context("snapshot has no header row")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(RawTable::from_records(columns, rows))
    }
}

/// Writes one tab to `<dir>/<TAB>.csv`, creating the directory as needed.
pub fn write_sheet(dir: &Path, kind: SheetKind, table: &RawTable) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.csv", kind.as_tab_title()));

    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot create snapshot {}", path.display()))?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = table.row_count(), "Snapshot written");
    Ok(())
}
