//! Sheet sources and the per-sheet loading contract.
//!
//! [`SheetSource`] abstracts where tabs come from (the Sheets API in
//! production, a CSV snapshot directory offline and in tests). [`load_all`]
//! applies per-sheet failure isolation: one tab failing to load never
//! aborts the others.

mod csv_dir;

pub use csv_dir::{CsvDirSource, write_sheet};

use anyhow::Result;
use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::sheets::{SheetError, SheetKind, SheetSet};
use crate::table::RawTable;

/// A provider of raw survey tabs.
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn fetch_sheet(&self, kind: SheetKind) -> Result<RawTable>;
}

#[async_trait]
impl SheetSource for Box<dyn SheetSource> {
    async fn fetch_sheet(&self, kind: SheetKind) -> Result<RawTable> {
        (**self).fetch_sheet(kind).await
    }
}

/// Fetches all four tabs, isolating failures per sheet.
///
/// A failed tab is recorded in [`SheetSet::errors`] and skipped; an empty
/// tab is kept (with a warning) so the caller can render its empty state.
#[tracing::instrument(skip(source))]
pub async fn load_all(source: &dyn SheetSource) -> SheetSet {
    let mut set = SheetSet::default();

    for kind in SheetKind::all() {
        match source.fetch_sheet(kind).await {
            Ok(table) => {
                if table.is_empty() {
                    warn!(sheet = %kind, "Sheet is empty");
                } else {
                    info!(sheet = %kind, rows = table.row_count(), "Sheet loaded");
                }
                set.tables.insert(kind, table);
            }
            Err(e) => {
                error!(sheet = %kind, error = %e, "Sheet load failed");
                set.errors.push(SheetError {
                    kind,
                    message: e.to_string(),
                });
            }
        }
    }

    set
}
