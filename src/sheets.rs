//! The four fixed worksheet tabs and the result of loading them.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::table::RawTable;

/// One of the four survey tabs in the shared spreadsheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SheetKind {
    Production,
    Administrative,
    Commercial,
    Climate,
}

impl SheetKind {
    pub fn all() -> [SheetKind; 4] {
        [
            SheetKind::Production,
            SheetKind::Administrative,
            SheetKind::Commercial,
            SheetKind::Climate,
        ]
    }

    /// Worksheet title as it appears in the spreadsheet.
    pub fn as_tab_title(&self) -> &'static str {
        match self {
            SheetKind::Production => "PRODUCTION",
            SheetKind::Administrative => "ADMINISTRATIVE",
            SheetKind::Commercial => "COMMERCIAL",
            SheetKind::Climate => "CLIMATE",
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tab_title())
    }
}

impl FromStr for SheetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PRODUCTION" => Ok(SheetKind::Production),
            "ADMINISTRATIVE" => Ok(SheetKind::Administrative),
            "COMMERCIAL" => Ok(SheetKind::Commercial),
            "CLIMATE" => Ok(SheetKind::Climate),
            other => Err(anyhow::anyhow!(
                "unknown sheet '{other}' (expected one of PRODUCTION, ADMINISTRATIVE, COMMERCIAL, CLIMATE)"
            )),
        }
    }
}

/// A failure to load one tab, recorded instead of aborting the whole load.
#[derive(Debug, Clone, Serialize)]
pub struct SheetError {
    pub kind: SheetKind,
    pub message: String,
}

/// Result of loading all four tabs.
///
/// Tabs that failed to load are absent from `tables` and present in
/// `errors`; an empty tab is present with zero rows.
#[derive(Debug, Default, Clone)]
pub struct SheetSet {
    pub tables: HashMap<SheetKind, RawTable>,
    pub errors: Vec<SheetError>,
}

impl SheetSet {
    pub fn table(&self, kind: SheetKind) -> Option<&RawTable> {
        self.tables.get(&kind)
    }

    pub fn error_for(&self, kind: SheetKind) -> Option<&SheetError> {
        self.errors.iter().find(|e| e.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_title_round_trip() {
        for kind in SheetKind::all() {
            let parsed: SheetKind = kind.as_tab_title().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let parsed: SheetKind = "climate".parse().unwrap();
        assert_eq!(parsed, SheetKind::Climate);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("PAYROLL".parse::<SheetKind>().is_err());
    }
}
