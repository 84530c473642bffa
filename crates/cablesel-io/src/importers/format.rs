//! Catalog file format detection.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Result};
use cablesel_core::Catalog;

/// Supported catalog file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// One record per row with a header line
    Csv,
    /// Array of record objects
    Json,
}

impl CatalogFormat {
    pub const ALL: &'static [CatalogFormat] = &[CatalogFormat::Csv, CatalogFormat::Json];

    /// Expected file extensions for this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            CatalogFormat::Csv => &["csv"],
            CatalogFormat::Json => &["json"],
        }
    }

    pub fn friendly_name(&self) -> &'static str {
        match self {
            CatalogFormat::Csv => "CSV catalog",
            CatalogFormat::Json => "JSON catalog",
        }
    }

    /// Detect the format from the file extension, case-insensitively.
    pub fn detect(path: &Path) -> Option<CatalogFormat> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Like [`detect`](Self::detect) but an unknown extension is an error.
    pub fn require(path: &Path) -> Result<CatalogFormat> {
        match Self::detect(path) {
            Some(format) => Ok(format),
            None => bail!(
                "cannot tell catalog format of {} (expected .csv or .json)",
                path.display()
            ),
        }
    }

    pub fn load(&self, path: &Path) -> Result<Catalog> {
        match self {
            CatalogFormat::Csv => super::load_catalog_csv(path),
            CatalogFormat::Json => super::load_catalog_json(path),
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.friendly_name())
    }
}
