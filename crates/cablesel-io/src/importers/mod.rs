//! Catalog importers.
//!
//! A catalog file is either CSV or JSON; [`load_catalog`] picks the parser
//! from the extension and [`import_catalog`] additionally validates the
//! records.

use std::path::Path;

use anyhow::Result;

mod csv;
mod format;
mod json;

pub use self::csv::{load_catalog_csv, read_catalog_csv};
pub use self::format::CatalogFormat;
pub use self::json::{load_catalog_json, parse_catalog_json};

use crate::ImportResult;

/// Load a catalog file, choosing the format by extension.
pub fn load_catalog(path: &Path) -> Result<cablesel_core::Catalog> {
    CatalogFormat::require(path)?.load(path)
}

/// Load and validate a catalog file.
///
/// Invariant violations are returned as diagnostics, not as an error.
pub fn import_catalog(path: &Path) -> Result<ImportResult> {
    let catalog = load_catalog(path)?;
    let diagnostics = catalog.validate();
    Ok(ImportResult {
        catalog,
        diagnostics,
    })
}
