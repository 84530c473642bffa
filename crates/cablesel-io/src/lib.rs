//! # cablesel-io: Cable Catalog I/O
//!
//! Load cable reference tables from CSV or JSON files and write them back
//! out. The built-in table in [`cablesel_core::Catalog::builtin`] needs none
//! of this; files are only for replacing or extending it.
//!
//! ## Formats
//!
//! | Format | Extension | Layout |
//! |--------|-----------|--------|
//! | CSV | `.csv` | header row, one record per line, empty cell for an absent value |
//! | JSON | `.json` | array of record objects, `null` or missing key for an absent value |
//!
//! Columns and keys are `id`, `designation`, `rated_voltage`,
//! `flat_ampacity`, `trefoil_ampacity`, `resistance_per_km`,
//! `inductance_flat_per_km`, `inductance_trefoil_per_km`,
//! `capacitance_per_km` and `price_per_km`.
//!
//! ## Example
//!
//! ```no_run
//! use cablesel_io::importers::import_catalog;
//!
//! let result = import_catalog(std::path::Path::new("cables.csv"))?;
//! if result.diagnostics.has_errors() {
//!     eprintln!("{}", result.diagnostics.summary());
//! }
//! println!("{} cables", result.catalog.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod exporters;
pub mod importers;

use cablesel_core::{Catalog, Diagnostics};

pub use exporters::{write_catalog, write_catalog_csv, write_catalog_json};
pub use importers::{import_catalog, load_catalog, load_catalog_csv, load_catalog_json, CatalogFormat};

/// A loaded catalog together with its validation findings.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub catalog: Catalog,
    pub diagnostics: Diagnostics,
}
