use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use cablesel_core::{CableRecord, Catalog};

/// Load a catalog from a CSV file with a header row.
///
/// Column names match [`CableRecord`] field names; optional values are left
/// empty when absent.
pub fn load_catalog_csv(path: &Path) -> Result<Catalog> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening catalog {}", path.display()))?;
    read_catalog_csv(file).with_context(|| format!("parsing catalog {}", path.display()))
}

/// Parse CSV catalog rows from any reader.
pub fn read_catalog_csv<R: Read>(reader: R) -> Result<Catalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in rdr.deserialize::<CableRecord>().enumerate() {
        // header is line 1
        let record = row.with_context(|| format!("reading catalog row {}", index + 2))?;
        records.push(record);
    }
    Ok(Catalog::new(records))
}
