//! Catalog exporters, the inverse of [`crate::importers`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cablesel_core::Catalog;

use crate::importers::CatalogFormat;

/// Write the catalog as CSV with a header row.
pub fn write_catalog_csv(catalog: &Catalog, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_catalog_csv_to(catalog, file).with_context(|| format!("writing {}", path.display()))
}

/// Write CSV rows to any writer.
pub fn write_catalog_csv_to<W: Write>(catalog: &Catalog, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in catalog {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the catalog as a pretty-printed JSON array.
pub fn write_catalog_json(catalog: &Catalog, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, catalog)
        .with_context(|| format!("writing {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write in the format implied by the extension of `path`.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<CatalogFormat> {
    let format = CatalogFormat::require(path)?;
    match format {
        CatalogFormat::Csv => write_catalog_csv(catalog, path)?,
        CatalogFormat::Json => write_catalog_json(catalog, path)?,
    }
    Ok(format)
}
