use std::path::Path;

use anyhow::{Context, Result};
use cablesel_core::{CableRecord, Catalog};

/// Load a catalog from a JSON array of records.
pub fn load_catalog_json(path: &Path) -> Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    parse_catalog_json(&text).with_context(|| format!("parsing catalog {}", path.display()))
}

pub fn parse_catalog_json(text: &str) -> Result<Catalog> {
    let records: Vec<CableRecord> = serde_json::from_str(text)?;
    Ok(Catalog::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_nulls_and_missing_optionals() {
        let text = r#"[
            {"id": 9, "designation": "3x16+10 mm2", "rated_voltage": "0.6/1 kV",
             "flat_ampacity": null, "trefoil_ampacity": 89, "resistance_per_km": 1.15,
             "inductance_trefoil_per_km": 0.264, "price_per_km": 640000}
        ]"#;
        let catalog = parse_catalog_json(text).unwrap();
        let cable = catalog.iter().next().unwrap();
        assert_eq!(cable.flat_ampacity, None);
        assert_eq!(cable.inductance_flat_per_km, None);
        assert_eq!(cable.trefoil_ampacity, Some(89.0));
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(parse_catalog_json(r#"{"id": 1}"#).is_err());
    }
}
