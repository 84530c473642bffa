use std::fmt;

use cablesel_core::{Arrangement, CableId, CableRecord};
use serde::Serialize;

use crate::format::format_optional;

/// Tabulated properties of one cable as shown when it is selected.
///
/// Unlike the circuit analysis, an absent inductance stays absent here
/// instead of falling back to the default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CableDetails {
    pub id: CableId,
    pub designation: String,
    pub rated_voltage: String,
    pub arrangement: Arrangement,
    pub resistance_per_km: f64,
    pub inductance_per_km: Option<f64>,
    pub capacitance_per_km: Option<f64>,
    pub base_ampacity: Option<f64>,
    pub price_per_km: f64,
}

impl CableDetails {
    pub fn for_cable(cable: &CableRecord, arrangement: Arrangement) -> Self {
        Self {
            id: cable.id,
            designation: cable.designation.clone(),
            rated_voltage: cable.rated_voltage.clone(),
            arrangement,
            resistance_per_km: cable.resistance_per_km,
            inductance_per_km: cable.inductance_for(arrangement),
            capacitance_per_km: cable.capacitance_per_km,
            base_ampacity: cable.base_ampacity(arrangement),
            price_per_km: cable.price_per_km,
        }
    }
}

impl fmt::Display for CableDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Selected Cable: {} - {}", self.designation, self.rated_voltage)?;
        writeln!(f, "Resistance: {} Ω/km", self.resistance_per_km)?;
        writeln!(f, "Inductance: {} mH/km", display_or_na(self.inductance_per_km))?;
        writeln!(f, "Capacitance: {} μF/km", display_or_na(self.capacitance_per_km))?;
        write!(f, "Base Capacity: {} A", display_or_na(self.base_ampacity))
    }
}

fn display_or_na(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format_optional(Some(v), 0),
        Some(v) => v.to_string(),
        None => format_optional(None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cablesel_core::Catalog;

    #[test]
    fn test_single_core_flat_and_trefoil() {
        let catalog = Catalog::builtin();
        let cable = catalog.get(CableId::new(6)).unwrap();

        let flat = CableDetails::for_cable(cable, Arrangement::Flat);
        assert_eq!(flat.inductance_per_km, Some(0.272));
        assert_eq!(flat.base_ampacity, Some(279.0));

        let trefoil = CableDetails::for_cable(cable, Arrangement::Trefoil);
        assert_eq!(trefoil.inductance_per_km, Some(0.341));
        assert_eq!(trefoil.base_ampacity, Some(237.0));
    }

    #[test]
    fn test_absent_values_render_na() {
        let catalog = Catalog::builtin();
        let cable = CableRecord {
            inductance_flat_per_km: None,
            inductance_trefoil_per_km: None,
            capacitance_per_km: None,
            ..catalog.get(CableId::new(6)).cloned().unwrap()
        };
        let details = CableDetails::for_cable(&cable, Arrangement::Flat);
        assert_eq!(details.inductance_per_km, None);
        let text = details.to_string();
        assert!(text.contains("Inductance: N/A mH/km"));
        assert!(text.contains("Capacitance: N/A μF/km"));
        assert!(text.contains("Base Capacity: 279 A"));
        assert!(text.contains("Resistance: 0.268 Ω/km"));
    }
}
