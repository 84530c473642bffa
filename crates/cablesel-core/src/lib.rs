//! # cablesel-core: Cable Catalog and Load Model
//!
//! Provides the data structures shared by every stage of power cable selection.
//!
//! ## Design Philosophy
//!
//! A cable run is sized from two inputs:
//! - **Catalog**: an immutable reference table of [`CableRecord`]s, loaded once
//!   and shared read-only
//! - **Load**: a [`LoadSpec`] describing the three-phase load and the
//!   installation (topology, arrangement, parallel circuits, ambient temperature)
//!
//! Fields that only apply to one cable topology (flat rating, flat inductance,
//! capacitance on low-voltage cables) are `Option`s, so "not applicable" is an
//! explicit, checkable state.
//!
//! ## Quick Start
//!
//! ```rust
//! use cablesel_core::*;
//!
//! let catalog = Catalog::builtin();
//! let cable = catalog.get(CableId::new(6)).unwrap();
//!
//! assert_eq!(cable.designation, "1x70 mm2");
//! assert_eq!(cable.topology(), Topology::SingleCore);
//! assert_eq!(cable.base_ampacity(Arrangement::Flat), Some(279.0));
//! assert_eq!(cable.voltage_class().unwrap().qualifying_kv(), 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The reference table and its validation
//! - [`load`] - Load specification, normalization, and raw text input
//! - [`voltage`] - Rated-voltage class parsing (`"6/10 kV"`)
//! - [`units`] - Unit newtypes (MW, MVar, kV, A, km, °C)
//! - [`diagnostics`] - Validation issue collection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod load;
pub mod units;
pub mod voltage;

pub use catalog::Catalog;
pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{CableError, CableResult};
pub use load::{LoadSpec, RawLoadInput};
pub use units::{
    Amperes, Celsius, Degrees, Kilometers, Kilovolts, Megavars, MegavoltAmperes, Megawatts,
    Radians,
};
pub use voltage::VoltageClass;

/// Designation prefix carried by every single-core cable (e.g. "1x95 mm2").
pub const SINGLE_CORE_MARKER: &str = "1x";

/// Catalog identifier of a cable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CableId(u32);

impl CableId {
    #[inline]
    pub fn new(value: u32) -> Self {
        CableId(value)
    }
    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cable construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// One conductor per cable; a circuit needs three cables
    SingleCore,
    /// Three conductors in one sheath; a circuit needs one cable
    ThreeCore,
}

impl Topology {
    /// Physical cables per three-phase circuit. Also the number of trench
    /// positions one circuit occupies.
    pub fn cables_per_circuit(self) -> u32 {
        match self {
            Topology::SingleCore => 3,
            Topology::ThreeCore => 1,
        }
    }

    /// Upper bound on parallel circuits for this topology.
    pub fn max_parallel_circuits(self) -> u32 {
        match self {
            Topology::SingleCore => 2,
            Topology::ThreeCore => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Topology::SingleCore => "Single-core",
            Topology::ThreeCore => "Three-core",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Topology {
    type Err = CableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "singlecore" | "single" | "1c" => Ok(Topology::SingleCore),
            "threecore" | "three" | "3c" => Ok(Topology::ThreeCore),
            _ => Err(CableError::InvalidInput(format!(
                "unknown cable topology '{s}' (expected single-core or three-core)"
            ))),
        }
    }
}

/// Laying arrangement of single-core cables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arrangement {
    /// Side by side
    Flat,
    /// Triangular bundle
    Trefoil,
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arrangement::Flat => f.write_str("Flat"),
            Arrangement::Trefoil => f.write_str("Trefoil"),
        }
    }
}

impl FromStr for Arrangement {
    type Err = CableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "flat" => Ok(Arrangement::Flat),
            "trefoil" => Ok(Arrangement::Trefoil),
            _ => Err(CableError::InvalidInput(format!(
                "unknown arrangement '{s}' (expected flat or trefoil)"
            ))),
        }
    }
}

/// Consumer category; drives the assumed daily operating hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadCategory {
    Industrial,
    Residential,
    Commercial,
    Municipal,
}

impl LoadCategory {
    pub const ALL: [LoadCategory; 4] = [
        LoadCategory::Industrial,
        LoadCategory::Residential,
        LoadCategory::Commercial,
        LoadCategory::Municipal,
    ];
}

impl fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoadCategory::Industrial => "Industrial",
            LoadCategory::Residential => "Residential",
            LoadCategory::Commercial => "Commercial",
            LoadCategory::Municipal => "Municipal",
        };
        f.write_str(name)
    }
}

impl FromStr for LoadCategory {
    type Err = CableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "industrial" => Ok(LoadCategory::Industrial),
            "residential" => Ok(LoadCategory::Residential),
            "commercial" => Ok(LoadCategory::Commercial),
            "municipal" => Ok(LoadCategory::Municipal),
            _ => Err(CableError::InvalidInput(format!("unknown load category '{s}'"))),
        }
    }
}

fn normalize_token(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// One entry of the cable reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableRecord {
    pub id: CableId,
    /// Conductor designation, e.g. "3x95+50 mm2"; single-core cables start with "1x"
    pub designation: String,
    /// Voltage class text, e.g. "6/10 kV"
    pub rated_voltage: String,
    /// Current rating for single-core cables laid flat (A)
    pub flat_ampacity: Option<f64>,
    /// Current rating for trefoil single-core and all three-core cables (A)
    pub trefoil_ampacity: Option<f64>,
    /// Conductor resistance (Ω/km)
    pub resistance_per_km: f64,
    /// Inductance in flat formation (mH/km)
    pub inductance_flat_per_km: Option<f64>,
    /// Inductance in trefoil formation (mH/km)
    pub inductance_trefoil_per_km: Option<f64>,
    /// Capacitance (μF/km)
    pub capacitance_per_km: Option<f64>,
    /// Price per km of cable
    pub price_per_km: f64,
}

impl CableRecord {
    pub fn topology(&self) -> Topology {
        if self.designation.trim_start().starts_with(SINGLE_CORE_MARKER) {
            Topology::SingleCore
        } else {
            Topology::ThreeCore
        }
    }

    pub fn is_single_core(&self) -> bool {
        self.topology() == Topology::SingleCore
    }

    /// Parse the rated-voltage class of this record.
    pub fn voltage_class(&self) -> CableResult<VoltageClass> {
        self.rated_voltage.parse()
    }

    /// Rating that applies to the given arrangement.
    ///
    /// Single-core cables laid flat use the flat rating; every other case uses
    /// the trefoil (general purpose) rating.
    pub fn base_ampacity(&self, arrangement: Arrangement) -> Option<f64> {
        match (self.topology(), arrangement) {
            (Topology::SingleCore, Arrangement::Flat) => self.flat_ampacity,
            _ => self.trefoil_ampacity,
        }
    }

    /// Tabulated inductance for the given arrangement, if the table has one.
    ///
    /// Single-core flat falls back to the trefoil value when no flat value is
    /// tabulated; three-core always uses the trefoil value.
    pub fn inductance_for(&self, arrangement: Arrangement) -> Option<f64> {
        match (self.topology(), arrangement) {
            (Topology::SingleCore, Arrangement::Flat) => self
                .inductance_flat_per_km
                .or(self.inductance_trefoil_per_km),
            _ => self.inductance_trefoil_per_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(designation: &str) -> CableRecord {
        CableRecord {
            id: CableId::new(1),
            designation: designation.to_string(),
            rated_voltage: "0.6/1 kV".to_string(),
            flat_ampacity: Some(100.0),
            trefoil_ampacity: Some(90.0),
            resistance_per_km: 0.5,
            inductance_flat_per_km: None,
            inductance_trefoil_per_km: Some(0.35),
            capacitance_per_km: None,
            price_per_km: 1000.0,
        }
    }

    #[test]
    fn test_topology_from_designation() {
        assert_eq!(record("1x95 mm2").topology(), Topology::SingleCore);
        assert_eq!(record("3x95+50 mm2").topology(), Topology::ThreeCore);
        assert_eq!(record("3x185 mm2").topology(), Topology::ThreeCore);
    }

    #[test]
    fn test_base_ampacity_by_arrangement() {
        let single = record("1x95 mm2");
        assert_eq!(single.base_ampacity(Arrangement::Flat), Some(100.0));
        assert_eq!(single.base_ampacity(Arrangement::Trefoil), Some(90.0));

        // Three-core ignores arrangement
        let three = record("3x95 mm2");
        assert_eq!(three.base_ampacity(Arrangement::Flat), Some(90.0));
    }

    #[test]
    fn test_inductance_falls_back_to_trefoil() {
        let single = record("1x95 mm2");
        assert_eq!(single.inductance_for(Arrangement::Flat), Some(0.35));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Single-core".parse::<Topology>().unwrap(), Topology::SingleCore);
        assert_eq!("three_core".parse::<Topology>().unwrap(), Topology::ThreeCore);
        assert_eq!("TREFOIL".parse::<Arrangement>().unwrap(), Arrangement::Trefoil);
        assert_eq!(
            " municipal ".parse::<LoadCategory>().unwrap(),
            LoadCategory::Municipal
        );
        assert!("hexagonal".parse::<Arrangement>().is_err());
    }

    #[test]
    fn test_topology_bounds() {
        assert_eq!(Topology::SingleCore.max_parallel_circuits(), 2);
        assert_eq!(Topology::ThreeCore.max_parallel_circuits(), 6);
        assert_eq!(Topology::SingleCore.cables_per_circuit(), 3);
        assert_eq!(Topology::ThreeCore.cables_per_circuit(), 1);
    }
}
