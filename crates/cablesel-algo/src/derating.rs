//! Ampacity derating for installation conditions.
//!
//! Tabulated ratings assume a 20 °C ground and a single circuit in the trench.
//! Two multiplicative corrections adjust them:
//!
//! | Ambient (°C) | 5 | 10 | 15 | 20 | 25 | 30 | 35 | 40 |
//! |--------------|------|------|------|------|------|------|------|------|
//! | factor       | 1.15 | 1.10 | 1.05 | 1.00 | 0.95 | 0.90 | 0.85 | 0.80 |
//!
//! | Cables in trench | 1 | 2 | 3 | 4 | 5 | 6 |
//! |------------------|------|------|------|------|------|------|
//! | factor           | 1.00 | 0.90 | 0.85 | 0.80 | 0.75 | 0.70 |
//!
//! Temperatures between grid points take the factor of the next grid point
//! at or above them (no interpolation).
//!
//! Single-core circuits occupy three trench positions each. The position
//! count is capped at six before the trench lookup, so installations with
//! more than six physical cables are derated as if they had six. This cap is
//! a known simplification of the source tables and is kept deliberately.

use cablesel_core::units::Celsius;
use cablesel_core::{LoadSpec, Topology};
use serde::Serialize;

/// Ambient temperature grid (°C) and its correction factors.
pub const TEMPERATURE_TABLE: [(f64, f64); 8] = [
    (5.0, 1.15),
    (10.0, 1.10),
    (15.0, 1.05),
    (20.0, 1.00),
    (25.0, 0.95),
    (30.0, 0.90),
    (35.0, 0.85),
    (40.0, 0.80),
];

/// Grouping factors indexed by cables in trench minus one.
pub const TRENCH_TABLE: [f64; 6] = [1.00, 0.90, 0.85, 0.80, 0.75, 0.70];

/// Trench positions beyond which no further grouping derating is applied.
pub const MAX_TRENCH_POSITIONS: u32 = 6;

/// Ambient temperature correction factor.
///
/// Clamps below 5 °C to 1.15 and above 40 °C to 0.80. A NaN temperature is
/// treated as the 20 °C reference.
pub fn temperature_factor(ambient: Celsius) -> f64 {
    let t = ambient.value();
    if t.is_nan() {
        return 1.0;
    }
    let (first_temp, first_factor) = TEMPERATURE_TABLE[0];
    let (last_temp, last_factor) = TEMPERATURE_TABLE[TEMPERATURE_TABLE.len() - 1];
    if t <= first_temp {
        return first_factor;
    }
    if t >= last_temp {
        return last_factor;
    }
    TEMPERATURE_TABLE
        .iter()
        .find(|(grid, _)| *grid >= t)
        .map(|(_, factor)| *factor)
        .unwrap_or(last_factor)
}

/// Grouping correction for `num_cables` in one trench, clamped to [1, 6].
pub fn trench_factor(num_cables: u32) -> f64 {
    let n = num_cables.clamp(1, MAX_TRENCH_POSITIONS);
    TRENCH_TABLE[(n - 1) as usize]
}

/// Trench positions used by `parallel_circuits`, capped at six.
pub fn effective_cables_in_trench(parallel_circuits: u32, topology: Topology) -> u32 {
    parallel_circuits
        .saturating_mul(topology.cables_per_circuit())
        .min(MAX_TRENCH_POSITIONS)
}

/// `base × temperature factor × trench factor`.
pub fn derated_ampacity(
    base: f64,
    ambient: Celsius,
    parallel_circuits: u32,
    topology: Topology,
) -> f64 {
    DeratingFactors::new(ambient, parallel_circuits, topology).apply(base)
}

/// The correction factors in effect for one installation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeratingFactors {
    pub temperature: f64,
    pub trench: f64,
    /// Trench positions after the six-position cap
    pub cables_in_trench: u32,
}

impl DeratingFactors {
    pub fn new(ambient: Celsius, parallel_circuits: u32, topology: Topology) -> Self {
        let cables_in_trench = effective_cables_in_trench(parallel_circuits, topology);
        Self {
            temperature: temperature_factor(ambient),
            trench: trench_factor(cables_in_trench),
            cables_in_trench,
        }
    }

    /// Factors for a load spec, after normalization.
    pub fn for_spec(spec: &LoadSpec) -> Self {
        let spec = spec.normalized();
        Self::new(spec.ambient_temp, spec.parallel_circuits, spec.topology)
    }

    pub fn combined(&self) -> f64 {
        self.temperature * self.trench
    }

    pub fn apply(&self, base: f64) -> f64 {
        base * self.combined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_factor_grid_points() {
        for (t, f) in TEMPERATURE_TABLE {
            assert_eq!(temperature_factor(Celsius(t)), f, "at {t} °C");
        }
    }

    #[test]
    fn test_temperature_factor_rounds_up() {
        assert_eq!(temperature_factor(Celsius(37.0)), 0.80);
        assert_eq!(temperature_factor(Celsius(20.1)), 0.95);
        assert_eq!(temperature_factor(Celsius(5.5)), 1.10);
    }

    #[test]
    fn test_temperature_factor_clamps() {
        assert_eq!(temperature_factor(Celsius(-20.0)), 1.15);
        assert_eq!(temperature_factor(Celsius(65.0)), 0.80);
        assert_eq!(temperature_factor(Celsius(f64::NAN)), 1.0);
    }

    #[test]
    fn test_trench_factor_table_and_clamp() {
        assert_eq!(trench_factor(1), 1.00);
        assert_eq!(trench_factor(4), 0.80);
        assert_eq!(trench_factor(6), 0.70);
        assert_eq!(trench_factor(0), 1.00);
        assert_eq!(trench_factor(12), 0.70);
    }

    #[test]
    fn test_effective_cables_capped() {
        assert_eq!(effective_cables_in_trench(1, Topology::SingleCore), 3);
        assert_eq!(effective_cables_in_trench(2, Topology::SingleCore), 6);
        assert_eq!(effective_cables_in_trench(3, Topology::SingleCore), 6);
        assert_eq!(effective_cables_in_trench(4, Topology::ThreeCore), 4);
        assert_eq!(effective_cables_in_trench(8, Topology::ThreeCore), 6);
    }

    #[test]
    fn test_derated_ampacity() {
        let derated = derated_ampacity(279.0, Celsius(20.0), 2, Topology::SingleCore);
        assert!((derated - 195.3).abs() < 1e-9);

        let derated = derated_ampacity(224.0, Celsius(30.0), 3, Topology::ThreeCore);
        assert!((derated - 224.0 * 0.90 * 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_factors_for_spec_normalize() {
        let spec = LoadSpec {
            parallel_circuits: 5,
            ambient_temp: Celsius(50.0),
            ..LoadSpec::default()
        };
        let factors = DeratingFactors::for_spec(&spec);
        assert_eq!(factors.cables_in_trench, 6);
        assert_eq!(factors.temperature, 0.80);
        assert!((factors.combined() - 0.56).abs() < 1e-12);
        assert!((factors.apply(250.0) - 140.0).abs() < 1e-9);
    }
}
