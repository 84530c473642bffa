//! Steady-state performance of one cable run.
//!
//! The model is per phase and real valued. Voltage drop uses the usual
//! approximate regulation formula
//!
//! ```text
//! ΔV = (I·R·cos φ + I·X·sin φ)·ℓ
//! VR% = ΔV / V_LN × 100
//! ```
//!
//! which ignores the quadrature component of the drop. Losses are
//! `3·I²·R·ℓ` per circuit regardless of topology.

use std::f64::consts::PI;

use cablesel_core::units::{Degrees, Radians};
use cablesel_core::{CableError, CableId, CableRecord, CableResult, LoadSpec};
use serde::Serialize;

use crate::derating::DeratingFactors;

/// Fixed system frequency (Hz).
pub const SYSTEM_FREQUENCY_HZ: f64 = 50.0;

/// Inductance assumed when the table has no value for the arrangement (mH/km).
pub const DEFAULT_INDUCTANCE_MH_PER_KM: f64 = 0.3;

/// Outcome of the ampacity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityStatus {
    /// Current per circuit is within the derated rating (boundary included)
    Valid,
    Invalid,
}

impl CapacityStatus {
    /// Valid iff `current <= derated`.
    pub fn evaluate(current: f64, derated: f64) -> Self {
        if current <= derated {
            CapacityStatus::Valid
        } else {
            CapacityStatus::Invalid
        }
    }

    pub fn is_valid(self) -> bool {
        self == CapacityStatus::Valid
    }

    /// PASS/FAIL label used in reports.
    pub fn verdict(self) -> &'static str {
        match self {
            CapacityStatus::Valid => "PASS",
            CapacityStatus::Invalid => "FAIL",
        }
    }
}

impl std::fmt::Display for CapacityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapacityStatus::Valid => write!(f, "Valid"),
            CapacityStatus::Invalid => write!(f, "Invalid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitAnalysis {
    pub cable_id: CableId,
    pub apparent_power_mva: f64,
    pub total_current: f64,
    pub current_per_circuit: f64,
    pub power_factor: f64,
    pub reactive_factor: f64,
    /// Ω/km
    pub resistance_per_km: f64,
    /// mH/km, after the default substitution
    pub inductance_per_km: f64,
    /// Ω/km at 50 Hz
    pub reactance_per_km: f64,
    pub base_ampacity: f64,
    pub temperature_factor: f64,
    pub trench_factor: f64,
    pub cables_in_trench: u32,
    pub derated_ampacity: f64,
    pub safety_margin_pct: f64,
    pub status: CapacityStatus,
    pub active_loss_per_circuit_kw: f64,
    pub reactive_loss_per_circuit_kvar: f64,
    pub active_loss_total_kw: f64,
    pub reactive_loss_total_kvar: f64,
    pub line_to_neutral_v: f64,
    /// Line-to-neutral drop (V)
    pub voltage_drop_v: f64,
    pub voltage_regulation_pct: f64,
    /// Receiving-end line-to-line voltage (V)
    pub terminal_voltage_ll_v: f64,
    pub power_factor_angle: Radians,
}

impl CircuitAnalysis {
    pub fn active_loss_total_mw(&self) -> f64 {
        self.active_loss_total_kw / 1000.0
    }

    pub fn reactive_loss_total_mvar(&self) -> f64 {
        self.reactive_loss_total_kvar / 1000.0
    }

    pub fn power_factor_angle_degrees(&self) -> Degrees {
        self.power_factor_angle.to_degrees()
    }
}

/// Reactance at the system frequency for an inductance in mH/km.
pub fn reactance_per_km(inductance_mh_per_km: f64) -> f64 {
    2.0 * PI * SYSTEM_FREQUENCY_HZ * inductance_mh_per_km / 1000.0
}

/// Analyze `cable` carrying the load in `spec`.
///
/// The cable's own topology decides inductance, rating and trench positions,
/// so a cable of the other topology can still be checked. Fails with
/// [`CableError::InvalidInput`] when the table has no rating for the
/// requested arrangement.
pub fn analyze_circuit(cable: &CableRecord, spec: &LoadSpec) -> CableResult<CircuitAnalysis> {
    let spec = LoadSpec {
        topology: cable.topology(),
        ..spec.clone()
    }
    .normalized();

    let base = cable.base_ampacity(spec.arrangement).ok_or_else(|| {
        CableError::InvalidInput(format!(
            "{} has no {} rating",
            cable.designation,
            spec.arrangement.to_string().to_lowercase()
        ))
    })?;

    let n = f64::from(spec.parallel_circuits);
    let length = spec.cable_length.value();
    let i_total = spec.total_current().value();
    let i = spec.current_per_circuit().value();
    let cos_phi = spec.power_factor();
    let sin_phi = spec.reactive_factor();

    let r = cable.resistance_per_km;
    let l = cable
        .inductance_for(spec.arrangement)
        .unwrap_or(DEFAULT_INDUCTANCE_MH_PER_KM);
    let x = reactance_per_km(l);

    let factors = DeratingFactors::for_spec(&spec);
    let derated = factors.apply(base);
    let margin = if derated > 0.0 {
        (derated - i) / derated * 100.0
    } else {
        0.0
    };
    let status = CapacityStatus::evaluate(i, derated);

    let p_loss = 3.0 * i * i * r * length / 1000.0;
    let q_loss = 3.0 * i * i * x * length / 1000.0;

    let vln = spec.system_voltage.to_volts() / 3f64.sqrt();
    let drop = (i * r * cos_phi + i * x * sin_phi) * length;
    let regulation = if vln > 0.0 { drop / vln * 100.0 } else { 0.0 };
    let terminal = spec.system_voltage.to_volts() - drop * 3f64.sqrt();

    Ok(CircuitAnalysis {
        cable_id: cable.id,
        apparent_power_mva: spec.apparent_power().value(),
        total_current: i_total,
        current_per_circuit: i,
        power_factor: cos_phi,
        reactive_factor: sin_phi,
        resistance_per_km: r,
        inductance_per_km: l,
        reactance_per_km: x,
        base_ampacity: base,
        temperature_factor: factors.temperature,
        trench_factor: factors.trench,
        cables_in_trench: factors.cables_in_trench,
        derated_ampacity: derated,
        safety_margin_pct: margin,
        status,
        active_loss_per_circuit_kw: p_loss,
        reactive_loss_per_circuit_kvar: q_loss,
        active_loss_total_kw: p_loss * n,
        reactive_loss_total_kvar: q_loss * n,
        line_to_neutral_v: vln,
        voltage_drop_v: drop,
        voltage_regulation_pct: regulation,
        terminal_voltage_ll_v: terminal,
        power_factor_angle: Radians::from_cos(cos_phi),
    })
}

/// [`analyze_circuit`] on an optional selection.
pub fn analyze_selection(cable: Option<&CableRecord>, spec: &LoadSpec) -> CableResult<CircuitAnalysis> {
    let cable = cable.ok_or(CableError::NoSelection)?;
    analyze_circuit(cable, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cablesel_core::units::{Kilovolts, Megavars, Megawatts};
    use cablesel_core::{Arrangement, Catalog, Topology};

    fn cable_70() -> CableRecord {
        Catalog::builtin()
            .get(CableId::new(6))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_default_scenario() {
        let analysis = analyze_circuit(&cable_70(), &LoadSpec::default()).unwrap();
        assert!((analysis.current_per_circuit - 180.422).abs() < 1e-3);
        assert_eq!(analysis.base_ampacity, 279.0);
        assert_eq!(analysis.temperature_factor, 1.0);
        assert_eq!(analysis.trench_factor, 0.70);
        assert!((analysis.derated_ampacity - 195.3).abs() < 1e-9);
        assert_eq!(analysis.status, CapacityStatus::Valid);
        assert!((analysis.inductance_per_km - 0.272).abs() < 1e-12);
        assert!((analysis.reactance_per_km - 0.085451).abs() < 1e-5);
        assert!((analysis.safety_margin_pct - 7.618).abs() < 1e-2);
    }

    #[test]
    fn test_losses_and_regulation_formulas() {
        let cable = cable_70();
        let spec = LoadSpec::default();
        let a = analyze_circuit(&cable, &spec).unwrap();
        let i = a.current_per_circuit;
        let expected_p = 3.0 * i * i * 0.268 * 0.4 / 1000.0;
        assert!((a.active_loss_per_circuit_kw - expected_p).abs() < 1e-9);
        assert!((a.active_loss_total_kw - 2.0 * expected_p).abs() < 1e-9);

        let vln = 800.0 / 3f64.sqrt();
        let drop = (i * 0.268 * 0.8 + i * a.reactance_per_km * 0.6) * 0.4;
        assert!((a.voltage_drop_v - drop).abs() < 1e-9);
        assert!((a.voltage_regulation_pct - drop / vln * 100.0).abs() < 1e-9);
        assert!((a.terminal_voltage_ll_v - (800.0 - drop * 3f64.sqrt())).abs() < 1e-9);
        assert!((a.power_factor_angle_degrees().value() - 36.87).abs() < 1e-2);
    }

    #[test]
    fn test_missing_inductance_defaults() {
        let cable = CableRecord {
            inductance_flat_per_km: None,
            inductance_trefoil_per_km: None,
            ..cable_70()
        };
        let a = analyze_circuit(&cable, &LoadSpec::default()).unwrap();
        assert_eq!(a.inductance_per_km, DEFAULT_INDUCTANCE_MH_PER_KM);
    }

    #[test]
    fn test_status_boundary_inclusive() {
        assert_eq!(CapacityStatus::evaluate(195.3, 195.3), CapacityStatus::Valid);
        assert_eq!(CapacityStatus::evaluate(195.30001, 195.3), CapacityStatus::Invalid);
        assert_eq!(CapacityStatus::Valid.verdict(), "PASS");
        assert_eq!(CapacityStatus::Invalid.verdict(), "FAIL");
    }

    #[test]
    fn test_overload_is_invalid() {
        // 1x70 trefoil rating 237, one circuit of three cables: 237·0.85
        let derated = 237.0 * 0.85;
        let v = 0.8;
        let s = derated * 3f64.sqrt() * v * 1e3 / 1e6;
        let near = LoadSpec {
            active_power: Megawatts(s * 0.999),
            reactive_power: Megavars(0.0),
            system_voltage: Kilovolts(v),
            parallel_circuits: 1,
            arrangement: Arrangement::Trefoil,
            ..LoadSpec::default()
        };
        let a = analyze_circuit(&cable_70(), &near).unwrap();
        assert!((a.derated_ampacity - derated).abs() < 1e-9);
        assert_eq!(a.status, CapacityStatus::Valid);
        assert!(a.safety_margin_pct > 0.0 && a.safety_margin_pct < 0.2);

        let over = LoadSpec {
            active_power: Megawatts(s * 1.001),
            ..near
        };
        let a = analyze_circuit(&cable_70(), &over).unwrap();
        assert_eq!(a.status, CapacityStatus::Invalid);
        assert!(a.safety_margin_pct < 0.0);
    }

    #[test]
    fn test_zero_load_is_degenerate_not_error() {
        let spec = LoadSpec {
            active_power: Megawatts(0.0),
            reactive_power: Megavars(0.0),
            ..LoadSpec::default()
        };
        let a = analyze_circuit(&cable_70(), &spec).unwrap();
        assert_eq!(a.power_factor, 1.0);
        assert_eq!(a.reactive_factor, 0.0);
        assert_eq!(a.current_per_circuit, 0.0);
        assert_eq!(a.voltage_regulation_pct, 0.0);
        assert!((a.safety_margin_pct - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_voltage_guards_regulation() {
        let spec = LoadSpec {
            system_voltage: Kilovolts(0.0),
            ..LoadSpec::default()
        };
        let a = analyze_circuit(&cable_70(), &spec).unwrap();
        assert_eq!(a.total_current, 0.0);
        assert_eq!(a.voltage_regulation_pct, 0.0);
    }

    #[test]
    fn test_cable_topology_drives_trench_positions() {
        let catalog = Catalog::builtin();
        let three_core = catalog.by_topology(Topology::ThreeCore).next().cloned().unwrap();
        let a = analyze_circuit(&three_core, &LoadSpec::default()).unwrap();
        assert_eq!(a.cables_in_trench, 2);
        assert_eq!(a.trench_factor, 0.90);
    }

    #[test]
    fn test_three_core_rejects_missing_rating() {
        let cable = CableRecord {
            trefoil_ampacity: None,
            ..cable_70()
        };
        let spec = LoadSpec {
            arrangement: Arrangement::Trefoil,
            ..LoadSpec::default()
        };
        assert!(matches!(
            analyze_circuit(&cable, &spec),
            Err(CableError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_analyze_selection_requires_cable() {
        assert!(matches!(
            analyze_selection(None, &LoadSpec::default()),
            Err(CableError::NoSelection)
        ));
        assert!(analyze_selection(Some(&cable_70()), &LoadSpec::default()).is_ok());
    }
}
