//! Load and installation description for one evaluation.
//!
//! A [`LoadSpec`] is rebuilt from the current inputs every time an evaluation
//! runs; nothing about it is cached between calls. [`RawLoadInput`] is the
//! text form a data-entry surface produces, parsed into a `LoadSpec` with
//! field-level errors.

use serde::{Deserialize, Serialize};

use crate::error::{CableError, CableResult};
use crate::units::{Amperes, Celsius, Kilometers, Kilovolts, Megavars, MegavoltAmperes, Megawatts};
use crate::{Arrangement, LoadCategory, Topology};

/// Lowest ambient temperature the derating table covers (°C).
pub const MIN_AMBIENT_C: f64 = 5.0;
/// Highest ambient temperature the derating table covers (°C).
pub const MAX_AMBIENT_C: f64 = 40.0;
/// Ambient temperature at which ratings are tabulated (°C).
pub const REFERENCE_AMBIENT_C: f64 = 20.0;

/// Three-phase load plus installation conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSpec {
    pub active_power: Megawatts,
    pub reactive_power: Megavars,
    /// Line-to-line system voltage
    pub system_voltage: Kilovolts,
    pub parallel_circuits: u32,
    /// Route length of one circuit
    pub cable_length: Kilometers,
    pub ambient_temp: Celsius,
    pub topology: Topology,
    /// Only meaningful for single-core cables
    pub arrangement: Arrangement,
    pub load_category: LoadCategory,
}

impl Default for LoadSpec {
    fn default() -> Self {
        Self {
            active_power: Megawatts(0.4),
            reactive_power: Megavars(0.3),
            system_voltage: Kilovolts(0.8),
            parallel_circuits: 2,
            cable_length: Kilometers(0.4),
            ambient_temp: Celsius(REFERENCE_AMBIENT_C),
            topology: Topology::SingleCore,
            arrangement: Arrangement::Flat,
            load_category: LoadCategory::Industrial,
        }
    }
}

impl LoadSpec {
    /// Copy with parallel circuits clamped to the topology bound and ambient
    /// temperature clamped to the derating table range.
    ///
    /// A non-finite ambient temperature is replaced by the reference 20 °C.
    pub fn normalized(&self) -> Self {
        let max_circuits = self.topology.max_parallel_circuits();
        let ambient = if self.ambient_temp.is_finite() {
            self.ambient_temp
                .clamp(Celsius(MIN_AMBIENT_C), Celsius(MAX_AMBIENT_C))
        } else {
            Celsius(REFERENCE_AMBIENT_C)
        };
        Self {
            parallel_circuits: self.parallel_circuits.clamp(1, max_circuits),
            ambient_temp: ambient,
            ..self.clone()
        }
    }

    /// True when active power and voltage are both positive and finite.
    ///
    /// Without a usable load the selector shows the whole catalog.
    pub fn has_usable_load(&self) -> bool {
        let p = self.active_power.value();
        let v = self.system_voltage.value();
        p.is_finite() && v.is_finite() && p > 0.0 && v > 0.0
    }

    pub fn apparent_power(&self) -> MegavoltAmperes {
        self.active_power.apparent_power(self.reactive_power)
    }

    /// Total line current over all circuits.
    pub fn total_current(&self) -> Amperes {
        self.apparent_power().line_current(self.system_voltage)
    }

    /// Line current carried by each parallel circuit.
    pub fn current_per_circuit(&self) -> Amperes {
        self.total_current() / f64::from(self.parallel_circuits.max(1))
    }

    /// cos φ, or 1.0 when there is no apparent power.
    pub fn power_factor(&self) -> f64 {
        self.active_power.power_factor(self.apparent_power())
    }

    /// sin φ, or 0.0 when there is no apparent power.
    pub fn reactive_factor(&self) -> f64 {
        self.reactive_power.reactive_factor(self.apparent_power())
    }
}

/// Load inputs as entered text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLoadInput {
    pub active_power: String,
    pub reactive_power: String,
    pub system_voltage: String,
    pub parallel_circuits: String,
    pub cable_length: String,
    pub ambient_temp: String,
    pub topology: String,
    pub arrangement: String,
    pub load_category: String,
}

impl RawLoadInput {
    /// Text rendering of an existing spec.
    pub fn from_spec(spec: &LoadSpec) -> Self {
        Self {
            active_power: spec.active_power.value().to_string(),
            reactive_power: spec.reactive_power.value().to_string(),
            system_voltage: spec.system_voltage.value().to_string(),
            parallel_circuits: spec.parallel_circuits.to_string(),
            cable_length: spec.cable_length.value().to_string(),
            ambient_temp: spec.ambient_temp.value().to_string(),
            topology: spec.topology.to_string(),
            arrangement: spec.arrangement.to_string(),
            load_category: spec.load_category.to_string(),
        }
    }

    /// Parse every field, accepting a decimal comma.
    ///
    /// Values are kept as entered. Circuit count and ambient temperature are
    /// clamped by the engine against the topology of the cable it evaluates.
    pub fn parse(&self) -> CableResult<LoadSpec> {
        let spec = LoadSpec {
            active_power: Megawatts(parse_non_negative("active power", &self.active_power)?),
            reactive_power: Megavars(parse_non_negative("reactive power", &self.reactive_power)?),
            system_voltage: Kilovolts(parse_non_negative("system voltage", &self.system_voltage)?),
            parallel_circuits: parse_circuits(&self.parallel_circuits)?,
            cable_length: Kilometers(parse_non_negative("cable length", &self.cable_length)?),
            ambient_temp: Celsius(parse_decimal("ambient temperature", &self.ambient_temp)?),
            topology: self.topology.parse()?,
            arrangement: self.arrangement.parse()?,
            load_category: self.load_category.parse()?,
        };
        Ok(spec)
    }
}

fn parse_decimal(field: &str, text: &str) -> CableResult<f64> {
    let cleaned = text.trim().replace(',', ".");
    let value = cleaned
        .parse::<f64>()
        .map_err(|_| CableError::InvalidInput(format!("{field}: '{text}' is not a number")))?;
    if !value.is_finite() {
        return Err(CableError::InvalidInput(format!("{field}: '{text}' is not finite")));
    }
    Ok(value)
}

fn parse_non_negative(field: &str, text: &str) -> CableResult<f64> {
    let value = parse_decimal(field, text)?;
    if value < 0.0 {
        return Err(CableError::InvalidInput(format!("{field}: must not be negative")));
    }
    Ok(value)
}

fn parse_circuits(text: &str) -> CableResult<u32> {
    let value = text.trim().parse::<u32>().map_err(|_| {
        CableError::InvalidInput(format!("parallel circuits: '{text}' is not a positive integer"))
    })?;
    if value == 0 {
        return Err(CableError::InvalidInput(
            "parallel circuits: must be at least 1".to_string(),
        ));
    }
    Ok(value)
}
