//! Rated-voltage classes written as `"U0/U kV"`.
//!
//! A class such as `"6/10 kV"` names the phase-to-ground and phase-to-phase
//! insulation ratings. A cable qualifies for a system whose line voltage does
//! not exceed the larger figure.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::CableError;

/// Parsed rated-voltage class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoltageClass {
    /// Phase-to-ground rating (kV)
    pub low_kv: f64,
    /// Phase-to-phase rating (kV)
    pub high_kv: f64,
}

impl VoltageClass {
    /// Voltage a system may not exceed for this class to qualify (kV).
    pub fn qualifying_kv(&self) -> f64 {
        self.low_kv.max(self.high_kv)
    }
}

impl fmt::Display for VoltageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} kV", self.low_kv, self.high_kv)
    }
}

impl FromStr for VoltageClass {
    type Err = CableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_suffix("kV")
            .or_else(|| trimmed.strip_suffix("kv"))
            .or_else(|| trimmed.strip_suffix("KV"))
            .unwrap_or(trimmed)
            .trim();

        let (low, high) = body
            .split_once('/')
            .ok_or_else(|| CableError::Parse(format!("voltage class '{s}' is not 'low/high kV'")))?;

        let parse_part = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                CableError::Parse(format!("voltage class '{s}' has non-numeric part '{}'", part.trim()))
            })
        };

        let low_kv = parse_part(low)?;
        let high_kv = parse_part(high)?;
        if !low_kv.is_finite() || !high_kv.is_finite() {
            return Err(CableError::Parse(format!("voltage class '{s}' is not finite")));
        }

        Ok(VoltageClass { low_kv, high_kv })
    }
}
