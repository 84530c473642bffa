//! Compile-time unit safety for cable sizing quantities.
//!
//! Load inputs mix several magnitudes (MW, MVar, MVA, kV, km, °C) whose
//! scale factors are easy to get wrong when everything is a raw `f64`. The
//! newtypes below keep the inputs of [`LoadSpec`](crate::LoadSpec) distinct at
//! the type level while staying `#[repr(transparent)]` over `f64`.
//!
//! # Usage
//!
//! ```
//! use cablesel_core::units::{Kilovolts, Megavars, Megawatts};
//!
//! let s = Megawatts(0.4).apparent_power(Megavars(0.3));
//! assert!((s.value() - 0.5).abs() < 1e-12);
//!
//! let i = s.line_current(Kilovolts(0.8));
//! assert!((i.value() - 360.84).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Implements arithmetic and helpers shared by every unit newtype.
macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Mul<$type> for f64 {
            type Output = $type;
            fn mul(self, rhs: $type) -> Self::Output {
                <$type>::new(self * rhs.0)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Check if value is finite
            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            /// Clamp value to range
            #[inline]
            pub fn clamp(self, min: Self, max: Self) -> Self {
                Self(self.0.clamp(min.0, max.0))
            }
        }
    };
}

// =============================================================================
// Power Units
// =============================================================================

/// Active power in megawatts (MW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl_unit_ops!(Megawatts, "MW");

/// Reactive power in megavolt-amperes reactive (MVar)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Megavars(pub f64);

impl_unit_ops!(Megavars, "MVar");

/// Apparent power in megavolt-amperes (MVA)
///
/// S = √(P² + Q²), the quantity that sets the line current.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MegavoltAmperes(pub f64);

impl_unit_ops!(MegavoltAmperes, "MVA");

impl Megawatts {
    /// Compute apparent power given reactive power: S = √(P² + Q²)
    #[inline]
    pub fn apparent_power(self, q: Megavars) -> MegavoltAmperes {
        MegavoltAmperes((self.0.powi(2) + q.0.powi(2)).sqrt())
    }

    /// Compute power factor: pf = P / S, or 1.0 when S is zero
    #[inline]
    pub fn power_factor(self, s: MegavoltAmperes) -> f64 {
        if s.0 > 0.0 {
            self.0 / s.0
        } else {
            1.0
        }
    }
}

impl Megavars {
    /// Reactive factor: sin φ = Q / S, or 0.0 when S is zero
    #[inline]
    pub fn reactive_factor(self, s: MegavoltAmperes) -> f64 {
        if s.0 > 0.0 {
            self.0 / s.0
        } else {
            0.0
        }
    }
}

impl MegavoltAmperes {
    /// Three-phase line current drawn at line-to-line voltage `v`.
    ///
    /// I = S·10⁶ / (√3 · V·10³). Returns zero amperes when the voltage is not
    /// positive or the result is not finite.
    #[inline]
    pub fn line_current(self, v: Kilovolts) -> Amperes {
        if v.0.is_nan() || v.0 <= 0.0 {
            return Amperes(0.0);
        }
        let amps = self.0 * 1e6 / (3f64.sqrt() * v.0 * 1e3);
        if amps.is_finite() {
            Amperes(amps)
        } else {
            Amperes(0.0)
        }
    }
}

// =============================================================================
// Voltage / Current Units
// =============================================================================

/// Voltage in kilovolts (kV)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilovolts(pub f64);

impl_unit_ops!(Kilovolts, "kV");

impl Kilovolts {
    /// Convert to volts
    #[inline]
    pub fn to_volts(self) -> f64 {
        self.0 * 1000.0
    }
}

/// Current in amperes (A)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Amperes(pub f64);

impl_unit_ops!(Amperes, "A");

// =============================================================================
// Installation Units
// =============================================================================

/// Route length in kilometers (km)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilometers(pub f64);

impl_unit_ops!(Kilometers, "km");

/// Ambient temperature in degrees Celsius (°C)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(pub f64);

impl_unit_ops!(Celsius, "°C");

// =============================================================================
// Angle Units
// =============================================================================

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Radians(pub f64);

impl_unit_ops!(Radians, "rad");

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl_unit_ops!(Degrees, "°");

impl Radians {
    /// Angle whose cosine is `cos_phi` (clamped into [-1, 1] first)
    #[inline]
    pub fn from_cos(cos_phi: f64) -> Self {
        Radians(cos_phi.clamp(-1.0, 1.0).acos())
    }

    /// Convert to degrees
    #[inline]
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }
}

impl Degrees {
    /// Convert to radians
    #[inline]
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_megawatts_arithmetic() {
        let p1 = Megawatts(1.0);
        let p2 = Megawatts(0.5);
        assert_eq!((p1 + p2).value(), 1.5);
        assert_eq!((p1 - p2).value(), 0.5);
        assert_eq!((-p1).value(), -1.0);
        assert_eq!((p1 * 2.0).value(), 2.0);
        assert_eq!((2.0 * p1).value(), 2.0);
        assert_eq!(p1 / p2, 2.0);
    }

    #[test]
    fn test_apparent_power() {
        let s = Megawatts(3.0).apparent_power(Megavars(4.0));
        assert!((s.value() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_factor_zero_apparent_power() {
        let s = MegavoltAmperes(0.0);
        assert_eq!(Megawatts(0.0).power_factor(s), 1.0);
        assert_eq!(Megavars(0.0).reactive_factor(s), 0.0);
    }

    #[test]
    fn test_line_current() {
        let i = MegavoltAmperes(0.5).line_current(Kilovolts(0.8));
        let expected = 0.5e6 / (3f64.sqrt() * 800.0);
        assert!((i.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_line_current_non_positive_voltage() {
        assert_eq!(MegavoltAmperes(0.5).line_current(Kilovolts(0.0)).value(), 0.0);
        assert_eq!(MegavoltAmperes(0.5).line_current(Kilovolts(-1.0)).value(), 0.0);
        assert_eq!(
            MegavoltAmperes(0.5).line_current(Kilovolts(f64::NAN)).value(),
            0.0
        );
    }

    #[test]
    fn test_angle_conversion() {
        let theta = Radians::from_cos(0.8);
        assert!((theta.to_degrees().value() - 36.8699).abs() < 1e-3);
        assert!((Degrees(180.0).to_radians().value() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Kilovolts(0.8)).unwrap();
        assert_eq!(json, "0.8");
    }
}
