//! # Unit Types
//!
//! Type-safe wrappers for the SI quantities crossing the crate API. Thin f64
//! newtypes, same trade-off as any engineering calc core: compile-time safety
//! against metre/millimetre confusion without dragging in a units library,
//! and clean JSON (just numbers).
//!
//! Calculation structs keep suffix-named `f64` fields (`radius_m`,
//! `yield_mpa`) internally; the wrappers are for API boundaries and report
//! formatting, where sizing output in millimetres meets geometry in metres.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::units::{Meters, Millimeters};
//!
//! let skin = Meters(0.0005);
//! let mm: Millimeters = skin.into();
//! assert_eq!(mm.0, 0.5);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Stiffness in gigapascals (elastic moduli are catalogued in GPa)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gigapascals(pub f64);

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / 1.0e6)
    }
}

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * 1.0e6)
    }
}

impl From<Gigapascals> for Pascals {
    fn from(gpa: Gigapascals) -> Self {
        Pascals(gpa.0 * 1.0e9)
    }
}

impl From<Pascals> for Gigapascals {
    fn from(pa: Pascals) -> Self {
        Gigapascals(pa.0 / 1.0e9)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        let m = Meters(0.79);
        let mm: Millimeters = m.into();
        assert!((mm.0 - 790.0).abs() < 1e-9);

        let back: Meters = mm.into();
        assert!((back.0 - 0.79).abs() < 1e-12);
    }

    #[test]
    fn test_force_conversions() {
        let n = Newtons(236_000.0);
        let kn: Kilonewtons = n.into();
        assert_eq!(kn.0, 236.0);
    }

    #[test]
    fn test_stress_conversions() {
        let yield_strength: Pascals = Megapascals(240.0).into();
        assert_eq!(yield_strength.0, 240.0e6);

        let modulus: Pascals = Gigapascals(68.0).into();
        assert_eq!(modulus.0, 68.0e9);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Meters(0.0005)).unwrap();
        assert_eq!(json, "0.0005");
        let back: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Meters(0.0005));
    }
}
