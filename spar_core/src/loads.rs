//! # Launch Loads
//!
//! Quasi-static launch load derivation shared by the cylinder and stringer
//! models: limit loads from acceleration factors, the cantilever bending
//! moment of a stage loaded at its centre of gravity, and the equivalent
//! axial load that folds that moment back into a membrane load on the shell.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::loads::{equivalent_axial_load_n, LoadFactors};
//!
//! let factors = LoadFactors::default(); // 13.8 g axial, 3.1 g lateral, SF 1.5
//! let axial = factors.axial_limit_load_n(35.0);
//! let lateral = factors.lateral_limit_load_n(35.0);
//! let moment = lateral * 0.79 / 2.0;
//! let p_eq = equivalent_axial_load_n(axial, moment, 0.145);
//! assert!(p_eq > axial);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};

/// Standard gravity (m/s²)
pub const STANDARD_GRAVITY_M_S2: f64 = 9.80665;

/// Quasi-static acceleration factors and the design safety factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadFactors {
    /// Axial acceleration (g)
    pub axial_g: f64,

    /// Lateral acceleration (g)
    pub lateral_g: f64,

    /// Safety factor applied to limit loads
    pub safety_factor: f64,
}

impl Default for LoadFactors {
    /// Reference vehicle launch environment.
    fn default() -> Self {
        LoadFactors {
            axial_g: 13.8,
            lateral_g: 3.1,
            safety_factor: 1.5,
        }
    }
}

impl LoadFactors {
    /// Validate factor ranges.
    pub fn validate(&self) -> SizeResult<()> {
        if self.axial_g <= 0.0 {
            return Err(SizeError::invalid_input(
                "axial_g",
                self.axial_g.to_string(),
                "Axial acceleration must be positive",
            ));
        }
        if self.lateral_g <= 0.0 {
            return Err(SizeError::invalid_input(
                "lateral_g",
                self.lateral_g.to_string(),
                "Lateral acceleration must be positive",
            ));
        }
        if self.safety_factor < 1.0 {
            return Err(SizeError::invalid_input(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor must be at least 1.0",
            ));
        }
        Ok(())
    }

    /// Axial limit load on a supported mass (N)
    pub fn axial_limit_load_n(&self, mass_kg: f64) -> f64 {
        self.axial_g * STANDARD_GRAVITY_M_S2 * mass_kg
    }

    /// Lateral limit load on a supported mass (N)
    pub fn lateral_limit_load_n(&self, mass_kg: f64) -> f64 {
        self.lateral_g * STANDARD_GRAVITY_M_S2 * mass_kg
    }

    /// Axial acceleration with the safety factor applied (m/s²)
    pub fn ultimate_axial_acceleration_m_s2(&self) -> f64 {
        self.axial_g * STANDARD_GRAVITY_M_S2 * self.safety_factor
    }

    /// Lateral acceleration with the safety factor applied (m/s²)
    pub fn ultimate_lateral_acceleration_m_s2(&self) -> f64 {
        self.lateral_g * STANDARD_GRAVITY_M_S2 * self.safety_factor
    }
}

/// Equivalent axial load on a cylindrical shell: the bending moment is folded
/// into a membrane load, `P_eq = P + 2 M / R`.
pub fn equivalent_axial_load_n(axial_load_n: f64, bending_moment_nm: f64, radius_m: f64) -> f64 {
    axial_load_n + 2.0 * bending_moment_nm / radius_m
}

/// One vehicle stage as the launch loads see it: the mass it carries, the
/// stack length above the interface (CG at half that), and the physical
/// length of its own module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageMass {
    /// Stage label (e.g. "Return aft")
    pub label: String,

    /// Supported mass (kg)
    pub mass_kg: f64,

    /// Stack length above this interface (m); CG assumed at half
    pub stack_length_m: f64,

    /// Physical length of this stage's module (m)
    pub module_length_m: f64,
}

impl StageMass {
    /// Centre of gravity height above the interface (m)
    pub fn cg_m(&self) -> f64 {
        self.stack_length_m / 2.0
    }

    /// Ultimate lateral shear at the interface (N)
    pub fn lateral_shear_n(&self, factors: &LoadFactors) -> f64 {
        factors.ultimate_lateral_acceleration_m_s2() * self.mass_kg
    }

    /// Ultimate bending moment at the interface (N·m), shear applied at CG
    pub fn bending_moment_nm(&self, factors: &LoadFactors) -> f64 {
        self.lateral_shear_n(factors) * self.cg_m()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_loads_for_reference_vehicle() {
        let factors = LoadFactors::default();
        assert!((factors.axial_limit_load_n(35.0) - 4736.6).abs() < 0.1);
        assert!((factors.lateral_limit_load_n(35.0) - 1064.0).abs() < 0.1);
    }

    #[test]
    fn test_equivalent_axial_load() {
        // 35 kg over a 0.79 m module, R = 145 mm
        let factors = LoadFactors::default();
        let axial = factors.axial_limit_load_n(35.0);
        let moment = factors.lateral_limit_load_n(35.0) * 0.79 / 2.0;
        let p_eq = equivalent_axial_load_n(axial, moment, 0.145);

        assert!((p_eq - 10533.7).abs() < 0.1);
        assert!((p_eq * factors.safety_factor - 15800.5).abs() < 0.1);
    }

    #[test]
    fn test_stage_moment() {
        let factors = LoadFactors::default();
        let stage = StageMass {
            label: "Return aft".to_string(),
            mass_kg: 32.5,
            stack_length_m: 1.731,
            module_length_m: 0.28,
        };

        assert!((stage.lateral_shear_n(&factors) - 1482.0).abs() < 0.1);
        assert!((stage.bending_moment_nm(&factors) - 1282.7).abs() < 0.1);
    }

    #[test]
    fn test_factor_validation() {
        let mut factors = LoadFactors::default();
        assert!(factors.validate().is_ok());

        factors.safety_factor = 0.9;
        assert_eq!(factors.validate().unwrap_err().error_code(), "INVALID_INPUT");

        factors = LoadFactors {
            axial_g: -1.0,
            ..LoadFactors::default()
        };
        assert!(factors.validate().is_err());
    }
}
