//! # Landing Gear Sizing
//!
//! Closed-form sizing of the landing skis and legs. The ski is a
//! rectangular plate in bending under the landing impact moment, so its
//! thickness comes straight out of `sigma = 6 M / (w t^2)` at yield. The
//! legs are thin-walled tubes checked in combined axial and bi-directional
//! bending at the touchdown angles.
//!
//! No iteration anywhere - this is the one model that is purely closed
//! form, and its output feeds the mass roll-up only.

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};
use crate::loads::STANDARD_GRAVITY_M_S2;
use crate::materials;

/// Input parameters for landing gear sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingGearInput {
    /// User label
    pub label: String,

    /// Catalog name of the gear alloy
    pub material: String,

    /// Landed vehicle mass (kg)
    pub mass_kg: f64,

    /// Vertical landing load factor (g)
    pub landing_g: f64,

    /// Horizontal deceleration load factor (g)
    pub deceleration_g: f64,

    /// Safety factor on the landing loads
    pub safety_factor: f64,

    /// Rear ski length (m)
    pub rear_ski_length_m: f64,

    /// Rear ski width (m)
    pub rear_ski_width_m: f64,

    /// Front ski length (m)
    pub front_ski_length_m: f64,

    /// Front ski width (m)
    pub front_ski_width_m: f64,

    /// Rear leg length (m)
    pub rear_leg_length_m: f64,

    /// Front leg length (m)
    pub front_leg_length_m: f64,

    /// Leg tube wall thickness (m)
    pub leg_wall_m: f64,

    /// Leg tube outer diameter (m)
    pub leg_diameter_m: f64,

    /// Angle between leg axis and the drag direction (deg)
    pub drag_angle_deg: f64,

    /// Angle between leg axis and the ground normal (deg)
    pub normal_angle_deg: f64,
}

impl LandingGearInput {
    /// Reference vehicle gear: twin rear skis, twin front skis.
    pub fn reference(label: impl Into<String>) -> Self {
        LandingGearInput {
            label: label.into(),
            material: "Aluminium 6061-T6".to_string(),
            mass_kg: 33.0,
            landing_g: 1.5,
            deceleration_g: 0.3,
            safety_factor: 1.5,
            rear_ski_length_m: 0.2,
            rear_ski_width_m: 0.04,
            front_ski_length_m: 0.11,
            front_ski_width_m: 0.04,
            rear_leg_length_m: 0.3265,
            front_leg_length_m: 0.1,
            leg_wall_m: 0.001,
            leg_diameter_m: 0.008,
            drag_angle_deg: 120.0,
            normal_angle_deg: 127.76,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> SizeResult<()> {
        for (name, value) in [
            ("mass_kg", self.mass_kg),
            ("landing_g", self.landing_g),
            ("rear_ski_length_m", self.rear_ski_length_m),
            ("rear_ski_width_m", self.rear_ski_width_m),
            ("front_ski_length_m", self.front_ski_length_m),
            ("front_ski_width_m", self.front_ski_width_m),
            ("rear_leg_length_m", self.rear_leg_length_m),
            ("front_leg_length_m", self.front_leg_length_m),
            ("leg_wall_m", self.leg_wall_m),
            ("leg_diameter_m", self.leg_diameter_m),
        ] {
            if value <= 0.0 {
                return Err(SizeError::invalid_input(
                    name,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        if self.safety_factor < 1.0 {
            return Err(SizeError::invalid_input(
                "safety_factor",
                self.safety_factor.to_string(),
                "Safety factor must be at least 1.0",
            ));
        }
        if 2.0 * self.leg_wall_m > self.leg_diameter_m {
            return Err(SizeError::geometric_infeasibility(
                "leg_wall_m",
                self.leg_wall_m,
                "wall exceeds the tube radius",
            ));
        }
        Ok(())
    }
}

/// Results from landing gear sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingGearResult {
    /// Landing impact moment on a rear ski (N·m)
    pub max_moment_nm: f64,

    /// Required ski plate thickness (m)
    pub ski_thickness_m: f64,

    /// Mass of both rear plus both front skis (kg)
    pub skis_mass_kg: f64,

    /// Leg axial stress component (Pa); sign follows the touchdown angles
    pub leg_axial_stress_pa: f64,

    /// Leg bending stress from the deceleration force (Pa)
    pub leg_deceleration_stress_pa: f64,

    /// Leg bending stress from the ground normal force (Pa)
    pub leg_normal_stress_pa: f64,

    /// Combined leg stress (Pa)
    pub leg_stress_pa: f64,

    /// Yield over combined leg stress; above 1 is adequate
    pub leg_yield_margin: f64,

    /// Mass of one rear leg (kg)
    pub rear_leg_mass_kg: f64,

    /// Mass of one front leg (kg)
    pub front_leg_mass_kg: f64,

    /// Full landing system mass, both sides (kg)
    pub total_mass_kg: f64,
}

/// Size the landing skis and check the legs.
///
/// # Example
///
/// ```rust
/// use spar_core::calculations::landing::{calculate, LandingGearInput};
///
/// let result = calculate(&LandingGearInput::reference("Demo")).unwrap();
/// assert!(result.ski_thickness_m > 0.0);
/// ```
pub fn calculate(input: &LandingGearInput) -> SizeResult<LandingGearResult> {
    input.validate()?;

    let props = materials::lookup(&input.material)?;
    let yield_pa = props.yield_pa();
    let rho = props.density_kg_m3;
    let g = STANDARD_GRAVITY_M_S2;

    // Ski plate: landing moment reacted across the four skis
    let max_moment_nm = input.landing_g * g * input.safety_factor * input.mass_kg
        * input.rear_ski_length_m
        / 4.0;
    let ski_thickness_m =
        (6.0 / yield_pa / input.rear_ski_width_m * max_moment_nm).sqrt();

    let rear_ski_mass_kg =
        input.rear_ski_length_m * input.rear_ski_width_m * ski_thickness_m * rho;
    let front_ski_mass_kg =
        input.front_ski_length_m * input.front_ski_width_m * ski_thickness_m * rho;
    let skis_mass_kg = 2.0 * rear_ski_mass_kg + 2.0 * front_ski_mass_kg;

    // Leg tube section
    let t = input.leg_wall_m;
    let d = input.leg_diameter_m;
    let inertia_m4 = std::f64::consts::PI * t * d.powi(3) / 8.0;
    let area_m2 = std::f64::consts::PI * ((d / 2.0).powi(2) - (d / 2.0 - t).powi(2));

    // Touchdown force components along the leg axes
    let drag_angle = input.drag_angle_deg.to_radians();
    let normal_angle = input.normal_angle_deg.to_radians();
    let leg_axial_force_n = drag_angle.cos() * input.deceleration_g * g
        + normal_angle.cos() * input.landing_g * g * input.safety_factor;
    let deceleration_force_n = drag_angle.sin() * input.deceleration_g * g * input.safety_factor;
    let normal_force_n = normal_angle.sin() * input.landing_g * g * input.safety_factor;

    let leg_axial_stress_pa = leg_axial_force_n / area_m2;
    let leg_deceleration_stress_pa =
        deceleration_force_n * input.rear_leg_length_m * d / 2.0 / inertia_m4;
    let leg_normal_stress_pa = normal_force_n * input.rear_leg_length_m * d / 2.0 / inertia_m4;

    let leg_stress_pa = leg_normal_stress_pa
        + (leg_deceleration_stress_pa.powi(2) + leg_normal_stress_pa.powi(2)).sqrt();

    let rear_leg_mass_kg = area_m2 * input.rear_leg_length_m * rho;
    let front_leg_mass_kg = area_m2 * input.front_leg_length_m * rho;

    Ok(LandingGearResult {
        max_moment_nm,
        ski_thickness_m,
        skis_mass_kg,
        leg_axial_stress_pa,
        leg_deceleration_stress_pa,
        leg_normal_stress_pa,
        leg_stress_pa,
        leg_yield_margin: yield_pa / leg_stress_pa,
        rear_leg_mass_kg,
        front_leg_mass_kg,
        total_mass_kg: skis_mass_kg + 2.0 * rear_leg_mass_kg + 2.0 * front_leg_mass_kg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ski_sizing() {
        let result = calculate(&LandingGearInput::reference("Test")).unwrap();

        assert!((result.max_moment_nm - 36.41).abs() < 0.01);
        assert!((result.ski_thickness_m - 4.770e-3).abs() < 1.0e-6);
        assert!((result.skis_mass_kg - 0.3206).abs() < 0.001);

        // At the sized thickness the plate sits exactly at yield
        let plate_stress = 6.0 * result.max_moment_nm
            / (0.04 * result.ski_thickness_m.powi(2));
        assert!((plate_stress - 240.0e6).abs() < 1.0e3);
    }

    #[test]
    fn test_leg_check() {
        let result = calculate(&LandingGearInput::reference("Test")).unwrap();

        assert!((result.leg_stress_pa - 229.3e6).abs() < 0.1e6);
        assert!(result.leg_yield_margin > 1.0);
        // Touchdown angles past 90 degrees put the axial term in compression
        assert!(result.leg_axial_stress_pa < 0.0);
        assert!((result.rear_leg_mass_kg - 0.01946).abs() < 1.0e-4);
        assert!((result.front_leg_mass_kg - 0.00596).abs() < 1.0e-4);
    }

    #[test]
    fn test_total_mass() {
        let result = calculate(&LandingGearInput::reference("Test")).unwrap();
        assert!((result.total_mass_kg - 0.3714).abs() < 0.001);
    }

    #[test]
    fn test_heavier_vehicle_needs_thicker_ski() {
        let mut input = LandingGearInput::reference("Test");
        input.mass_kg = 66.0;
        let heavy = calculate(&input).unwrap();
        let light = calculate(&LandingGearInput::reference("Test")).unwrap();
        assert!(heavy.ski_thickness_m > light.ski_thickness_m);
    }

    #[test]
    fn test_solid_leg_rejected() {
        let mut input = LandingGearInput::reference("Test");
        input.leg_wall_m = 0.005;
        assert_eq!(
            calculate(&input).unwrap_err().error_code(),
            "GEOMETRIC_INFEASIBILITY"
        );
    }
}
