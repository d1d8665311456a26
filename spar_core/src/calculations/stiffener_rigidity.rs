//! # Stiffener Wall Sizing by Rigidity
//!
//! Iterative sizing of the square stiffeners that stabilize one cylindrical
//! module. Unlike the closed-form stage stringer sizing, the requirement
//! here moves with the trial: a thicker stiffener wall stiffens the combined
//! section, lowers the bending stress, and so lowers its own Euler
//! requirement. Each trial recomputes
//!
//! - the combined inertia of skin plus eight stiffeners (parallel axis),
//! - the bending stress that inertia sees under the stage moment,
//! - the per-stiffener equivalent load (axial share plus bending boom load),
//! - the Euler-required inertia for that load,
//!
//! and the search converges when the actual wall inertia meets the
//! requirement within the configured tolerance. A wall growing past half the
//! section width is geometrically impossible and fails the run with a
//! "select a larger width" diagnostic instead of iterating forever.

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};
use crate::loads::LoadFactors;
use crate::materials;
use crate::solver::{find_min_thickness, MarginSample, SizingResult, SolverConfig};

/// Auxiliary trace key: hollow-square wall inertia (m⁴)
pub const AUX_ACTUAL_INERTIA: &str = "actual_inertia_m4";
/// Auxiliary trace key: Euler-required inertia (m⁴)
pub const AUX_REQUIRED_INERTIA: &str = "required_inertia_m4";
/// Auxiliary trace key: per-stiffener equivalent load (N)
pub const AUX_EQUIVALENT_LOAD: &str = "equivalent_load_n";

/// Input parameters for one module's stiffener wall sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiffenerRigidityInput {
    /// User label for this module (e.g. "Module 1")
    pub label: String,

    /// Catalog name of the stiffener alloy
    pub material: String,

    /// Cylinder radius (m)
    pub radius_m: f64,

    /// Skin thickness of the cylinder (m)
    pub skin_thickness_m: f64,

    /// Number of stiffeners around the circumference
    pub stiffener_count: usize,

    /// Outer width of the square stiffener section (m)
    pub stiffener_width_m: f64,

    /// Physical length of the module (m); effective column length is twice
    /// this (free-fixed assumption)
    pub module_length_m: f64,

    /// Mass this module supports (kg)
    pub mass_kg: f64,

    /// Stack length above the interface (m); CG assumed at half
    pub stack_length_m: f64,

    /// Launch acceleration factors and safety factor
    pub factors: LoadFactors,

    /// Convergence tolerance on the inertia shortfall (m⁴)
    pub tolerance_m4: f64,

    /// Wall thickness search grid
    pub grid: SolverConfig,
}

impl StiffenerRigidityInput {
    /// Reference vehicle modules, aft to forward.
    pub fn reference_modules() -> Vec<Self> {
        let base = |label: &str, width, length, mass, stack| StiffenerRigidityInput {
            label: label.to_string(),
            material: "Aluminium 6061-T6".to_string(),
            radius_m: 0.29 / 2.0,
            skin_thickness_m: 0.0005,
            stiffener_count: 8,
            stiffener_width_m: width,
            module_length_m: length,
            mass_kg: mass,
            stack_length_m: stack,
            factors: LoadFactors::default(),
            tolerance_m4: 0.001e-9,
            grid: SolverConfig {
                start_thickness_m: 0.01e-3,
                step_m: 0.01e-3,
                max_iterations: 10_000,
            },
        };
        vec![
            base("Module 1", 0.013, 0.312, 32.5, 1.831),
            base("Module 2", 0.010, 0.167, 25.116, 1.44994),
            base("Module 3", 0.010, 0.102, 18.7158, 1.21277),
        ]
    }

    /// Validate input parameters.
    pub fn validate(&self) -> SizeResult<()> {
        if self.radius_m <= 0.0 {
            return Err(SizeError::invalid_input(
                "radius_m",
                self.radius_m.to_string(),
                "Radius must be positive",
            ));
        }
        if self.skin_thickness_m <= 0.0 || self.skin_thickness_m >= self.radius_m {
            return Err(SizeError::invalid_input(
                "skin_thickness_m",
                self.skin_thickness_m.to_string(),
                "Skin thickness must be positive and below the radius",
            ));
        }
        if self.stiffener_count == 0 {
            return Err(SizeError::invalid_input(
                "stiffener_count",
                "0",
                "At least one stiffener is required",
            ));
        }
        if self.stiffener_width_m <= 0.0 {
            return Err(SizeError::invalid_input(
                "stiffener_width_m",
                self.stiffener_width_m.to_string(),
                "Stiffener width must be positive",
            ));
        }
        if self.module_length_m <= 0.0 || self.stack_length_m <= 0.0 || self.mass_kg <= 0.0 {
            return Err(SizeError::invalid_input(
                "module",
                self.label.clone(),
                "Module length, stack length and mass must be positive",
            ));
        }
        if self.tolerance_m4 < 0.0 {
            return Err(SizeError::invalid_input(
                "tolerance_m4",
                self.tolerance_m4.to_string(),
                "Tolerance cannot be negative",
            ));
        }
        self.factors.validate()?;
        self.grid.validate()
    }
}

/// Results from one module's stiffener wall sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StiffenerRigidityResult {
    /// Converged wall thickness (m)
    pub wall_thickness_m: f64,

    /// Iterations before the converged grid point
    pub iterations: usize,

    /// Wall inertia at convergence (m⁴)
    pub actual_inertia_m4: f64,

    /// Euler requirement at convergence (m⁴)
    pub required_inertia_m4: f64,

    /// Per-stiffener equivalent load at convergence (N)
    pub equivalent_load_n: f64,

    /// Bending stress of the combined section at convergence (Pa)
    pub bending_stress_pa: f64,

    /// Stiffener cross-section area at convergence (m²)
    pub area_m2: f64,

    /// Mass of all stiffeners on this module (kg)
    pub stiffeners_mass_kg: f64,

    /// Full grid-search trace (actual vs required inertia per trial)
    pub trace: SizingResult,
}

/// Size the stiffener wall for one module.
///
/// # Example
///
/// ```rust
/// use spar_core::calculations::stiffener_rigidity::{calculate, StiffenerRigidityInput};
///
/// let module = &StiffenerRigidityInput::reference_modules()[0];
/// let result = calculate(module).unwrap();
/// assert!(result.wall_thickness_m > 0.0);
/// ```
pub fn calculate(input: &StiffenerRigidityInput) -> SizeResult<StiffenerRigidityResult> {
    input.validate()?;

    let props = materials::lookup(&input.material)?;
    let e_pa = props.elastic_modulus_pa();

    let r = input.radius_m;
    let w = input.stiffener_width_m;
    let n = input.stiffener_count as f64;

    let skin_inertia_m4 =
        std::f64::consts::PI / 4.0 * (r.powi(4) - (r - input.skin_thickness_m).powi(4));

    // Stiffener stations at 0/45/90/45 degrees off the bending axis; the
    // remaining four mirror them, hence the factor 2 below
    let station_sq_sum_m2: f64 = [0.0_f64, 45.0, 90.0, 45.0]
        .iter()
        .map(|deg| (deg.to_radians().cos() * r).powi(2))
        .sum();

    let moment_nm = input.factors.lateral_limit_load_n(input.mass_kg) * input.stack_length_m / 2.0;
    let axial_share_n = input.factors.ultimate_axial_acceleration_m_s2() * input.mass_kg / n;
    let effective_length_m = 2.0 * input.module_length_m;
    let euler_denominator = e_pa * std::f64::consts::PI.powi(2);

    let mut bending_stress_pa = 0.0;

    let trace = find_min_thickness(&input.grid, |t| {
        if 2.0 * t > w {
            return Err(SizeError::geometric_infeasibility(
                "wall_thickness_m",
                t,
                format!(
                    "wall consumed the {} m stiffener section, select a larger width",
                    w
                ),
            ));
        }

        let wall_inertia_m4 = (w.powi(4) - (w - 2.0 * t).powi(4)) / 12.0;
        let area_m2 = w * w - (w - 2.0 * t).powi(2);
        let combined_inertia_m4 =
            skin_inertia_m4 + wall_inertia_m4 * n + 2.0 * area_m2 * station_sq_sum_m2;

        let sigma_b = moment_nm * r / combined_inertia_m4;
        bending_stress_pa = sigma_b;

        let equivalent_load_n = axial_share_n + sigma_b * area_m2;
        let required_inertia_m4 =
            equivalent_load_n * effective_length_m.powi(2) / euler_denominator;

        let margin = wall_inertia_m4 - required_inertia_m4 + input.tolerance_m4;
        Ok(MarginSample::new(margin)
            .with_aux(AUX_ACTUAL_INERTIA, wall_inertia_m4)
            .with_aux(AUX_REQUIRED_INERTIA, required_inertia_m4)
            .with_aux(AUX_EQUIVALENT_LOAD, equivalent_load_n))
    })?;

    let wall_thickness_m = trace.thickness_m;
    let last = trace.trace.last().ok_or_else(|| SizeError::Internal {
        message: "converged search returned an empty trace".to_string(),
    })?;
    let actual_inertia_m4 = last.auxiliary[AUX_ACTUAL_INERTIA];
    let required_inertia_m4 = last.auxiliary[AUX_REQUIRED_INERTIA];
    let equivalent_load_n = last.auxiliary[AUX_EQUIVALENT_LOAD];

    let area_m2 = w * w - (w - 2.0 * wall_thickness_m).powi(2);

    Ok(StiffenerRigidityResult {
        wall_thickness_m,
        iterations: trace.iterations,
        actual_inertia_m4,
        required_inertia_m4,
        equivalent_load_n,
        bending_stress_pa,
        area_m2,
        stiffeners_mass_kg: stiffener_mass_kg(
            w,
            wall_thickness_m,
            input.module_length_m,
            props.density_kg_m3,
            input.stiffener_count,
        ),
        trace,
    })
}

/// Mass of a module's stiffener set for a given wall, used both by the
/// sizing itself and by the operator's chosen-thickness recompute.
pub fn stiffener_mass_kg(
    width_m: f64,
    wall_m: f64,
    module_length_m: f64,
    density_kg_m3: f64,
    count: usize,
) -> f64 {
    let area_m2 = width_m * width_m - (width_m - 2.0 * wall_m).powi(2);
    count as f64 * area_m2 * module_length_m * density_kg_m3
}

/// Stiffener mass for an operator-chosen wall on this module's geometry.
/// The chosen wall must cover the sized minimum.
pub fn chosen_wall_mass_kg(
    input: &StiffenerRigidityInput,
    sized_wall_m: f64,
    chosen_wall_m: f64,
) -> SizeResult<f64> {
    if chosen_wall_m < sized_wall_m {
        return Err(SizeError::invalid_input(
            "chosen_wall_m",
            chosen_wall_m.to_string(),
            format!("Chosen wall must be at least the sized {} m", sized_wall_m),
        ));
    }
    let props = materials::lookup(&input.material)?;
    Ok(stiffener_mass_kg(
        input.stiffener_width_m,
        chosen_wall_m,
        input.module_length_m,
        props.density_kg_m3,
        input.stiffener_count,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_module_1() {
        let result = calculate(&StiffenerRigidityInput::reference_modules()[0]).unwrap();

        // 0.64 mm wall after 63 iterations
        assert!((result.wall_thickness_m - 0.64e-3).abs() < 1.0e-8);
        assert_eq!(result.iterations, 63);
        assert!((result.actual_inertia_m4 - 8.078e-10).abs() < 1.0e-12);
        assert!((result.required_inertia_m4 - 8.024e-10).abs() < 1.0e-12);
        assert!((result.equivalent_load_n - 1383.1).abs() < 0.5);
        assert!((result.stiffeners_mass_kg - 0.2140).abs() < 0.001);
        assert!((result.bending_stress_pa - 17.65e6).abs() < 0.05e6);
    }

    #[test]
    fn test_reference_modules_2_and_3() {
        let modules = StiffenerRigidityInput::reference_modules();

        let m2 = calculate(&modules[1]).unwrap();
        assert!((m2.wall_thickness_m - 0.20e-3).abs() < 1.0e-8);
        assert_eq!(m2.iterations, 19);
        assert!((m2.stiffeners_mass_kg - 0.0284).abs() < 0.0005);

        let m3 = calculate(&modules[2]).unwrap();
        assert!((m3.wall_thickness_m - 0.05e-3).abs() < 1.0e-8);
        assert_eq!(m3.iterations, 4);
        assert!((m3.stiffeners_mass_kg - 0.0044).abs() < 0.0005);
    }

    #[test]
    fn test_requirement_relaxes_as_wall_grows() {
        let result = calculate(&StiffenerRigidityInput::reference_modules()[0]).unwrap();
        let required = result.trace.auxiliary_curve(AUX_REQUIRED_INERTIA);

        // Stiffer section, lower bending stress, lower requirement
        for pair in required.windows(2) {
            assert!(pair[1].1 <= pair[0].1);
        }
    }

    #[test]
    fn test_undersized_width_is_geometric_error() {
        let mut input = StiffenerRigidityInput::reference_modules()[0].clone();
        input.stiffener_width_m = 0.002;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRIC_INFEASIBILITY");
    }

    #[test]
    fn test_chosen_wall_must_cover_sized_wall() {
        let input = StiffenerRigidityInput::reference_modules()[0].clone();
        let result = calculate(&input).unwrap();

        let heavier =
            chosen_wall_mass_kg(&input, result.wall_thickness_m, 1.0e-3).unwrap();
        assert!(heavier > result.stiffeners_mass_kg);

        let err = chosen_wall_mass_kg(&input, result.wall_thickness_m, 0.1e-3).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
