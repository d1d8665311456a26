//! # Stage Stringer Stability
//!
//! Closed-form sizing of the square-tube stringers that carry each stage of
//! the vehicle through launch. Per stage, the stringer must provide the
//! Euler-column moment of inertia for its share of the axial load plus the
//! bending-induced boom load:
//!
//! ```text
//! I_req = (P_axial/n + M R / sum(d_i^2)) / (pi^2 E / (Le L)^2)
//! ```
//!
//! Inverting the hollow-square inertia for the wall gives
//! `t = (w - (w^4 - 12 I_req)^(1/4)) / 2`. A negative or complex root means
//! the requirement is already met by any manufacturable wall, so the wall
//! clamps to the minimum gauge and the result says so.

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};
use crate::loads::{LoadFactors, StageMass};
use crate::materials;

/// Default minimum manufacturable wall (m)
pub const MIN_GAUGE_M: f64 = 0.0005;

/// One stage entry: the stage the stringers carry plus the chosen
/// stringer outer width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringerStage {
    /// Stage definition (mass, stack length, module length)
    pub stage: StageMass,

    /// Outer width of the square stringer section (m)
    pub stringer_width_m: f64,
}

/// Input parameters for stage stringer sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringerStabilityInput {
    /// User label for this sizing run
    pub label: String,

    /// Catalog name of the stringer alloy
    pub material: String,

    /// Cylinder diameter (m)
    pub diameter_m: f64,

    /// Number of stringers around the circumference
    pub stringer_count: usize,

    /// Effective length ratio Le/L for the column boundary conditions
    pub effective_length_ratio: f64,

    /// Minimum manufacturable wall thickness (m)
    pub min_gauge_m: f64,

    /// Skin thickness used for the skin mass roll-up (m)
    pub skin_thickness_m: f64,

    /// Skin length used for the skin mass roll-up (m)
    pub skin_length_m: f64,

    /// Launch acceleration factors and safety factor
    pub factors: LoadFactors,

    /// Stages, aft to forward
    pub stages: Vec<StringerStage>,
}

impl StringerStabilityInput {
    /// Reference vehicle: three stages on a 290 mm cylinder.
    pub fn reference(label: impl Into<String>) -> Self {
        StringerStabilityInput {
            label: label.into(),
            material: "Aluminium 6061-T6".to_string(),
            diameter_m: 0.29,
            stringer_count: 8,
            effective_length_ratio: 2.0,
            min_gauge_m: MIN_GAUGE_M,
            skin_thickness_m: 0.0005,
            skin_length_m: 0.79,
            factors: LoadFactors::default(),
            stages: vec![
                StringerStage {
                    stage: StageMass {
                        label: "Return aft".to_string(),
                        mass_kg: 32.5,
                        stack_length_m: 1.731,
                        module_length_m: 0.28,
                    },
                    stringer_width_m: 0.015,
                },
                StringerStage {
                    stage: StageMass {
                        label: "Payload".to_string(),
                        mass_kg: 26.34,
                        stack_length_m: 1.382,
                        module_length_m: 0.18,
                    },
                    stringer_width_m: 0.01,
                },
                StringerStage {
                    stage: StageMass {
                        label: "Return forward".to_string(),
                        mass_kg: 18.42,
                        stack_length_m: 1.133,
                        module_length_m: 0.13,
                    },
                    stringer_width_m: 0.01,
                },
            ],
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> SizeResult<()> {
        if self.diameter_m <= 0.0 {
            return Err(SizeError::invalid_input(
                "diameter_m",
                self.diameter_m.to_string(),
                "Diameter must be positive",
            ));
        }
        if self.stringer_count < 3 {
            return Err(SizeError::invalid_input(
                "stringer_count",
                self.stringer_count.to_string(),
                "At least 3 stringers are required",
            ));
        }
        if self.effective_length_ratio <= 0.0 {
            return Err(SizeError::invalid_input(
                "effective_length_ratio",
                self.effective_length_ratio.to_string(),
                "Effective length ratio must be positive",
            ));
        }
        if self.min_gauge_m <= 0.0 {
            return Err(SizeError::invalid_input(
                "min_gauge_m",
                self.min_gauge_m.to_string(),
                "Minimum gauge must be positive",
            ));
        }
        if self.stages.is_empty() {
            return Err(SizeError::invalid_input(
                "stages",
                "0",
                "At least one stage is required",
            ));
        }
        for entry in &self.stages {
            if entry.stringer_width_m <= 0.0
                || entry.stage.mass_kg <= 0.0
                || entry.stage.stack_length_m <= 0.0
                || entry.stage.module_length_m <= 0.0
            {
                return Err(SizeError::invalid_input(
                    "stages",
                    entry.stage.label.clone(),
                    "Stage masses, lengths and stringer widths must be positive",
                ));
            }
        }
        self.factors.validate()
    }
}

/// Sizing result for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageStringerResult {
    /// Stage label
    pub label: String,

    /// Required moment of inertia per stringer (m⁴)
    pub required_inertia_m4: f64,

    /// Sized wall thickness (m)
    pub wall_thickness_m: f64,

    /// True when the closed form gave no admissible wall (or one below
    /// gauge) and the minimum gauge was applied instead
    pub min_gauge_applied: bool,

    /// Stringer cross-section area (m²)
    pub area_m2: f64,

    /// Mass of all stringers on this stage (kg)
    pub stringers_mass_kg: f64,
}

/// Results from stage stringer sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringerStabilityResult {
    /// Per-stage sizing, same order as the input
    pub stages: Vec<StageStringerResult>,

    /// Total stringer mass across all stages (kg)
    pub total_stringers_mass_kg: f64,

    /// Skin mass over the full module length (kg)
    pub skin_mass_kg: f64,

    /// Stringers plus skin (kg)
    pub total_structure_mass_kg: f64,
}

/// Size the stage stringers of the reference cylinder.
///
/// # Example
///
/// ```rust
/// use spar_core::calculations::stringer_stability::{calculate, StringerStabilityInput};
///
/// let result = calculate(&StringerStabilityInput::reference("Demo")).unwrap();
/// assert_eq!(result.stages.len(), 3);
/// ```
pub fn calculate(input: &StringerStabilityInput) -> SizeResult<StringerStabilityResult> {
    input.validate()?;

    let props = materials::lookup(&input.material)?;
    let e_pa = props.elastic_modulus_pa();
    let rho = props.density_kg_m3;

    let radius_m = input.diameter_m / 2.0;
    let n = input.stringer_count;

    // Parallel-axis distance sum, one stringer rotated to the bottom
    let distance_sq_sum_m2: f64 = (0..n)
        .map(|i| {
            let theta =
                2.0 * std::f64::consts::PI * i as f64 / n as f64 + std::f64::consts::FRAC_PI_2;
            (radius_m * theta.sin()).powi(2)
        })
        .sum();

    let axial_acc = input.factors.ultimate_axial_acceleration_m_s2();

    let mut stages = Vec::with_capacity(input.stages.len());
    let mut total_stringers_mass_kg = 0.0;

    for entry in &input.stages {
        let stage = &entry.stage;
        let w = entry.stringer_width_m;

        let moment_nm = stage.bending_moment_nm(&input.factors);

        // Euler requirement: axial share plus moment-induced boom load
        let euler_n_per_m4 = std::f64::consts::PI.powi(2) * e_pa
            / (input.effective_length_ratio * stage.module_length_m).powi(2);
        let axial_share_n = axial_acc * stage.mass_kg / n as f64;
        let boom_load_n = moment_nm * radius_m / distance_sq_sum_m2;
        let required_inertia_m4 = (axial_share_n + boom_load_n) / euler_n_per_m4;

        let (wall_thickness_m, min_gauge_applied) =
            match wall_for_inertia(w, required_inertia_m4) {
                Some(t) if t >= input.min_gauge_m => (t, false),
                _ => (input.min_gauge_m, true),
            };

        let area_m2 = w * w - (w - 2.0 * wall_thickness_m).powi(2);
        let stringers_mass_kg = area_m2 * stage.module_length_m * rho * n as f64;
        total_stringers_mass_kg += stringers_mass_kg;

        stages.push(StageStringerResult {
            label: stage.label.clone(),
            required_inertia_m4,
            wall_thickness_m,
            min_gauge_applied,
            area_m2,
            stringers_mass_kg,
        });
    }

    let skin_mass_kg = 2.0 * std::f64::consts::PI * radius_m * input.skin_thickness_m
        * input.skin_length_m
        * rho;

    Ok(StringerStabilityResult {
        stages,
        total_stringers_mass_kg,
        skin_mass_kg,
        total_structure_mass_kg: total_stringers_mass_kg + skin_mass_kg,
    })
}

/// Wall thickness of a hollow square of width `w` whose section inertia
/// equals `inertia_m4`, inverting `I = (w^4 - (w - 2t)^4) / 12`.
///
/// Returns `None` when no real non-negative wall satisfies the requirement
/// (the radicand going negative means even a solid section falls short).
fn wall_for_inertia(w: f64, inertia_m4: f64) -> Option<f64> {
    let radicand = w.powi(4) - 12.0 * inertia_m4;
    if radicand < 0.0 {
        return None;
    }
    let t = (w - radicand.powf(0.25)) / 2.0;
    if t < 0.0 {
        return None;
    }
    Some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_stage_walls() {
        let result = calculate(&StringerStabilityInput::reference("Test")).unwrap();

        // Stage 1: 0.73 mm wall, no gauge clamp
        assert!((result.stages[0].wall_thickness_m - 0.7305e-3).abs() < 1.0e-6);
        assert!(!result.stages[0].min_gauge_applied);
        assert!((result.stages[0].required_inertia_m4 - 1.4187e-9).abs() < 1.0e-12);

        // Stage 2: 0.77 mm wall on the narrower section
        assert!((result.stages[1].wall_thickness_m - 0.7674e-3).abs() < 1.0e-6);
        assert!(!result.stages[1].min_gauge_applied);

        // Stage 3 is light enough that the gauge governs
        assert_eq!(result.stages[2].wall_thickness_m, MIN_GAUGE_M);
        assert!(result.stages[2].min_gauge_applied);
    }

    #[test]
    fn test_reference_masses() {
        let result = calculate(&StringerStabilityInput::reference("Test")).unwrap();

        assert!((result.stages[0].stringers_mass_kg - 0.2531).abs() < 0.001);
        assert!((result.stages[1].stringers_mass_kg - 0.1106).abs() < 0.001);
        assert!((result.stages[2].stringers_mass_kg - 0.0535).abs() < 0.001);
        assert!((result.skin_mass_kg - 0.9752).abs() < 0.001);

        let sum: f64 = result.stages.iter().map(|s| s.stringers_mass_kg).sum();
        assert!((result.total_stringers_mass_kg - sum).abs() < 1e-12);
        assert!(
            (result.total_structure_mass_kg
                - (result.total_stringers_mass_kg + result.skin_mass_kg))
                .abs()
                < 1e-12
        );
    }

    #[test]
    fn test_wall_inversion() {
        // Round trip: wall -> inertia -> wall
        let w: f64 = 0.015;
        let t: f64 = 0.001;
        let inertia = (w.powi(4) - (w - 2.0 * t).powi(4)) / 12.0;
        let back = wall_for_inertia(w, inertia).unwrap();
        assert!((back - t).abs() < 1e-12);

        // Requirement beyond a solid section has no wall
        assert_eq!(wall_for_inertia(0.01, 1.0), None);
    }

    #[test]
    fn test_zero_requirement_clamps_to_gauge() {
        let mut input = StringerStabilityInput::reference("Test");
        // Featherweight stage: requirement far below gauge
        input.stages.truncate(1);
        input.stages[0].stage.mass_kg = 0.001;
        let result = calculate(&input).unwrap();
        assert!(result.stages[0].min_gauge_applied);
        assert_eq!(result.stages[0].wall_thickness_m, MIN_GAUGE_M);
    }

    #[test]
    fn test_empty_stages_rejected() {
        let mut input = StringerStabilityInput::reference("Test");
        input.stages.clear();
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
