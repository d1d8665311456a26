//! # Wingbox Wall Sizing
//!
//! Sizes the four walls of a rectangular thin-walled wingbox under lift,
//! drag and pitching torsion. Assumes thin walls, evenly distributed loads
//! and constant shear along the span; the root carries the worst section.
//!
//! Five sizing operations run against the same section model, each a grid
//! search on wall thickness:
//!
//! 1. bending stress at the section corners vs yield,
//! 2. peak shear flow (open-section march + torsion + moment correction)
//!    vs shear yield,
//! 3. compression buckling of the top/side panels (`C = 4` simply
//!    supported),
//! 4. shear buckling of the top/side panels (`k0 = 5.34 + 4 (b/a)²`),
//! 5. the combined interaction `sigma/sigma_cr + (tau/tau_cr)² <= 1`,
//!    started from the worst single-mode requirement.
//!
//! The sign conventions of the shear-flow and torsion corrections carry
//! over from the hand analysis and are not independently verified here.

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};
use crate::solver::{find_min_thickness, MarginSample, SizingResult, SolverConfig};

/// Auxiliary trace key: governing wall stress (Pa)
pub const AUX_STRESS: &str = "stress_pa";
/// Auxiliary trace key: panel-buckling required thickness (m)
pub const AUX_REQUIRED_THICKNESS: &str = "required_thickness_m";
/// Auxiliary trace key: combined-buckling interaction ratio
pub const AUX_INTERACTION_RATIO: &str = "interaction_ratio";

/// Wall material constants for the wingbox.
///
/// The wingbox needs a shear yield alongside the tensile properties, so the
/// material is carried as explicit constants instead of a catalog name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallMaterial {
    /// Tensile yield strength (Pa)
    pub yield_pa: f64,

    /// Shear yield strength (Pa)
    pub shear_yield_pa: f64,

    /// Poisson's ratio
    pub poisson_ratio: f64,

    /// Elastic modulus (Pa)
    pub elastic_modulus_pa: f64,

    /// Density (kg/m³)
    pub density_kg_m3: f64,
}

impl WallMaterial {
    /// 17-4PH stainless, H900 sheet values
    pub fn steel_17_4ph() -> Self {
        WallMaterial {
            yield_pa: 1000.0e6,
            shear_yield_pa: 827.0e6,
            poisson_ratio: 0.28,
            elastic_modulus_pa: 193.0e9,
            density_kg_m3: 7800.0,
        }
    }

    /// Aluminium 6061-T6 sheet values
    pub fn aluminium_6061_t6() -> Self {
        WallMaterial {
            yield_pa: 276.0e6,
            shear_yield_pa: 207.0e6,
            poisson_ratio: 0.33,
            elastic_modulus_pa: 68.9e9,
            density_kg_m3: 2700.0,
        }
    }

    /// Quasi-isotropic carbon laminate values
    pub fn carbon_composite() -> Self {
        WallMaterial {
            yield_pa: 787.0e6,
            shear_yield_pa: 128.0e6,
            poisson_ratio: 0.3,
            elastic_modulus_pa: 125.0e9,
            density_kg_m3: 1580.0,
        }
    }
}

/// Input parameters for wingbox wall sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WingboxInput {
    /// User label for this wingbox
    pub label: String,

    /// Wall material constants
    pub material: WallMaterial,

    /// Maximum lift carried by this wingbox (N)
    pub lift_n: f64,

    /// Maximum drag carried by this wingbox (N)
    pub drag_n: f64,

    /// Pitching torsion, nose-down negative (N·m)
    pub torsion_nm: f64,

    /// Structural span of the box (m)
    pub span_m: f64,

    /// Box width, chordwise (m)
    pub width_m: f64,

    /// Box height (m)
    pub height_m: f64,

    /// Distance from box centre to the lift application point (m);
    /// folds a torsion component of the vertical shear into the torque
    pub shear_offset_m: f64,

    /// Design factor on all applied loads
    pub design_factor: f64,

    /// Integration step for the shear-flow march (m)
    pub shear_step_m: f64,

    /// Thickness search grid; buckling searches reuse the step and bound
    /// with their own starting points
    pub grid: SolverConfig,
}

impl WingboxInput {
    /// Reference UAV wingbox in 17-4PH, half-vehicle loads.
    pub fn reference(label: impl Into<String>) -> Self {
        WingboxInput {
            label: label.into(),
            material: WallMaterial::steel_17_4ph(),
            lift_n: 998.44 / 2.0,
            drag_n: 152.01 / 2.0,
            torsion_nm: -8.68 / 2.0,
            span_m: 0.6,
            width_m: 66.8e-3,
            height_m: 9.0e-3,
            shear_offset_m: 32.5e-3,
            design_factor: 1.5,
            shear_step_m: 1.0e-6,
            grid: SolverConfig {
                start_thickness_m: 0.01e-3,
                step_m: 0.01e-3,
                max_iterations: 10_000,
            },
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> SizeResult<()> {
        for (name, value) in [
            ("lift_n", self.lift_n),
            ("span_m", self.span_m),
            ("width_m", self.width_m),
            ("height_m", self.height_m),
            ("shear_step_m", self.shear_step_m),
        ] {
            if value <= 0.0 {
                return Err(SizeError::invalid_input(
                    name,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        if self.drag_n < 0.0 {
            return Err(SizeError::invalid_input(
                "drag_n",
                self.drag_n.to_string(),
                "Drag cannot be negative",
            ));
        }
        if self.design_factor < 1.0 {
            return Err(SizeError::invalid_input(
                "design_factor",
                self.design_factor.to_string(),
                "Design factor must be at least 1.0",
            ));
        }
        if self.material.yield_pa <= 0.0 || self.material.shear_yield_pa <= 0.0 {
            return Err(SizeError::invalid_input(
                "material",
                format!(
                    "{}/{}",
                    self.material.yield_pa, self.material.shear_yield_pa
                ),
                "Yield strengths must be positive",
            ));
        }
        self.grid.validate()
    }
}

/// Root loads of the box after the design factor is applied.
#[derive(Debug, Clone, Copy)]
struct RootLoads {
    shear_y_n: f64,
    shear_x_n: f64,
    moment_x_nm: f64,
    moment_y_nm: f64,
    torsion_flow_pa_m: f64,
}

impl RootLoads {
    fn derive(input: &WingboxInput) -> Self {
        let a = input.design_factor;
        let lift = a * input.lift_n;
        let drag = a * input.drag_n;
        // The vertical shear acts offset from the box centre, adding its
        // own torsion component
        let torque = a * input.torsion_nm + lift * input.shear_offset_m;

        let moment_x_nm = lift * 0.5 * input.span_m;
        let moment_y_nm = -(drag * 0.5 * input.span_m);

        RootLoads {
            shear_y_n: -lift,
            shear_x_n: drag,
            moment_x_nm,
            moment_y_nm,
            torsion_flow_pa_m: -torque / (2.0 * input.width_m * input.height_m),
        }
    }
}

/// Hollow-rectangle section inertias for a uniform wall `t`.
fn section_inertias(w: f64, h: f64, t: f64) -> (f64, f64) {
    let i_xx = (w * h.powi(3)) / 12.0 - ((w - 2.0 * t) * (h - 2.0 * t).powi(3)) / 12.0;
    let i_yy = (h * w.powi(3)) / 12.0 - ((h - 2.0 * t) * (w - 2.0 * t).powi(3)) / 12.0;
    (i_xx, i_yy)
}

/// Peak corner bending stress; linear in the wall coordinates, so the
/// candidates are the panel edges.
fn bending_stress_pa(loads: &RootLoads, w: f64, h: f64, i_xx: f64, i_yy: f64) -> f64 {
    let top = [-w / 2.0, w / 2.0]
        .iter()
        .map(|x| loads.moment_y_nm * x / i_yy + loads.moment_x_nm * (h / 2.0) / i_xx)
        .fold(f64::NEG_INFINITY, f64::max);
    let side = [-h / 2.0, h / 2.0]
        .iter()
        .map(|y| loads.moment_y_nm * (w / 2.0) / i_yy + loads.moment_x_nm * y / i_xx)
        .fold(f64::NEG_INFINITY, f64::max);
    side.max(top)
}

/// Peak shear stress from the shear-flow march around the four walls.
///
/// Open-section flows are integrated wall by wall; the closed-section
/// correction `qs0` restores moment equilibrium and the torsion flow `qT`
/// is superposed. Only running extrema and the moment sum are kept.
fn shear_stress_pa(input: &WingboxInput, loads: &RootLoads, i_xx: f64, i_yy: f64, t: f64) -> f64 {
    let w = input.width_m;
    let h = input.height_m;
    let ds = input.shear_step_m;
    let v_y = loads.shear_y_n;
    let v_x = loads.shear_x_n;

    let n_h = (h / ds).round() as usize;
    let n_w = (w / ds).round() as usize;

    let q12 = |s: f64| {
        -(v_y / i_xx) * (0.5 * t * h * s - 0.5 * t * s * s) - (v_x * w * t * s) / (2.0 * i_yy)
    };
    let q2 = q12(n_h as f64 * ds);
    let q23 = move |s: f64| {
        q2 + (v_y / i_xx) * (0.5 * t * h * s) - (v_x / i_yy) * (0.5 * t * w * s - 0.5 * t * s * s)
    };
    let q3 = q23(n_w as f64 * ds);
    let q34 = move |s: f64| {
        q3 - (v_y / i_xx) * (-0.5 * t * h * s + 0.5 * t * s * s) + (v_x * w * t * s) / (2.0 * i_yy)
    };
    let q4 = q34(n_h as f64 * ds);
    let q41 = move |s: f64| {
        q4 - (v_y / i_xx) * (0.5 * t * h * s) - (v_x / i_yy) * (-0.5 * t * w * s + 0.5 * t * s * s)
    };

    let walls: [(&dyn Fn(f64) -> f64, usize, f64); 4] = [
        (&q12, n_h, 0.5 * w),
        (&q23, n_w, 0.5 * h),
        (&q34, n_h, 0.5 * w),
        (&q41, n_w, 0.5 * h),
    ];

    let mut moment_sum_nm = 0.0;
    let mut extrema = [(f64::INFINITY, f64::NEG_INFINITY); 4];
    for (wall, (flow, n, arm)) in walls.iter().enumerate() {
        let mut sum = 0.0;
        let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
        for i in 0..=*n {
            let q = flow(i as f64 * ds);
            sum += q;
            lo = lo.min(q);
            hi = hi.max(q);
        }
        moment_sum_nm += sum * ds * arm;
        extrema[wall] = (lo, hi);
    }

    let qs0 = -moment_sum_nm / (2.0 * w * h);
    let shift = qs0 + loads.torsion_flow_pa_m;
    let q_max = extrema
        .iter()
        .map(|(lo, hi)| (lo + shift).abs().max((hi + shift).abs()))
        .fold(0.0, f64::max);

    q_max / t
}

/// One grid search sized against a yield allowable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldSizing {
    /// Converged wall thickness (m)
    pub thickness_m: f64,

    /// Wall stress at convergence (Pa)
    pub stress_pa: f64,

    /// Iterations before the converged grid point
    pub iterations: usize,

    /// Full grid-search trace
    pub trace: SizingResult,
}

/// One panel-buckling grid search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucklingSizing {
    /// Converged grid thickness (m)
    pub thickness_m: f64,

    /// Thickness the buckling formula itself asked for at convergence (m);
    /// at most `thickness_m`
    pub required_thickness_m: f64,

    /// Iterations before the converged grid point
    pub iterations: usize,
}

/// Combined bending/shear interaction search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedSizing {
    /// Converged grid thickness (m)
    pub thickness_m: f64,

    /// Interaction ratio at convergence (≤ 1)
    pub interaction_ratio: f64,

    /// Iterations before the converged grid point
    pub iterations: usize,
}

/// Results from wingbox wall sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WingboxResult {
    /// Bending-yield sizing (governs all four walls together)
    pub bending: YieldSizing,

    /// Shear-yield sizing
    pub shear: YieldSizing,

    /// Compression buckling of the top/bottom panels
    pub compression_buckling_top: BucklingSizing,

    /// Compression buckling of the fore/aft panels
    pub compression_buckling_side: BucklingSizing,

    /// Shear buckling of the top/bottom panels
    pub shear_buckling_top: BucklingSizing,

    /// Shear buckling of the fore/aft panels
    pub shear_buckling_side: BucklingSizing,

    /// Combined interaction, top/bottom panels
    pub combined_top: CombinedSizing,

    /// Combined interaction, fore/aft panels
    pub combined_side: CombinedSizing,

    /// Governing thickness for the top/bottom walls (m)
    pub governing_top_m: f64,

    /// Governing thickness for the fore/aft walls (m)
    pub governing_side_m: f64,
}

/// Size the wingbox walls.
///
/// # Example
///
/// ```rust
/// use spar_core::calculations::wingbox::{calculate, WingboxInput};
///
/// let result = calculate(&WingboxInput::reference("Demo")).unwrap();
/// assert!(result.governing_top_m >= result.bending.thickness_m);
/// ```
pub fn calculate(input: &WingboxInput) -> SizeResult<WingboxResult> {
    input.validate()?;

    let loads = RootLoads::derive(input);
    let w = input.width_m;
    let h = input.height_m;
    let mat = &input.material;

    // Bending yield
    let bending_trace = find_min_thickness(&input.grid, |t| {
        let (i_xx, i_yy) = section_inertias(w, h, t);
        let stress = bending_stress_pa(&loads, w, h, i_xx, i_yy);
        Ok(MarginSample::new(mat.yield_pa - stress).with_aux(AUX_STRESS, stress))
    })?;
    let bending = yield_sizing(bending_trace, mat.yield_pa);

    // Shear yield
    let shear_trace = find_min_thickness(&input.grid, |t| {
        let (i_xx, i_yy) = section_inertias(w, h, t);
        let stress = shear_stress_pa(input, &loads, i_xx, i_yy, t);
        Ok(MarginSample::new(mat.shear_yield_pa - stress).with_aux(AUX_STRESS, stress))
    })?;
    let shear = yield_sizing(shear_trace, mat.shear_yield_pa);

    // Panel buckling, started from the matching yield thickness
    let compression_buckling_top = compression_buckling(input, &loads, bending.thickness_m, w)?;
    let compression_buckling_side = compression_buckling(input, &loads, bending.thickness_m, h)?;
    let shear_buckling_top = shear_buckling(input, &loads, shear.thickness_m, w)?;
    let shear_buckling_side = shear_buckling(input, &loads, shear.thickness_m, h)?;

    // Combined interaction from the worst single-mode requirement
    let start_top = shear_buckling_top
        .required_thickness_m
        .max(bending.thickness_m)
        .max(compression_buckling_top.required_thickness_m);
    let combined_top = combined_interaction(input, &loads, start_top, w)?;

    let start_side = shear_buckling_side
        .required_thickness_m
        .max(bending.thickness_m)
        .max(compression_buckling_side.required_thickness_m);
    let combined_side = combined_interaction(input, &loads, start_side, h)?;

    let governing_top_m = combined_top
        .thickness_m
        .max(shear.thickness_m)
        .max(compression_buckling_top.thickness_m)
        .max(shear_buckling_top.thickness_m);
    let governing_side_m = combined_side
        .thickness_m
        .max(shear.thickness_m)
        .max(compression_buckling_side.thickness_m)
        .max(shear_buckling_side.thickness_m);

    Ok(WingboxResult {
        bending,
        shear,
        compression_buckling_top,
        compression_buckling_side,
        shear_buckling_top,
        shear_buckling_side,
        combined_top,
        combined_side,
        governing_top_m,
        governing_side_m,
    })
}

fn yield_sizing(trace: SizingResult, allowable_pa: f64) -> YieldSizing {
    let stress = allowable_pa - trace.margin;
    YieldSizing {
        thickness_m: trace.thickness_m,
        stress_pa: stress,
        iterations: trace.iterations,
        trace,
    }
}

/// Simply-supported panel compression buckling, C = 4.
fn compression_buckling(
    input: &WingboxInput,
    loads: &RootLoads,
    start_m: f64,
    panel_width_m: f64,
) -> SizeResult<BucklingSizing> {
    const C: f64 = 4.0;
    let mat = &input.material;
    let grid = SolverConfig {
        start_thickness_m: start_m,
        ..input.grid
    };
    let factor = 12.0 * (1.0 - mat.poisson_ratio.powi(2)) * panel_width_m.powi(2)
        / (C * std::f64::consts::PI.powi(2) * mat.elastic_modulus_pa);

    let trace = find_min_thickness(&grid, |t| {
        let (i_xx, i_yy) = section_inertias(input.width_m, input.height_m, t);
        let stress = bending_stress_pa(loads, input.width_m, input.height_m, i_xx, i_yy);
        let required = (stress * factor).sqrt();
        Ok(MarginSample::new(t - required).with_aux(AUX_REQUIRED_THICKNESS, required))
    })?;

    Ok(BucklingSizing {
        thickness_m: trace.thickness_m,
        required_thickness_m: trace.thickness_m - trace.margin,
        iterations: trace.iterations,
    })
}

/// Panel shear buckling, `k0 = 5.34 + 4 (b/a)²`.
fn shear_buckling(
    input: &WingboxInput,
    loads: &RootLoads,
    start_m: f64,
    panel_width_m: f64,
) -> SizeResult<BucklingSizing> {
    let mat = &input.material;
    let k0 = 5.34 + 4.0 / (input.span_m / panel_width_m).powi(2);
    let grid = SolverConfig {
        start_thickness_m: start_m,
        ..input.grid
    };
    let factor = 12.0 * (1.0 - mat.poisson_ratio.powi(2)) * panel_width_m.powi(2)
        / (k0 * std::f64::consts::PI.powi(2) * mat.elastic_modulus_pa);

    let trace = find_min_thickness(&grid, |t| {
        let (i_xx, i_yy) = section_inertias(input.width_m, input.height_m, t);
        let stress = shear_stress_pa(input, loads, i_xx, i_yy, t);
        let required = (stress * factor).sqrt();
        Ok(MarginSample::new(t - required).with_aux(AUX_REQUIRED_THICKNESS, required))
    })?;

    Ok(BucklingSizing {
        thickness_m: trace.thickness_m,
        required_thickness_m: trace.thickness_m - trace.margin,
        iterations: trace.iterations,
    })
}

/// Combined bending/shear buckling interaction.
fn combined_interaction(
    input: &WingboxInput,
    loads: &RootLoads,
    start_m: f64,
    panel_width_m: f64,
) -> SizeResult<CombinedSizing> {
    const C: f64 = 4.0;
    let mat = &input.material;
    let k0 = 5.34 + 4.0 / (input.span_m / panel_width_m).powi(2);
    let grid = SolverConfig {
        start_thickness_m: start_m,
        ..input.grid
    };
    let denom = 12.0 * (1.0 - mat.poisson_ratio.powi(2)) * panel_width_m.powi(2);

    let trace = find_min_thickness(&grid, |t| {
        let (i_xx, i_yy) = section_inertias(input.width_m, input.height_m, t);
        let sigma = bending_stress_pa(loads, input.width_m, input.height_m, i_xx, i_yy);
        let tau = shear_stress_pa(input, loads, i_xx, i_yy, t);
        let sigma_cr = C * std::f64::consts::PI.powi(2) * mat.elastic_modulus_pa * t * t / denom;
        let tau_cr = k0 * std::f64::consts::PI.powi(2) * mat.elastic_modulus_pa * t * t / denom;
        let ratio = sigma / sigma_cr + (tau / tau_cr).powi(2);
        Ok(MarginSample::new(1.0 - ratio).with_aux(AUX_INTERACTION_RATIO, ratio))
    })?;

    Ok(CombinedSizing {
        thickness_m: trace.thickness_m,
        interaction_ratio: 1.0 - trace.margin,
        iterations: trace.iterations,
    })
}

/// Mass of one wingbox for selected per-wall thicknesses
/// `[top, aft, bottom, fore]` (kg).
pub fn selected_mass_kg(input: &WingboxInput, thicknesses_m: [f64; 4]) -> f64 {
    let [t1, t2, t3, t4] = thicknesses_m;
    let w = input.width_m;
    let h = input.height_m;
    let cross_section_m2 = w * h - (w - t1 - t3) * (h - t2 - t4);
    cross_section_m2 * input.span_m * input.material.density_kg_m3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bending_sizing() {
        let result = calculate(&WingboxInput::reference("Test")).unwrap();

        // 0.42 mm wall brings the corner stress under 1000 MPa
        assert!((result.bending.thickness_m - 0.42e-3).abs() < 1.0e-8);
        assert_eq!(result.bending.iterations, 41);
        assert!((result.bending.stress_pa - 983.6e6).abs() < 1.0e6);
    }

    #[test]
    fn test_shear_sizing() {
        let result = calculate(&WingboxInput::reference("Test")).unwrap();

        assert!((result.shear.thickness_m - 0.08e-3).abs() < 1.0e-8);
        assert_eq!(result.shear.iterations, 7);
        assert!((result.shear.stress_pa - 726.9e6).abs() < 2.0e6);
    }

    #[test]
    fn test_panel_buckling() {
        let result = calculate(&WingboxInput::reference("Test")).unwrap();

        // Wide top panel needs far more wall than the short side panel
        assert!((result.compression_buckling_top.thickness_m - 1.52e-3).abs() < 1.0e-8);
        assert_eq!(result.compression_buckling_top.iterations, 110);
        assert!(
            (result.compression_buckling_side.required_thickness_m - 0.340e-3).abs() < 2.0e-6
        );
        assert_eq!(result.compression_buckling_side.iterations, 0);

        assert!((result.shear_buckling_top.thickness_m - 0.68e-3).abs() < 1.0e-8);
        assert!((result.shear_buckling_side.thickness_m - 0.18e-3).abs() < 1.0e-8);
    }

    #[test]
    fn test_combined_interaction() {
        let result = calculate(&WingboxInput::reference("Test")).unwrap();

        assert!((result.combined_top.thickness_m - 1.53e-3).abs() < 2.0e-6);
        assert!(result.combined_top.interaction_ratio <= 1.0);
        assert!(result.combined_top.interaction_ratio > 0.9);

        // Side panel already satisfies the interaction at its start
        assert_eq!(result.combined_side.iterations, 0);
        assert!((result.combined_side.interaction_ratio - 0.661).abs() < 0.01);
    }

    #[test]
    fn test_governing_thickness() {
        let result = calculate(&WingboxInput::reference("Test")).unwrap();

        assert!((result.governing_top_m - result.combined_top.thickness_m).abs() < 1e-12);
        assert!(result.governing_side_m >= result.bending.thickness_m);
        assert!(result.governing_top_m > result.governing_side_m);
    }

    #[test]
    fn test_selected_mass() {
        let input = WingboxInput::reference("Test");
        let mass = selected_mass_kg(&input, [1.0e-3; 4]);
        assert!((mass - 0.6908).abs() < 0.001);

        // Thicker walls weigh more
        assert!(selected_mass_kg(&input, [2.0e-3; 4]) > mass);
    }

    #[test]
    fn test_validation() {
        let mut input = WingboxInput::reference("Test");
        input.height_m = 0.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = WingboxInput::reference("Test");
        input.design_factor = 0.5;
        assert!(calculate(&input).is_err());
    }
}
