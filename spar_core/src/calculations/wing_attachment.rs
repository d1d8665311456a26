//! # Wing Attachment Checks
//!
//! Stress checks on the fuselage section that takes the wing loads, the
//! square wing-attachment stringers, and the wing pin with its retaining
//! screw. These are verification checks of an already-chosen geometry, not
//! grid searches: each reports a stress and the yield margin over it.
//!
//! The fuselage section is an idealized-boom model: the skin is lumped into
//! four boom pairs at the stringer stations, bending stresses follow from
//! the boom inertias, and the skin shear flow is marched boom to boom with
//! a closed-section moment correction. The centroid and flow-correction
//! expressions carry over from the hand analysis; their sign conventions
//! have not been independently verified.
//!
//! Unlike the rest of the crate this module works in mm/N/MPa, which keeps
//! the detail-stress numbers in the range engineers quote them in.

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};

/// Input parameters for the wing attachment checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WingAttachmentInput {
    /// User label
    pub label: String,

    /// Airframe yield strength (MPa)
    pub yield_mpa: f64,

    /// Retaining screw yield strength (MPa)
    pub bolt_yield_mpa: f64,

    /// Maximum lift, both wings (N)
    pub lift_n: f64,

    /// Maximum drag, both wings (N)
    pub drag_n: f64,

    /// Model factor on the wing loads
    pub model_factor: f64,

    /// Forward return module length (mm); the wing moment arm is a quarter
    /// of it
    pub module_length_mm: f64,

    /// Fuselage radius (mm)
    pub radius_mm: f64,

    /// Skin thickness (mm)
    pub skin_thickness_mm: f64,

    /// Discrete stringer area added to each boom (mm²)
    pub stringer_area_mm2: f64,

    /// Shift the neutral line half a radius down to the wing plane
    pub offset_neutral_line: bool,

    /// Idealized skin panel length between booms (mm)
    pub panel_length_mm: f64,

    /// Skin thickness used in the boom idealization (mm)
    pub idealization_thickness_mm: f64,

    /// Moment arm of the drag resultant (m)
    pub drag_arm_m: f64,

    /// Wing-attachment stringer outer side (mm)
    pub stringer_side_mm: f64,

    /// Wing-attachment stringer wall (mm)
    pub stringer_wall_mm: f64,

    /// Torque reacted per wing (N·m)
    pub wing_torque_nm: f64,

    /// Lift at the pin (N)
    pub pin_lift_n: f64,

    /// Drag at the pin (N)
    pub pin_drag_n: f64,

    /// Wing pin radius (mm)
    pub pin_radius_mm: f64,

    /// Retaining screw size (mm)
    pub screw_size_mm: f64,
}

impl WingAttachmentInput {
    /// Reference vehicle wing attachment.
    pub fn reference(label: impl Into<String>) -> Self {
        WingAttachmentInput {
            label: label.into(),
            yield_mpa: 240.0,
            bolt_yield_mpa: 640.0,
            lift_n: 999.0,
            drag_n: 153.0,
            model_factor: 1.5,
            module_length_mm: 100.0,
            radius_mm: 145.0,
            skin_thickness_mm: 0.5,
            stringer_area_mm2: 0.0,
            offset_neutral_line: true,
            panel_length_mm: 115.0,
            idealization_thickness_mm: 1.0,
            drag_arm_m: 0.3,
            stringer_side_mm: 10.0,
            stringer_wall_mm: 1.0,
            wing_torque_nm: 0.204,
            pin_lift_n: 998.44,
            pin_drag_n: 152.01,
            pin_radius_mm: 5.0,
            screw_size_mm: 3.0,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> SizeResult<()> {
        for (name, value) in [
            ("yield_mpa", self.yield_mpa),
            ("bolt_yield_mpa", self.bolt_yield_mpa),
            ("lift_n", self.lift_n),
            ("model_factor", self.model_factor),
            ("module_length_mm", self.module_length_mm),
            ("radius_mm", self.radius_mm),
            ("skin_thickness_mm", self.skin_thickness_mm),
            ("panel_length_mm", self.panel_length_mm),
            ("stringer_side_mm", self.stringer_side_mm),
            ("stringer_wall_mm", self.stringer_wall_mm),
            ("pin_radius_mm", self.pin_radius_mm),
            ("screw_size_mm", self.screw_size_mm),
        ] {
            if value <= 0.0 {
                return Err(SizeError::invalid_input(
                    name,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        if self.screw_size_mm >= 2.0 * self.pin_radius_mm {
            return Err(SizeError::geometric_infeasibility(
                "screw_size_mm",
                self.screw_size_mm,
                "screw bore leaves no pin wall",
            ));
        }
        if 2.0 * self.stringer_wall_mm > self.stringer_side_mm {
            return Err(SizeError::geometric_infeasibility(
                "stringer_wall_mm",
                self.stringer_wall_mm,
                "wall exceeds the stringer section",
            ));
        }
        Ok(())
    }
}

/// Idealized fuselage section check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinPanelCheck {
    /// Boom areas, station 1 (top) to 4 (bottom) (mm²)
    pub boom_areas_mm2: [f64; 4],

    /// Section centroid above the bottom (mm)
    pub centroid_mm: f64,

    /// Boom inertia about the horizontal axis (mm⁴)
    pub ixx_mm4: f64,

    /// Boom inertia about the vertical axis (mm⁴)
    pub iyy_mm4: f64,

    /// Peak boom bending stress magnitude (MPa)
    pub max_bending_stress_mpa: f64,

    /// Peak corrected shear flow magnitude (N/mm)
    pub max_shear_flow_n_mm: f64,

    /// Skin shear stress (MPa)
    pub shear_stress_mpa: f64,

    /// Von Mises skin stress (MPa)
    pub von_mises_mpa: f64,

    /// Yield over von Mises; above 1 is adequate
    pub yield_margin: f64,
}

/// Wing-attachment stringer check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StringerCheck {
    /// Axial stress from drag (MPa)
    pub normal_stress_mpa: f64,

    /// Resultant bending stress (MPa)
    pub bending_stress_mpa: f64,

    /// Torsion shear stress (MPa)
    pub torsion_shear_mpa: f64,

    /// Von Mises stress (MPa)
    pub von_mises_mpa: f64,

    /// Yield over von Mises
    pub yield_margin: f64,
}

/// Wing pin and retaining screw check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinCheck {
    /// Combined pin shear/bending stress (MPa)
    pub pin_stress_mpa: f64,

    /// Pin yield margin
    pub pin_yield_margin: f64,

    /// Screw shear stress over the thread root area (MPa)
    pub screw_stress_mpa: f64,

    /// Screw yield margin
    pub screw_yield_margin: f64,
}

/// Results from the wing attachment checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WingAttachmentResult {
    /// Idealized fuselage section
    pub skin: SkinPanelCheck,

    /// Wing-attachment stringer
    pub stringer: StringerCheck,

    /// Wing pin and screw
    pub pin: PinCheck,
}

/// Run all wing attachment checks.
///
/// # Example
///
/// ```rust
/// use spar_core::calculations::wing_attachment::{calculate, WingAttachmentInput};
///
/// let result = calculate(&WingAttachmentInput::reference("Demo")).unwrap();
/// assert!(result.skin.yield_margin > 1.0);
/// ```
pub fn calculate(input: &WingAttachmentInput) -> SizeResult<WingAttachmentResult> {
    input.validate()?;

    Ok(WingAttachmentResult {
        skin: skin_panel_check(input),
        stringer: stringer_check(input),
        pin: pin_check(input),
    })
}

fn skin_panel_check(input: &WingAttachmentInput) -> SkinPanelCheck {
    let r = input.radius_mm;
    let cell_area_mm2 = std::f64::consts::PI * r * r;

    // Boom stations at +-67.5 and +-22.5 degrees; the neutral line sits at
    // the wing plane half a radius below centre when offset
    let neutral_offset = if input.offset_neutral_line {
        30.0_f64.to_radians().sin() * r
    } else {
        0.0
    };
    let station_deg = [67.5_f64, 22.5, -22.5, -67.5];
    let d: Vec<f64> = station_deg
        .iter()
        .map(|deg| deg.to_radians().sin() * r + neutral_offset)
        .collect();
    let d_bottom: Vec<f64> = station_deg
        .iter()
        .map(|deg| deg.to_radians().sin() * r + r)
        .collect();

    let lift_moment_nm = input.lift_n * input.model_factor * input.module_length_mm / 1000.0 / 4.0;
    let drag_moment_nm = input.drag_n * input.model_factor * input.drag_arm_m;

    // Skin idealization: each boom collects a sixth of the two adjacent
    // panels, weighted by the stress ratio across the panel
    let panel = input.idealization_thickness_mm * input.panel_length_mm / 6.0;
    let b = [
        input.stringer_area_mm2 + panel * (2.0 + d[0] / d[0]) + panel * (2.0 + d[1] / d[0]),
        input.stringer_area_mm2 + panel * (2.0 + d[0] / d[1]) + panel * (2.0 + d[2] / d[1]),
        input.stringer_area_mm2 + panel * (2.0 + d[1] / d[2]) + panel * (2.0 + d[3] / d[2]),
        input.stringer_area_mm2 + panel * (2.0 + d[2] / d[3]) + panel * (2.0 + d[3] / d[3]),
    ];

    let centroid_mm = (2.0 * b[0] * d_bottom[0]
        + 2.0 * b[1] * d_bottom[1]
        + 2.0 * b[2] * d_bottom[2]
        + 2.0 * d_bottom[3])
        / (2.0 * d[0] + 2.0 * d[1] + 2.0 * d[2] + 2.0 * b[3]);

    let y: Vec<f64> = d_bottom.iter().map(|db| db - centroid_mm).collect();
    let x1 = 67.5_f64.to_radians().cos() * r;
    let x2 = 22.5_f64.to_radians().cos() * r;
    let x = [x1, x2, x2, x1];

    let ixx_mm4 = 2.0 * (0..4).map(|i| b[i] * y[i] * y[i]).sum::<f64>();
    let iyy_mm4 = 2.0 * (0..4).map(|i| b[i] * x[i] * x[i]).sum::<f64>();

    let sigma: Vec<f64> = (0..4)
        .map(|i| lift_moment_nm * y[i] / ixx_mm4 + drag_moment_nm * x[i] / iyy_mm4)
        .collect();
    let max_bending_stress_mpa = sigma.iter().fold(0.0_f64, |acc, s| acc.max(s.abs()));

    // Cumulative open-section flows boom to boom, mirrored over the far side
    let factor = -input.lift_n * input.model_factor / ixx_mm4;
    let q18 = 0.0;
    let q12 = factor * b[0] * y[0];
    let q23 = factor * b[1] * y[1] + q12;
    let q34 = factor * b[2] * y[2] + q23;
    let q45 = factor * b[3] * y[3] + q34;
    let q56 = factor * b[3] * y[3] + q45;
    let q67 = factor * b[2] * y[2] + q56;
    let q78 = factor * b[1] * y[1] + q67;

    // Closed-section correction: moment of the open flows about the centre
    let qs0 = (-q12 * (-x2 + x1) * y[0] + q12 * (y[1] - y[0]) * x1
        - q23 * (-x2 + x2) * y[1]
        + q23 * (y[2] - y[1]) * x2
        - q34 * (-x1 + x2) * y[2]
        + q34 * (y[3] - y[2]) * x2
        - q45 * (x1 + x1) * y[3]
        + q45 * (y[3] - y[3]) * x1
        - q56 * (x2 - x1) * y[3]
        + q56 * (y[2] - y[3]) * x1
        - q67 * (x2 - x2) * y[2]
        + q67 * (y[1] - y[2]) * x2
        - q78 * (x1 - x2) * y[1]
        + q78 * (y[0] - y[1]) * x2
        - q18 * (x1 + x1) * y[0]
        + q18 * (y[0] - y[0]) * x1)
        / (2.0 * cell_area_mm2);

    let max_shear_flow_n_mm = [q18, q12, q23, q34, q45, q56, q67, q78]
        .iter()
        .fold(0.0_f64, |acc, q| acc.max((q + qs0).abs()));
    let shear_stress_mpa = max_shear_flow_n_mm / input.skin_thickness_mm;

    let von_mises_mpa =
        (max_bending_stress_mpa.powi(2) + 3.0 * shear_stress_mpa.powi(2)).sqrt();

    SkinPanelCheck {
        boom_areas_mm2: [b[0], b[1], b[2], b[3]],
        centroid_mm,
        ixx_mm4,
        iyy_mm4,
        max_bending_stress_mpa,
        max_shear_flow_n_mm,
        shear_stress_mpa,
        von_mises_mpa,
        yield_margin: input.yield_mpa / von_mises_mpa,
    }
}

fn stringer_check(input: &WingAttachmentInput) -> StringerCheck {
    let side = input.stringer_side_mm;
    let wall = input.stringer_wall_mm;
    let area_mm2 = side * side - (side - 2.0 * wall).powi(2);
    let inertia_mm4 = (side.powi(4) - (side - 2.0 * wall).powi(4)) / 12.0;
    let torsion_mm4 = (side.powi(4) - (side - 2.0 * wall).powi(4)) / 6.0;

    let lift_per_wing = input.lift_n / 2.0 * input.model_factor;
    let drag_per_wing = input.drag_n / 2.0 * input.model_factor;

    let normal_stress_mpa = drag_per_wing / area_mm2;
    let bending_lift_mpa =
        lift_per_wing * input.module_length_mm / 4.0 * side / 2.0 / inertia_mm4;
    let bending_drag_mpa =
        input.drag_n * input.drag_arm_m * input.model_factor * side / 2.0 / inertia_mm4;
    let bending_wing_moment_mpa = (input.lift_n * 0.25 - input.wing_torque_nm)
        * input.model_factor
        * side
        / 2.0
        / inertia_mm4;
    let bending_stress_mpa =
        ((bending_lift_mpa + bending_wing_moment_mpa).powi(2) + bending_drag_mpa.powi(2)).sqrt();

    let torsion_shear_mpa = lift_per_wing * 0.25 * side / 2.0 / torsion_mm4;

    let von_mises_mpa = (normal_stress_mpa.powi(2) - normal_stress_mpa * bending_stress_mpa
        + bending_stress_mpa.powi(2)
        + 3.0 * torsion_shear_mpa.powi(2))
    .sqrt();

    StringerCheck {
        normal_stress_mpa,
        bending_stress_mpa,
        torsion_shear_mpa,
        von_mises_mpa,
        yield_margin: input.yield_mpa / von_mises_mpa,
    }
}

fn pin_check(input: &WingAttachmentInput) -> PinCheck {
    let r = input.pin_radius_mm;
    let wall = (2.0 * r - input.screw_size_mm) / 2.0;
    let moment_nmm = input.pin_lift_n * input.model_factor * input.module_length_mm / 4.0;

    let bending_mpa = moment_nmm / (std::f64::consts::PI * wall * r * r);
    let shear_mpa = input.pin_drag_n * input.model_factor
        / (std::f64::consts::PI * (r * r - (r - wall).powi(2)));
    let pin_stress_mpa = (bending_mpa.powi(2) + shear_mpa.powi(2)).sqrt();

    // Thread root taken at 80% of the nominal screw diameter
    let root_area_mm2 = (input.screw_size_mm * 0.8 / 2.0).powi(2) * std::f64::consts::PI;
    let screw_stress_mpa = input.pin_lift_n * input.model_factor / root_area_mm2;

    PinCheck {
        pin_stress_mpa,
        pin_yield_margin: input.yield_mpa / pin_stress_mpa,
        screw_stress_mpa,
        screw_yield_margin: input.bolt_yield_mpa / screw_stress_mpa,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boom_idealization() {
        let result = calculate(&WingAttachmentInput::reference("Test")).unwrap();

        assert!((result.skin.boom_areas_mm2[0] - 107.72).abs() < 0.01);
        assert!((result.skin.boom_areas_mm2[1] - 110.13).abs() < 0.01);
        assert!((result.skin.boom_areas_mm2[2] - 151.62).abs() < 0.01);
        assert!((result.skin.boom_areas_mm2[3] - 90.53).abs() < 0.01);
        assert!((result.skin.centroid_mm - 148.67).abs() < 0.01);
        assert!((result.skin.ixx_mm4 - 8.7397e6).abs() < 1.0e3);
        assert!((result.skin.iyy_mm4 - 10.6157e6).abs() < 1.0e3);
    }

    #[test]
    fn test_skin_stress() {
        let result = calculate(&WingAttachmentInput::reference("Test")).unwrap();

        assert!((result.skin.max_shear_flow_n_mm - 5.408).abs() < 0.001);
        assert!((result.skin.shear_stress_mpa - 10.815).abs() < 0.001);
        assert!((result.skin.von_mises_mpa - 18.73).abs() < 0.01);
        assert!((result.skin.yield_margin - 12.81).abs() < 0.01);
    }

    #[test]
    fn test_stringer_check() {
        let result = calculate(&WingAttachmentInput::reference("Test")).unwrap();

        assert!((result.stringer.normal_stress_mpa - 3.19).abs() < 0.01);
        assert!((result.stringer.bending_stress_mpa - 194.16).abs() < 0.01);
        assert!((result.stringer.von_mises_mpa - 192.60).abs() < 0.01);
        assert!((result.stringer.yield_margin - 1.246).abs() < 0.001);
    }

    #[test]
    fn test_pin_and_screw() {
        let result = calculate(&WingAttachmentInput::reference("Test")).unwrap();

        assert!((result.pin.pin_stress_mpa - 136.24).abs() < 0.01);
        assert!((result.pin.pin_yield_margin - 1.762).abs() < 0.001);
        assert!((result.pin.screw_stress_mpa - 331.06).abs() < 0.01);
        assert!((result.pin.screw_yield_margin - 1.933).abs() < 0.001);
    }

    #[test]
    fn test_oversized_screw_rejected() {
        let mut input = WingAttachmentInput::reference("Test");
        input.screw_size_mm = 12.0;
        assert_eq!(
            calculate(&input).unwrap_err().error_code(),
            "GEOMETRIC_INFEASIBILITY"
        );
    }

    #[test]
    fn test_neutral_line_offset_changes_booms() {
        let with_offset = calculate(&WingAttachmentInput::reference("Test")).unwrap();

        let mut input = WingAttachmentInput::reference("Test");
        input.offset_neutral_line = false;
        let without = calculate(&input).unwrap();

        assert!(
            (with_offset.skin.boom_areas_mm2[2] - without.skin.boom_areas_mm2[2]).abs() > 1.0
        );
    }
}
