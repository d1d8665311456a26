//! # Payload Insulation Sizing
//!
//! Sizes the insulation layer between the payload bay and the aluminium
//! skin so the payload stays inside its functional temperature band for the
//! duration of the flight. Lumped-capacitance model: radial conduction
//! resistances of skin and insulation set a thermal time constant, and the
//! transient temperature after the flight is compared against the hot and
//! cold functional limits.
//!
//! Both external environments are sized independently on the same grid and
//! the thicker answer governs. An insulation thickness that consumes the
//! whole bay radius is a geometric failure, not a `-inf` temperature.

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};
use crate::materials;
use crate::solver::{find_min_thickness, MarginSample, SizingResult, SolverConfig};

/// Auxiliary trace key: payload temperature at end of flight (°C)
pub const AUX_FINAL_TEMP: &str = "final_temp_c";

/// Input parameters for insulation sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulationSizingInput {
    /// User label for this payload bay
    pub label: String,

    /// Catalog name of the skin alloy (must carry a thermal conductivity)
    pub skin_material: String,

    /// Catalog name of the insulation product
    pub insulation: String,

    /// Payload bay length (m)
    pub payload_length_m: f64,

    /// Cylinder outer diameter (m)
    pub diameter_m: f64,

    /// Skin thickness (m)
    pub skin_thickness_m: f64,

    /// Payload thermal mass (kg)
    pub payload_mass_kg: f64,

    /// Payload specific heat capacity (J/kg·K)
    pub specific_heat_j_kgk: f64,

    /// Payload temperature at liftoff (°C)
    pub initial_temp_c: f64,

    /// External temperature excursion either side of the initial (°C)
    pub temp_delta_c: f64,

    /// Maximum functional payload temperature (°C)
    pub max_temp_c: f64,

    /// Minimum functional payload temperature (°C)
    pub min_temp_c: f64,

    /// Flight duration the band must hold for (s)
    pub flight_duration_s: f64,

    /// Insulation thickness search grid
    pub grid: SolverConfig,
}

impl InsulationSizingInput {
    /// Reference payload bay, fiberglass insulation.
    pub fn reference(label: impl Into<String>) -> Self {
        InsulationSizingInput {
            label: label.into(),
            skin_material: "Aluminium 6061-T6".to_string(),
            insulation: "Fiberglass".to_string(),
            payload_length_m: 0.102,
            diameter_m: 0.29,
            skin_thickness_m: 0.001,
            payload_mass_kg: 6.4,
            specific_heat_j_kgk: 1005.0,
            initial_temp_c: 15.0,
            temp_delta_c: 50.0,
            max_temp_c: 50.0,
            min_temp_c: -10.0,
            flight_duration_s: 5.0 * 60.0,
            grid: SolverConfig {
                start_thickness_m: 0.1e-3,
                step_m: 0.01e-3,
                max_iterations: 1000,
            },
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> SizeResult<()> {
        for (name, value) in [
            ("payload_length_m", self.payload_length_m),
            ("diameter_m", self.diameter_m),
            ("skin_thickness_m", self.skin_thickness_m),
            ("payload_mass_kg", self.payload_mass_kg),
            ("specific_heat_j_kgk", self.specific_heat_j_kgk),
            ("flight_duration_s", self.flight_duration_s),
            ("temp_delta_c", self.temp_delta_c),
        ] {
            if value <= 0.0 {
                return Err(SizeError::invalid_input(
                    name,
                    value.to_string(),
                    "Must be positive",
                ));
            }
        }
        if self.skin_thickness_m >= self.diameter_m / 2.0 {
            return Err(SizeError::invalid_input(
                "skin_thickness_m",
                self.skin_thickness_m.to_string(),
                "Skin thickness must be below the radius",
            ));
        }
        if self.min_temp_c >= self.max_temp_c {
            return Err(SizeError::invalid_input(
                "min_temp_c",
                self.min_temp_c.to_string(),
                "Functional band is empty",
            ));
        }
        self.grid.validate()
    }
}

/// Which external environment a case sizes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThermalCase {
    /// External temperature above the payload band
    Heating,
    /// External temperature below the payload band
    Cooling,
}

/// Sizing outcome of one thermal case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermalCaseResult {
    /// Case sized
    pub case: ThermalCase,

    /// Minimum insulation thickness for this case (m)
    pub thickness_m: f64,

    /// Payload temperature at end of flight at that thickness (°C)
    pub final_temp_c: f64,

    /// Iterations before the converged grid point
    pub iterations: usize,

    /// Full grid-search trace (final temperature per trial)
    pub trace: SizingResult,
}

/// Results from insulation sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulationSizingResult {
    /// Hot-environment case
    pub hot: ThermalCaseResult,

    /// Cold-environment case
    pub cold: ThermalCaseResult,

    /// Governing (thicker) insulation of the two cases (m)
    pub governing_thickness_m: f64,
}

/// Size the payload insulation for both environments.
///
/// # Example
///
/// ```rust
/// use spar_core::calculations::thermal::{calculate, InsulationSizingInput};
///
/// let result = calculate(&InsulationSizingInput::reference("Demo")).unwrap();
/// assert!(result.governing_thickness_m >= result.hot.thickness_m);
/// ```
pub fn calculate(input: &InsulationSizingInput) -> SizeResult<InsulationSizingResult> {
    input.validate()?;

    let skin = materials::lookup(&input.skin_material)?;
    let k_skin = skin.thermal_conductivity_w_mk.ok_or_else(|| {
        SizeError::calculation_failed(
            "insulation_sizing",
            format!(
                "skin material '{}' has no catalogued thermal conductivity",
                input.skin_material
            ),
        )
    })?;
    let k_insulation = materials::lookup_insulation(&input.insulation)?
        .thermal_conductivity_w_mk;

    let hot = size_case(input, k_skin, k_insulation, ThermalCase::Heating)?;
    let cold = size_case(input, k_skin, k_insulation, ThermalCase::Cooling)?;
    let governing_thickness_m = hot.thickness_m.max(cold.thickness_m);

    Ok(InsulationSizingResult {
        hot,
        cold,
        governing_thickness_m,
    })
}

fn size_case(
    input: &InsulationSizingInput,
    k_skin: f64,
    k_insulation: f64,
    case: ThermalCase,
) -> SizeResult<ThermalCaseResult> {
    let outside_c = match case {
        ThermalCase::Heating => input.initial_temp_c + input.temp_delta_c,
        ThermalCase::Cooling => input.initial_temp_c - input.temp_delta_c,
    };

    let trace = find_min_thickness(&input.grid, |t_ins| {
        let final_temp_c = final_temperature_c(input, k_skin, k_insulation, t_ins, outside_c)?;
        let margin = match case {
            ThermalCase::Heating => input.max_temp_c - final_temp_c,
            ThermalCase::Cooling => final_temp_c - input.min_temp_c,
        };
        Ok(MarginSample::new(margin).with_aux(AUX_FINAL_TEMP, final_temp_c))
    })?;

    let final_temp_c = match case {
        ThermalCase::Heating => input.max_temp_c - trace.margin,
        ThermalCase::Cooling => input.min_temp_c + trace.margin,
    };

    Ok(ThermalCaseResult {
        case,
        thickness_m: trace.thickness_m,
        final_temp_c,
        iterations: trace.iterations,
        trace,
    })
}

/// Transient payload temperature after the flight for one insulation
/// thickness, radial-conduction lumped-capacitance model.
fn final_temperature_c(
    input: &InsulationSizingInput,
    k_skin: f64,
    k_insulation: f64,
    t_insulation_m: f64,
    outside_c: f64,
) -> SizeResult<f64> {
    let r_skin_m = input.diameter_m / 2.0;
    let r_insulation_m = r_skin_m - input.skin_thickness_m;
    let r_bay_m = r_insulation_m - t_insulation_m;

    if r_bay_m <= 0.0 {
        return Err(SizeError::geometric_infeasibility(
            "bay_radius_m",
            r_bay_m,
            "insulation consumed the payload bay radius",
        ));
    }

    let two_pi_l = 2.0 * std::f64::consts::PI * input.payload_length_m;
    let resistance_skin = (r_skin_m / r_insulation_m).ln() / (two_pi_l * k_skin);
    let resistance_insulation = (r_insulation_m / r_bay_m).ln() / (two_pi_l * k_insulation);

    let tau_s = input.payload_mass_kg
        * input.specific_heat_j_kgk
        * (resistance_skin + resistance_insulation);

    let decay = (-input.flight_duration_s / tau_s).exp();
    Ok(outside_c - (outside_c - input.initial_temp_c) * decay)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiberglass_cases() {
        let result = calculate(&InsulationSizingInput::reference("Test")).unwrap();

        // Hot case: 0.13 mm holds the payload at 49.8 degC
        assert!((result.hot.thickness_m - 0.13e-3).abs() < 1.0e-8);
        assert_eq!(result.hot.iterations, 3);
        assert!((result.hot.final_temp_c - 49.78).abs() < 0.02);

        // Cold case needs more: 0.23 mm for -9.48 degC
        assert!((result.cold.thickness_m - 0.23e-3).abs() < 1.0e-8);
        assert_eq!(result.cold.iterations, 13);
        assert!((result.cold.final_temp_c - (-9.48)).abs() < 0.02);

        // Cold governs
        assert_eq!(result.governing_thickness_m, result.cold.thickness_m);
    }

    #[test]
    fn test_silica_needs_less() {
        let mut input = InsulationSizingInput::reference("Test");
        input.insulation = "Silica Aerogel".to_string();
        let result = calculate(&input).unwrap();

        assert_eq!(result.hot.iterations, 0);
        assert!((result.cold.thickness_m - 0.15e-3).abs() < 1.0e-8);

        let fiberglass = calculate(&InsulationSizingInput::reference("Test")).unwrap();
        assert!(result.governing_thickness_m < fiberglass.governing_thickness_m);
    }

    #[test]
    fn test_overgrown_insulation_is_geometric_error() {
        let mut input = InsulationSizingInput::reference("Test");
        // Start past the bay radius entirely
        input.grid.start_thickness_m = 0.2;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "GEOMETRIC_INFEASIBILITY");
    }

    #[test]
    fn test_hotter_environment_needs_more_insulation() {
        let mild = calculate(&InsulationSizingInput::reference("Test")).unwrap();

        let mut input = InsulationSizingInput::reference("Test");
        input.temp_delta_c = 65.0;
        let severe = calculate(&input).unwrap();

        assert!(severe.governing_thickness_m > mild.governing_thickness_m);
    }

    #[test]
    fn test_skin_without_conductivity_rejected() {
        let mut input = InsulationSizingInput::reference("Test");
        input.skin_material = "Aluminium 7075".to_string();
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_empty_band_rejected() {
        let mut input = InsulationSizingInput::reference("Test");
        input.min_temp_c = 60.0;
        assert_eq!(calculate(&input).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
