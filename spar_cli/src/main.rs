//! # Spar CLI Application
//!
//! Console front end for the sizing engine: pick an analysis, adjust the
//! key parameters (reference vehicle values are the defaults), and get a
//! boxed summary, the JSON result, and diagnostic plots under `output/`.
//!
//! The manufacturing step at the end of the iterative analyses asks for a
//! chosen wall thickness and refuses anything below the sized minimum.

mod plot;

use std::io::{self, BufRead, Write};

use spar_core::calculations::landing::{self, LandingGearInput};
use spar_core::calculations::skin_buckling::{self, SkinBucklingInput, AUX_STRINGER_AREA};
use spar_core::calculations::stiffener_rigidity::{
    self, StiffenerRigidityInput, AUX_ACTUAL_INERTIA, AUX_REQUIRED_INERTIA,
};
use spar_core::calculations::stringer_stability::{self, StringerStabilityInput};
use spar_core::calculations::thermal::{self, InsulationSizingInput};
use spar_core::calculations::wing_attachment::{self, WingAttachmentInput};
use spar_core::calculations::wingbox::{self, WingboxInput};
use spar_core::SizeError;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

/// Keep asking until the chosen thickness covers the sized minimum.
fn prompt_chosen_thickness_mm(what: &str, minimum_mm: f64) -> f64 {
    loop {
        let chosen = prompt_f64(
            &format!(
                "Choose thickness [mm] for {} (min {:.3}): ",
                what, minimum_mm
            ),
            minimum_mm,
        );
        if chosen >= minimum_mm {
            return chosen;
        }
        println!(
            "  {:.3} mm is below the sized minimum of {:.3} mm, try again",
            chosen, minimum_mm
        );
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!();
    println!("JSON result:");
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

fn print_error(e: &SizeError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(&e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn header(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
    println!();
}

fn run_skin_buckling() {
    let mut input = SkinBucklingInput::reference("Service module");
    input.length_m = prompt_f64("Module length (m) [0.79]: ", input.length_m);
    input.diameter_m = prompt_f64("Diameter (m) [0.29]: ", input.diameter_m);
    input.mass_kg = prompt_f64("Supported mass (kg) [35.0]: ", input.mass_kg);
    println!();

    match skin_buckling::calculate(&input) {
        Ok(result) => {
            header("SKIN BUCKLING RESULTS");
            println!(
                "  Skin thickness:  {:.4} mm ({} iterations)",
                result.skin_thickness_m * 1000.0,
                result.iterations
            );
            println!(
                "  Crippling:       {:.2} MPa at MS = {:+.4}",
                result.crippling_stress_pa / 1.0e6,
                result.margin
            );
            println!(
                "  Ultimate load:   {:.0} N",
                result.ultimate_load_n
            );
            println!(
                "  Rigidity floors: axial {:.4} mm / lateral {:.4} mm {}",
                result.rigidity_thickness_axial_m * 1000.0,
                result.rigidity_thickness_lateral_m * 1000.0,
                status_icon(result.meets_rigidity)
            );
            println!(
                "  Yield floor:     {:.4} mm",
                result.yield_thickness_m * 1000.0
            );
            if let Some(k) = result.boom_zero_iteration {
                println!("  Boom area reaches zero at iteration {}", k);
            }
            println!("  Skin mass:       {:.3} kg", result.skin_mass_kg);

            save_plot(plot::plot_margin_curve(
                "output/skin_buckling_margin.png",
                "Margin of Safety vs Skin Thickness",
                &result.trace.margin_curve(),
            ));
            save_plot(plot::plot_auxiliary_curve(
                "output/skin_buckling_boom_area.png",
                "Boom Area vs Skin Thickness",
                "Boom area (m²)",
                &result.trace.auxiliary_curve(AUX_STRINGER_AREA),
            ));
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_stringer_stability() {
    let input = StringerStabilityInput::reference("Stage stringers");

    match stringer_stability::calculate(&input) {
        Ok(result) => {
            header("STAGE STRINGER RESULTS");
            for stage in &result.stages {
                println!(
                    "  {:<16} wall {:.2} mm{}  area {:.1} mm²  mass {:.3} kg",
                    stage.label,
                    stage.wall_thickness_m * 1000.0,
                    if stage.min_gauge_applied { " (gauge)" } else { "" },
                    stage.area_m2 * 1.0e6,
                    stage.stringers_mass_kg
                );
            }
            println!();
            println!(
                "  Stringers: {:.3} kg / Skin: {:.3} kg / Total: {:.3} kg",
                result.total_stringers_mass_kg,
                result.skin_mass_kg,
                result.total_structure_mass_kg
            );
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_stiffener_rigidity() {
    let modules = StiffenerRigidityInput::reference_modules();
    let mut combined_mass = 0.0;

    for input in &modules {
        match stiffener_rigidity::calculate(input) {
            Ok(result) => {
                header(&format!("{} STIFFENERS", input.label.to_uppercase()));
                println!(
                    "  Wall:        {:.2} mm ({} iterations)",
                    result.wall_thickness_m * 1000.0,
                    result.iterations
                );
                println!(
                    "  Inertia:     {:.3e} m⁴ required / {:.3e} m⁴ actual",
                    result.required_inertia_m4, result.actual_inertia_m4
                );
                println!("  Load:        {:.1} N per stiffener", result.equivalent_load_n);
                println!("  Mass:        {:.3} kg sized", result.stiffeners_mass_kg);

                let plot_name = format!(
                    "output/stiffener_inertia_{}.png",
                    input.label.to_lowercase().replace(' ', "_")
                );
                save_plot(plot::plot_paired_curves(
                    &plot_name,
                    &format!("{}: Moment of Inertia Convergence", input.label),
                    "Moment of inertia (m⁴)",
                    (
                        "Required",
                        &result.trace.auxiliary_curve(AUX_REQUIRED_INERTIA),
                    ),
                    ("Calculated", &result.trace.auxiliary_curve(AUX_ACTUAL_INERTIA)),
                ));

                let chosen_mm = prompt_chosen_thickness_mm(
                    &input.label,
                    result.wall_thickness_m * 1000.0,
                );
                match stiffener_rigidity::chosen_wall_mass_kg(
                    input,
                    result.wall_thickness_m,
                    chosen_mm / 1000.0,
                ) {
                    Ok(mass) => {
                        println!("  Mass at {:.2} mm: {:.3} kg", chosen_mm, mass);
                        combined_mass += mass;
                    }
                    Err(e) => print_error(&e),
                }
                print_json(&result);
            }
            Err(e) => print_error(&e),
        }
    }
    println!();
    println!("Combined stiffener mass: {:.3} kg", combined_mass);
}

fn run_wingbox() {
    let mut input = WingboxInput::reference("Wingbox");
    input.lift_n = prompt_f64("Lift per wingbox (N) [499.22]: ", input.lift_n);
    input.drag_n = prompt_f64("Drag per wingbox (N) [76.005]: ", input.drag_n);
    println!();

    match wingbox::calculate(&input) {
        Ok(result) => {
            header("WINGBOX WALL RESULTS");
            println!(
                "  Bending yield:      {:.2} mm at {:.0} MPa",
                result.bending.thickness_m * 1000.0,
                result.bending.stress_pa / 1.0e6
            );
            println!(
                "  Shear yield:        {:.2} mm at {:.0} MPa",
                result.shear.thickness_m * 1000.0,
                result.shear.stress_pa / 1.0e6
            );
            println!(
                "  Compression buckle: top {:.2} mm / side {:.2} mm",
                result.compression_buckling_top.thickness_m * 1000.0,
                result.compression_buckling_side.thickness_m * 1000.0
            );
            println!(
                "  Shear buckle:       top {:.2} mm / side {:.2} mm",
                result.shear_buckling_top.thickness_m * 1000.0,
                result.shear_buckling_side.thickness_m * 1000.0
            );
            println!(
                "  Combined:           top {:.2} mm (ratio {:.3}) / side {:.2} mm (ratio {:.3})",
                result.combined_top.thickness_m * 1000.0,
                result.combined_top.interaction_ratio,
                result.combined_side.thickness_m * 1000.0,
                result.combined_side.interaction_ratio
            );
            println!(
                "  Governing:          top {:.2} mm / side {:.2} mm",
                result.governing_top_m * 1000.0,
                result.governing_side_m * 1000.0
            );

            save_plot(plot::plot_margin_curve(
                "output/wingbox_bending_margin.png",
                "Bending Margin vs Wall Thickness",
                &result.bending.trace.margin_curve(),
            ));

            let top_mm =
                prompt_chosen_thickness_mm("top wall", result.governing_top_m * 1000.0);
            let aft_mm =
                prompt_chosen_thickness_mm("aft wall", result.governing_side_m * 1000.0);
            let bottom_mm =
                prompt_chosen_thickness_mm("bottom wall", result.governing_top_m * 1000.0);
            let fore_mm =
                prompt_chosen_thickness_mm("fore wall", result.governing_side_m * 1000.0);
            let mass = wingbox::selected_mass_kg(
                &input,
                [
                    top_mm / 1000.0,
                    aft_mm / 1000.0,
                    bottom_mm / 1000.0,
                    fore_mm / 1000.0,
                ],
            );
            println!(
                "  Mass per wing: {:.3} kg / both wings: {:.3} kg",
                mass,
                2.0 * mass
            );
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_thermal() {
    let mut input = InsulationSizingInput::reference("Payload bay");
    input.temp_delta_c = prompt_f64("External excursion (°C) [50.0]: ", input.temp_delta_c);
    println!();

    match thermal::calculate(&input) {
        Ok(result) => {
            header("INSULATION SIZING RESULTS");
            println!(
                "  Hot case:  {:.3} mm holds {:.1} °C",
                result.hot.thickness_m * 1000.0,
                result.hot.final_temp_c
            );
            println!(
                "  Cold case: {:.3} mm holds {:.1} °C",
                result.cold.thickness_m * 1000.0,
                result.cold.final_temp_c
            );
            println!(
                "  Governing: {:.3} mm",
                result.governing_thickness_m * 1000.0
            );

            save_plot(plot::plot_margin_curve(
                "output/insulation_margin_cold.png",
                "Cold-Case Margin vs Insulation Thickness",
                &result.cold.trace.margin_curve(),
            ));
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_landing() {
    let mut input = LandingGearInput::reference("Landing gear");
    input.mass_kg = prompt_f64("Landed mass (kg) [33.0]: ", input.mass_kg);
    println!();

    match landing::calculate(&input) {
        Ok(result) => {
            header("LANDING GEAR RESULTS");
            println!("  Landing moment: {:.2} N·m", result.max_moment_nm);
            println!(
                "  Ski thickness:  {:.2} mm, skis {:.3} kg",
                result.ski_thickness_m * 1000.0,
                result.skis_mass_kg
            );
            println!(
                "  Leg stress:     {:.1} MPa (margin {:.2}) {}",
                result.leg_stress_pa / 1.0e6,
                result.leg_yield_margin,
                status_icon(result.leg_yield_margin >= 1.0)
            );
            println!("  System mass:    {:.3} kg", result.total_mass_kg);
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn run_wing_attachment() {
    let input = WingAttachmentInput::reference("Wing attachment");

    match wing_attachment::calculate(&input) {
        Ok(result) => {
            header("WING ATTACHMENT RESULTS");
            println!(
                "  Skin:     {:.2} MPa von Mises, margin {:.2} {}",
                result.skin.von_mises_mpa,
                result.skin.yield_margin,
                status_icon(result.skin.yield_margin >= 1.0)
            );
            println!(
                "  Stringer: {:.2} MPa von Mises, margin {:.2} {}",
                result.stringer.von_mises_mpa,
                result.stringer.yield_margin,
                status_icon(result.stringer.yield_margin >= 1.0)
            );
            println!(
                "  Pin:      {:.2} MPa, margin {:.2} {}",
                result.pin.pin_stress_mpa,
                result.pin.pin_yield_margin,
                status_icon(result.pin.pin_yield_margin >= 1.0)
            );
            println!(
                "  Screw:    {:.2} MPa, margin {:.2} {}",
                result.pin.screw_stress_mpa,
                result.pin.screw_yield_margin,
                status_icon(result.pin.screw_yield_margin >= 1.0)
            );
            print_json(&result);
        }
        Err(e) => print_error(&e),
    }
}

fn status_icon(ok: bool) -> &'static str {
    if ok {
        "✓"
    } else {
        "✗"
    }
}

fn save_plot(result: Result<(), Box<dyn std::error::Error>>) {
    match result {
        Ok(()) => {}
        Err(e) => eprintln!("Plot skipped: {}", e),
    }
}

fn main() {
    println!("Spar CLI - Launch Vehicle Structural Sizing");
    println!("===========================================");
    println!();
    println!("  1. Stiffened-cylinder skin buckling");
    println!("  2. Stage stringer stability");
    println!("  3. Stiffener wall rigidity (3 modules)");
    println!("  4. Wingbox wall sizing");
    println!("  5. Payload insulation");
    println!("  6. Landing gear");
    println!("  7. Wing attachment checks");
    println!();

    let selection = prompt_f64("Select analysis [1]: ", 1.0) as u32;
    println!();

    match selection {
        1 => run_skin_buckling(),
        2 => run_stringer_stability(),
        3 => run_stiffener_rigidity(),
        4 => run_wingbox(),
        5 => run_thermal(),
        6 => run_landing(),
        7 => run_wing_attachment(),
        other => eprintln!("Unknown analysis: {}", other),
    }
}
