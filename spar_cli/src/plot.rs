//! Diagnostic plots for sizing traces.
//!
//! Renders the solver's trial trace as PNG charts under `output/`:
//! margin of safety against thickness with the zero line marked, and
//! paired auxiliary curves (required vs actual inertia and the like).

use plotters::prelude::*;

/// Plot a margin-vs-thickness curve with the MS = 0 target line.
///
/// Thickness is shown in millimetres.
pub fn plot_margin_curve(
    path: &str,
    title: &str,
    curve: &[(f64, f64)],
) -> Result<(), Box<dyn std::error::Error>> {
    if curve.is_empty() {
        return Err("No data points to plot".into());
    }
    std::fs::create_dir_all("output")?;

    let points: Vec<(f64, f64)> = curve.iter().map(|(t, m)| (t * 1000.0, *m)).collect();
    let (x_min, x_max, y_min, y_max) = padded_bounds(&points);

    let backend = BitMapBackend::new(path, (800, 600));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Thickness (mm)")
        .y_desc("Margin of safety")
        .draw()?;

    chart
        .draw_series(LineSeries::new(points.clone(), &BLUE))?
        .label("Margin of safety")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            vec![(x_min, 0.0), (x_max, 0.0)],
            RED.stroke_width(1),
        ))?
        .label("Target MS = 0")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Plot a single auxiliary quantity against thickness, e.g. the boom area
/// shrinking as the skin takes over.
pub fn plot_auxiliary_curve(
    path: &str,
    title: &str,
    y_label: &str,
    curve: &[(f64, f64)],
) -> Result<(), Box<dyn std::error::Error>> {
    if curve.is_empty() {
        return Err("No data points to plot".into());
    }
    std::fs::create_dir_all("output")?;

    let points: Vec<(f64, f64)> = curve.iter().map(|(t, v)| (t * 1000.0, *v)).collect();
    let (x_min, x_max, y_min, y_max) = padded_bounds(&points);

    let backend = BitMapBackend::new(path, (800, 600));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Thickness (mm)")
        .y_desc(y_label)
        .draw()?;

    chart.draw_series(LineSeries::new(points, &GREEN))?;

    root.present()?;
    Ok(())
}

/// Plot two auxiliary curves over the same thickness axis, e.g. the
/// required and actual stiffener inertia closing on each other.
pub fn plot_paired_curves(
    path: &str,
    title: &str,
    y_label: &str,
    first: (&str, &[(f64, f64)]),
    second: (&str, &[(f64, f64)]),
) -> Result<(), Box<dyn std::error::Error>> {
    if first.1.is_empty() || second.1.is_empty() {
        return Err("No data points to plot".into());
    }
    std::fs::create_dir_all("output")?;

    let to_mm = |curve: &[(f64, f64)]| -> Vec<(f64, f64)> {
        curve.iter().map(|(t, v)| (t * 1000.0, *v)).collect()
    };
    let a = to_mm(first.1);
    let b = to_mm(second.1);

    let mut all = a.clone();
    all.extend_from_slice(&b);
    let (x_min, x_max, y_min, y_max) = padded_bounds(&all);

    let backend = BitMapBackend::new(path, (800, 600));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 22).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Thickness (mm)")
        .y_desc(y_label)
        .draw()?;

    chart
        .draw_series(LineSeries::new(a, RED.stroke_width(1)))?
        .label(first.0)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(LineSeries::new(b, &BLUE))?
        .label(second.0)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Axis bounds with 10% padding, degenerate ranges widened.
fn padded_bounds(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (x, y) in points {
        x_min = x_min.min(*x);
        x_max = x_max.max(*x);
        y_min = y_min.min(*y);
        y_max = y_max.max(*y);
    }
    let x_pad = ((x_max - x_min).max(1e-9)) * 0.1;
    let y_pad = ((y_max - y_min).max(1e-9)) * 0.1;
    (x_min - x_pad, x_max + x_pad, y_min - y_pad, y_max + y_pad)
}
