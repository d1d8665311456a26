//! # Margin-Driven Thickness Solver
//!
//! The one piece of search logic every sizing model in this crate shares:
//! walk a uniform thickness grid upward from a lower bound and stop at the
//! first grid point whose margin of safety is non-negative.
//!
//! The margin function is supplied by the caller. The solver knows nothing
//! about buckling, shear flow or heat conduction - it only assumes the margin
//! is non-decreasing in thickness (assumed, not verified), so the first
//! non-negative grid point is the minimal admissible one.
//!
//! The search is always bounded: exhausting `max_iterations` is a typed
//! [`SizeError::NonConvergence`] carrying the full partial trace, never an
//! infinite loop on an ill-posed margin.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::solver::{find_min_thickness, MarginSample, SolverConfig};
//!
//! // Capacity 5e10 * t^2 against a 236 kN applied load
//! let config = SolverConfig::new(0.0001, 0.00001, 10_000).unwrap();
//! let result = find_min_thickness(&config, |t| {
//!     Ok(MarginSample::new(5.0e10 * t * t / 236_000.0 - 1.0))
//! })
//! .unwrap();
//!
//! assert!((result.thickness_m - 0.00218).abs() < 0.00002);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};

/// Search grid for a sizing run.
///
/// Constructed through [`SolverConfig::new`], which rejects non-positive
/// bounds up front so the search itself never has to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Lower bound of the grid (m)
    pub start_thickness_m: f64,

    /// Fixed grid increment (m). Chosen by the caller to match the precision
    /// the model needs (fractions of a millimetre for skins and walls).
    pub step_m: f64,

    /// Hard bound on the number of grid points evaluated
    pub max_iterations: usize,
}

impl SolverConfig {
    /// Create a validated config.
    pub fn new(start_thickness_m: f64, step_m: f64, max_iterations: usize) -> SizeResult<Self> {
        let config = SolverConfig {
            start_thickness_m,
            step_m,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate grid parameters.
    pub fn validate(&self) -> SizeResult<()> {
        if !self.start_thickness_m.is_finite() || self.start_thickness_m <= 0.0 {
            return Err(SizeError::invalid_input(
                "start_thickness_m",
                self.start_thickness_m.to_string(),
                "Starting thickness must be positive",
            ));
        }
        if !self.step_m.is_finite() || self.step_m <= 0.0 {
            return Err(SizeError::invalid_input(
                "step_m",
                self.step_m.to_string(),
                "Grid step must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(SizeError::invalid_input(
                "max_iterations",
                self.max_iterations.to_string(),
                "Iteration bound must be at least 1",
            ));
        }
        Ok(())
    }

    /// Grid point `start + k * step`.
    ///
    /// Computed by multiplication rather than repeated addition so long runs
    /// do not accumulate float drift.
    pub fn grid_point(&self, k: usize) -> f64 {
        self.start_thickness_m + k as f64 * self.step_m
    }
}

/// One margin evaluation: the margin itself plus any derived quantities the
/// model wants preserved in the trace (stringer area, required inertia, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginSample {
    /// Margin of safety; non-negative means the trial thickness is adequate
    pub margin: f64,

    /// Named secondary quantities derived at this trial
    pub auxiliary: BTreeMap<String, f64>,
}

impl MarginSample {
    /// Sample with no auxiliary quantities.
    pub fn new(margin: f64) -> Self {
        MarginSample {
            margin,
            auxiliary: BTreeMap::new(),
        }
    }

    /// Attach a named auxiliary quantity.
    pub fn with_aux(mut self, name: impl Into<String>, value: f64) -> Self {
        self.auxiliary.insert(name.into(), value);
        self
    }
}

/// One evaluated grid point. Immutable once pushed onto the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialPoint {
    /// Trial thickness (m)
    pub thickness_m: f64,

    /// Margin at this thickness
    pub margin: f64,

    /// Secondary quantities reported by the evaluator
    pub auxiliary: BTreeMap<String, f64>,
}

/// Terminal output of a converged sizing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// First grid point with a non-negative margin (m)
    pub thickness_m: f64,

    /// Margin at convergence
    pub margin: f64,

    /// Number of grid points strictly before the converged one
    pub iterations: usize,

    /// Ordered trace of every trial evaluated, converged point included
    pub trace: Vec<TrialPoint>,
}

impl SizingResult {
    /// Series of (thickness, margin) pairs for plotting.
    pub fn margin_curve(&self) -> Vec<(f64, f64)> {
        self.trace.iter().map(|p| (p.thickness_m, p.margin)).collect()
    }

    /// Series of (thickness, auxiliary) pairs for a named trace quantity.
    /// Trials that did not report the quantity are skipped.
    pub fn auxiliary_curve(&self, name: &str) -> Vec<(f64, f64)> {
        self.trace
            .iter()
            .filter_map(|p| p.auxiliary.get(name).map(|v| (p.thickness_m, *v)))
            .collect()
    }
}

/// Find the smallest grid thickness with a non-negative margin.
///
/// Evaluates `start + k * step` for `k = 0, 1, 2, ...` and returns at the
/// first `k` where `evaluate` reports `margin >= 0.0`. The returned
/// `iterations` equals that `k`, so a feasible starting point converges in
/// zero iterations.
///
/// The evaluator may fail (a trial can be geometrically impossible); its
/// error aborts the search and propagates unchanged.
///
/// # Errors
///
/// * [`SizeError::InvalidInput`] - bad grid parameters
/// * [`SizeError::NonConvergence`] - all `max_iterations` grid points had a
///   negative margin; carries the full trace evaluated so far
///
/// # Example
///
/// ```rust
/// use spar_core::solver::{find_min_thickness, MarginSample, SolverConfig};
///
/// let config = SolverConfig::new(0.001, 0.001, 100).unwrap();
/// let result = find_min_thickness(&config, |t| {
///     Ok(MarginSample::new(t - 0.0045).with_aux("demand_n", 12_500.0))
/// })
/// .unwrap();
///
/// assert_eq!(result.iterations, 4);
/// assert!((result.thickness_m - 0.005).abs() < 1e-12);
/// ```
pub fn find_min_thickness<F>(config: &SolverConfig, mut evaluate: F) -> SizeResult<SizingResult>
where
    F: FnMut(f64) -> SizeResult<MarginSample>,
{
    config.validate()?;

    let mut trace: Vec<TrialPoint> = Vec::new();

    for k in 0..config.max_iterations {
        let thickness_m = config.grid_point(k);
        let sample = evaluate(thickness_m)?;

        trace.push(TrialPoint {
            thickness_m,
            margin: sample.margin,
            auxiliary: sample.auxiliary,
        });

        if sample.margin >= 0.0 {
            return Ok(SizingResult {
                thickness_m,
                margin: sample.margin,
                iterations: k,
                trace,
            });
        }
    }

    let last_margin = trace.last().map(|p| p.margin).unwrap_or(f64::NEG_INFINITY);
    Err(SizeError::NonConvergence {
        iterations: config.max_iterations,
        last_margin,
        trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_grid() {
        assert!(SolverConfig::new(0.0, 0.001, 10).is_err());
        assert!(SolverConfig::new(-0.001, 0.001, 10).is_err());
        assert!(SolverConfig::new(0.001, 0.0, 10).is_err());
        assert!(SolverConfig::new(0.001, -0.1, 10).is_err());
        assert!(SolverConfig::new(0.001, 0.001, 0).is_err());
    }

    #[test]
    fn test_feasible_start_converges_in_zero_iterations() {
        let config = SolverConfig::new(0.002, 0.001, 10).unwrap();
        let result = find_min_thickness(&config, |t| Ok(MarginSample::new(t - 0.002))).unwrap();

        assert_eq!(result.iterations, 0);
        assert_eq!(result.trace.len(), 1);
        assert_eq!(result.thickness_m, 0.002);
    }

    #[test]
    fn test_one_step_to_first_feasible_point() {
        // First feasible point exactly one step above the start; powers of
        // two keep the grid arithmetic exact
        let config = SolverConfig::new(1.0, 0.5, 10).unwrap();
        let result = find_min_thickness(&config, |t| Ok(MarginSample::new(t - 1.5))).unwrap();

        assert_eq!(result.iterations, 1);
        assert_eq!(result.trace.len(), 2);
        assert_eq!(result.thickness_m, 1.5);
        assert_eq!(result.margin, 0.0);
    }

    #[test]
    fn test_returns_smallest_feasible_grid_point() {
        // Margin crosses zero between the 6th and 7th grid point
        let config = SolverConfig::new(0.0001, 0.0001, 1000).unwrap();
        let result = find_min_thickness(&config, |t| Ok(MarginSample::new(t - 0.00065))).unwrap();

        // 0.0007 is the first grid point at or above 0.00065
        assert!((result.thickness_m - 0.0007).abs() < 1e-12);
        assert_eq!(result.iterations, 6);
        assert_eq!(result.trace.len(), 7);

        // Every pre-convergence trial was infeasible, thicknesses increase
        for (i, pair) in result.trace.windows(2).enumerate() {
            assert!(pair[0].thickness_m < pair[1].thickness_m);
            assert!(pair[0].margin < 0.0, "trial {} should be infeasible", i);
        }
    }

    #[test]
    fn test_non_convergence_after_exact_bound() {
        let config = SolverConfig::new(0.001, 0.001, 25).unwrap();
        let mut calls = 0usize;
        let err = find_min_thickness(&config, |_| {
            calls += 1;
            Ok(MarginSample::new(-1.0))
        })
        .unwrap_err();

        assert_eq!(calls, 25);
        match err {
            SizeError::NonConvergence {
                iterations,
                last_margin,
                trace,
            } => {
                assert_eq!(iterations, 25);
                assert_eq!(trace.len(), 25);
                assert_eq!(last_margin, -1.0);
            }
            other => panic!("expected NonConvergence, got {:?}", other),
        }
    }

    #[test]
    fn test_idempotent_for_pure_evaluator() {
        let config = SolverConfig::new(0.0002, 0.00007, 500).unwrap();
        let eval = |t: f64| Ok(MarginSample::new((t * 1.0e4).sin() - 0.9).with_aux("t4", t * 4.0));

        let a = find_min_thickness(&config, eval).unwrap();
        let b = find_min_thickness(&config, eval).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_buckling_style_scenario() {
        // Capacity 5e10 * t^2, applied load 236 kN: feasible at
        // t = sqrt(236000 / 5e10) = 0.002173 m
        let applied_load_n = 236_000.0;
        let config = SolverConfig::new(1.0e-6, 1.0e-6, 5000).unwrap();
        let result = find_min_thickness(&config, |t| {
            let capacity = 5.0e10 * t * t;
            Ok(MarginSample::new(capacity / applied_load_n - 1.0))
        })
        .unwrap();

        let exact = (applied_load_n / 5.0e10_f64).sqrt();
        assert!(result.thickness_m >= exact);
        assert!(result.thickness_m - exact <= config.step_m);
        assert!(result.margin >= 0.0);
    }

    #[test]
    fn test_evaluator_error_propagates() {
        let config = SolverConfig::new(0.001, 0.001, 100).unwrap();
        let err = find_min_thickness(&config, |t| {
            if t > 0.003 {
                Err(SizeError::geometric_infeasibility(
                    "inner_radius_m",
                    0.003 - t,
                    "wall consumed the section",
                ))
            } else {
                Ok(MarginSample::new(-1.0))
            }
        })
        .unwrap_err();

        assert_eq!(err.error_code(), "GEOMETRIC_INFEASIBILITY");
    }

    #[test]
    fn test_grid_is_strictly_increasing() {
        let config = SolverConfig::new(0.0001, 0.0000001, 2_000_000).unwrap();
        let mut prev = config.grid_point(0);
        for k in [1usize, 10, 1_000, 100_000, 1_999_999] {
            let t = config.grid_point(k);
            assert!(t > prev);
            prev = t;
        }
    }

    #[test]
    fn test_auxiliary_curve_extraction() {
        let config = SolverConfig::new(0.001, 0.001, 10).unwrap();
        let result = find_min_thickness(&config, |t| {
            Ok(MarginSample::new(t - 0.0035).with_aux("area_m2", t * 2.0))
        })
        .unwrap();

        let curve = result.auxiliary_curve("area_m2");
        assert_eq!(curve.len(), result.trace.len());
        assert_eq!(curve[0], (0.001, 0.002));
        assert!(result.auxiliary_curve("missing").is_empty());
    }
}
