//! # Error Types
//!
//! Structured error types for spar_core. Every failure mode a sizing run can
//! hit is a distinct variant with enough context to diagnose it
//! programmatically - no stringly-typed errors, no NaN/-inf sentinels.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::errors::{SizeError, SizeResult};
//!
//! fn validate_step(step_m: f64) -> SizeResult<()> {
//!     if step_m <= 0.0 {
//!         return Err(SizeError::invalid_input(
//!             "step_m",
//!             step_m.to_string(),
//!             "Grid step must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::solver::TrialPoint;

/// Result type alias for spar_core operations
pub type SizeResult<T> = Result<T, SizeError>;

/// Structured error type for sizing operations.
///
/// Each variant provides specific context about what went wrong. Errors are
/// serializable so a front end can echo them as JSON alongside results.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SizeError {
    /// An input value is invalid (out of range, non-positive, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// The grid search exhausted its iteration budget without the margin
    /// reaching non-negative. Carries the full partial trace for diagnosis.
    #[error("No convergence after {iterations} iterations (last margin {last_margin})")]
    NonConvergence {
        iterations: usize,
        last_margin: f64,
        trace: Vec<TrialPoint>,
    },

    /// A trial produced a geometrically impossible configuration
    /// (e.g. inner radius <= 0, wall thickness exceeding the section width)
    #[error("Geometric infeasibility: {quantity} = {value} - {reason}")]
    GeometricInfeasibility {
        quantity: String,
        value: f64,
        reason: String,
    },

    /// Calculation failed for a model-specific reason
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SizeError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SizeError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        SizeError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a GeometricInfeasibility error
    pub fn geometric_infeasibility(
        quantity: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        SizeError::GeometricInfeasibility {
            quantity: quantity.into(),
            value,
            reason: reason.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SizeError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SizeError::InvalidInput { .. } => "INVALID_INPUT",
            SizeError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            SizeError::NonConvergence { .. } => "NON_CONVERGENCE",
            SizeError::GeometricInfeasibility { .. } => "GEOMETRIC_INFEASIBILITY",
            SizeError::CalculationFailed { .. } => "CALCULATION_FAILED",
            SizeError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SizeError::invalid_input("step_m", "-0.001", "Grid step must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SizeError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_non_convergence_serialization() {
        let error = SizeError::NonConvergence {
            iterations: 100,
            last_margin: -0.42,
            trace: Vec::new(),
        };
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: SizeError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SizeError::material_not_found("Unobtainium").error_code(),
            "MATERIAL_NOT_FOUND"
        );
        assert_eq!(
            SizeError::geometric_infeasibility("inner_radius_m", -0.002, "negative").error_code(),
            "GEOMETRIC_INFEASIBILITY"
        );
    }
}
