//! # Sizing Calculations
//!
//! One module per physical model. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), validated up front
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, SizeError>` - Pure function
//!
//! Iterative models delegate their search loop to [`crate::solver`] and
//! differ only in the margin evaluator they supply; their results carry the
//! full trial trace for diagnostic plots.
//!
//! ## Available Calculations
//!
//! - [`skin_buckling`] - Stiffened-cylinder skin thickness against crippling
//! - [`stringer_stability`] - Closed-form stage stringer walls (Euler column)
//! - [`stiffener_rigidity`] - Iterative square-stiffener wall sizing
//! - [`wingbox`] - Wingbox wall thickness (bending, shear, buckling)
//! - [`thermal`] - Payload insulation thickness (lumped capacitance)
//! - [`landing`] - Landing ski and leg sizing
//! - [`wing_attachment`] - Idealized fuselage section, wing pin and stringer

pub mod landing;
pub mod skin_buckling;
pub mod stiffener_rigidity;
pub mod stringer_stability;
pub mod thermal;
pub mod wing_attachment;
pub mod wingbox;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use landing::{LandingGearInput, LandingGearResult};
pub use skin_buckling::{SkinBucklingInput, SkinBucklingResult};
pub use stiffener_rigidity::{StiffenerRigidityInput, StiffenerRigidityResult};
pub use stringer_stability::{StringerStabilityInput, StringerStabilityResult};
pub use thermal::{InsulationSizingInput, InsulationSizingResult};
pub use wing_attachment::{WingAttachmentInput, WingAttachmentResult};
pub use wingbox::{WingboxInput, WingboxResult};

/// Enum wrapper for all calculation types.
///
/// Allows storing heterogeneous sizing runs in a single project collection
/// with clean tagged serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Stiffened-cylinder skin buckling sizing
    SkinBuckling(SkinBucklingInput),
    /// Closed-form stage stringer sizing
    StringerStability(StringerStabilityInput),
    /// Iterative stiffener wall sizing
    StiffenerRigidity(StiffenerRigidityInput),
    /// Wingbox wall sizing
    Wingbox(WingboxInput),
    /// Payload insulation sizing
    Insulation(InsulationSizingInput),
    /// Landing gear sizing
    LandingGear(LandingGearInput),
    /// Wing attachment checks
    WingAttachment(WingAttachmentInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::SkinBuckling(i) => &i.label,
            CalculationItem::StringerStability(i) => &i.label,
            CalculationItem::StiffenerRigidity(i) => &i.label,
            CalculationItem::Wingbox(i) => &i.label,
            CalculationItem::Insulation(i) => &i.label,
            CalculationItem::LandingGear(i) => &i.label,
            CalculationItem::WingAttachment(i) => &i.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::SkinBuckling(_) => "SkinBuckling",
            CalculationItem::StringerStability(_) => "StringerStability",
            CalculationItem::StiffenerRigidity(_) => "StiffenerRigidity",
            CalculationItem::Wingbox(_) => "Wingbox",
            CalculationItem::Insulation(_) => "Insulation",
            CalculationItem::LandingGear(_) => "LandingGear",
            CalculationItem::WingAttachment(_) => "WingAttachment",
        }
    }
}
