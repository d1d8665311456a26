//! # Project Data Structures
//!
//! The `VehicleProject` struct is the root container for a sizing campaign:
//! who ran it, which vehicle, and the set of sizing calculations it holds.
//! Serializes to human-readable JSON as the root of a sizing report.
//!
//! ## Structure
//!
//! ```text
//! VehicleProject
//! ├── meta: ProjectMetadata (version, engineer, vehicle, timestamps)
//! ├── settings: GlobalSettings (safety factor, gravity)
//! └── items: HashMap<Uuid, CalculationItem> (all sizing runs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use spar_core::project::VehicleProject;
//!
//! let project = VehicleProject::new("Jane Engineer", "SPR-25-01", "Return vehicle");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("SPR-25-01"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::CalculationItem;
use crate::loads::STANDARD_GRAVITY_M_S2;

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleProject {
    /// Project metadata (version, engineer, vehicle)
    pub meta: ProjectMetadata,

    /// Global settings (safety factor, gravity)
    pub settings: GlobalSettings,

    /// All sizing calculations, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

impl VehicleProject {
    /// Create a new empty project.
    pub fn new(
        engineer: impl Into<String>,
        campaign_id: impl Into<String>,
        vehicle: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        VehicleProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                campaign_id: campaign_id.into(),
                vehicle: vehicle.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a sizing calculation. Returns the UUID assigned to it.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation by UUID, returning it if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

/// Project identification and bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of this project
    pub version: String,

    /// Responsible engineer
    pub engineer: String,

    /// Campaign identifier (e.g. "SPR-25-01")
    pub campaign_id: String,

    /// Vehicle name
    pub vehicle: String,

    /// Creation timestamp (UTC)
    pub created: DateTime<Utc>,

    /// Last-modified timestamp (UTC)
    pub modified: DateTime<Utc>,
}

/// Campaign-wide defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Default safety factor for new sizing runs
    pub safety_factor: f64,

    /// Gravity used for load derivation (m/s²)
    pub gravity_m_s2: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            safety_factor: 1.5,
            gravity_m_s2: STANDARD_GRAVITY_M_S2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::skin_buckling::SkinBucklingInput;

    #[test]
    fn test_add_and_remove_items() {
        let mut project = VehicleProject::new("Engineer", "SPR-25-01", "Return vehicle");

        let id = project.add_item(CalculationItem::SkinBuckling(SkinBucklingInput::reference(
            "Service module",
        )));
        assert!(project.get_item(&id).is_some());
        assert_eq!(project.get_item(&id).unwrap().label(), "Service module");

        let removed = project.remove_item(&id).unwrap();
        assert_eq!(removed.calc_type(), "SkinBuckling");
        assert!(project.items.is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut project = VehicleProject::new("Engineer", "SPR-25-01", "Return vehicle");
        project.add_item(CalculationItem::SkinBuckling(SkinBucklingInput::reference(
            "Service module",
        )));

        let json = serde_json::to_string(&project).unwrap();
        let back: VehicleProject = serde_json::from_str(&json).unwrap();
        assert_eq!(back.items.len(), 1);
        assert_eq!(back.meta.campaign_id, "SPR-25-01");
    }

    #[test]
    fn test_default_settings() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.safety_factor, 1.5);
        assert_eq!(settings.gravity_m_s2, STANDARD_GRAVITY_M_S2);
    }
}
