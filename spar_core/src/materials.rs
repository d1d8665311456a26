//! # Materials Catalog
//!
//! Mechanical and thermal reference data for the airframe alloys and
//! insulation products the sizing models draw from. One immutable catalog,
//! initialized lazily and shared by every run - sizing code receives
//! properties by lookup, never from its own constant table.
//!
//! ## Example
//!
//! ```rust
//! use spar_core::materials::lookup;
//!
//! let alu = lookup("Aluminium 6061-T6").unwrap();
//! assert_eq!(alu.yield_mpa, 240.0);
//! assert_eq!(alu.elastic_modulus_pa(), 68.0e9);
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{SizeError, SizeResult};

/// Mechanical properties of a structural alloy.
///
/// Catalogued in the units material datasheets use (GPa, MPa, kg/m³);
/// accessor methods convert to SI base units for calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Elastic modulus E (GPa)
    pub elastic_modulus_gpa: f64,

    /// Ultimate tensile strength (MPa)
    pub uts_mpa: f64,

    /// Yield strength (MPa)
    pub yield_mpa: f64,

    /// Poisson's ratio
    pub poisson_ratio: f64,

    /// Density (kg/m³)
    pub density_kg_m3: f64,

    /// Thermal conductivity (W/m·K), where the datasheet provides one
    pub thermal_conductivity_w_mk: Option<f64>,
}

impl MaterialProperties {
    /// Elastic modulus in Pa
    pub fn elastic_modulus_pa(&self) -> f64 {
        self.elastic_modulus_gpa * 1.0e9
    }

    /// Ultimate tensile strength in Pa
    pub fn uts_pa(&self) -> f64 {
        self.uts_mpa * 1.0e6
    }

    /// Yield strength in Pa
    pub fn yield_pa(&self) -> f64 {
        self.yield_mpa * 1.0e6
    }
}

/// Thermal properties of an insulation product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsulationProperties {
    /// Thermal conductivity k (W/m·K)
    pub thermal_conductivity_w_mk: f64,
}

/// Built-in alloy catalog.
static METALS: Lazy<BTreeMap<&'static str, MaterialProperties>> = Lazy::new(|| {
    let mut catalog = BTreeMap::new();
    catalog.insert(
        "Aluminium 6061-T6",
        MaterialProperties {
            elastic_modulus_gpa: 68.0,
            uts_mpa: 290.0,
            yield_mpa: 240.0,
            poisson_ratio: 0.33,
            density_kg_m3: 2710.0,
            thermal_conductivity_w_mk: Some(167.0),
        },
    );
    catalog.insert(
        "Aluminium 2219-T62",
        MaterialProperties {
            elastic_modulus_gpa: 73.1,
            uts_mpa: 414.0,
            yield_mpa: 290.0,
            poisson_ratio: 0.33,
            density_kg_m3: 2840.0,
            thermal_conductivity_w_mk: None,
        },
    );
    catalog.insert(
        "Aluminium 7075",
        MaterialProperties {
            elastic_modulus_gpa: 71.0,
            uts_mpa: 524.0,
            yield_mpa: 448.0,
            poisson_ratio: 0.33,
            density_kg_m3: 2800.0,
            thermal_conductivity_w_mk: None,
        },
    );
    catalog.insert(
        "Steel 17-4PH",
        MaterialProperties {
            elastic_modulus_gpa: 196.0,
            uts_mpa: 660.0,
            yield_mpa: 970.0,
            poisson_ratio: 0.291,
            density_kg_m3: 7860.0,
            thermal_conductivity_w_mk: None,
        },
    );
    catalog.insert(
        "Steel PH 15-7 Mo",
        MaterialProperties {
            elastic_modulus_gpa: 200.0,
            uts_mpa: 896.0,
            yield_mpa: 372.0,
            poisson_ratio: 0.28,
            density_kg_m3: 7804.0,
            thermal_conductivity_w_mk: None,
        },
    );
    catalog.insert(
        "Ti6Al4V Grade",
        MaterialProperties {
            elastic_modulus_gpa: 114.0,
            uts_mpa: 1000.0,
            yield_mpa: 910.0,
            poisson_ratio: 0.342,
            density_kg_m3: 4420.0,
            thermal_conductivity_w_mk: None,
        },
    );
    catalog
});

/// Built-in insulation catalog.
static INSULATION: Lazy<BTreeMap<&'static str, InsulationProperties>> = Lazy::new(|| {
    let mut catalog = BTreeMap::new();
    catalog.insert(
        "Silica Aerogel",
        InsulationProperties {
            thermal_conductivity_w_mk: 0.024,
        },
    );
    catalog.insert(
        "Fiberglass",
        InsulationProperties {
            thermal_conductivity_w_mk: 0.036,
        },
    );
    catalog
});

/// Look up an alloy by catalog name.
///
/// # Errors
///
/// [`SizeError::MaterialNotFound`] if the name is not in the catalog.
pub fn lookup(name: &str) -> SizeResult<&'static MaterialProperties> {
    METALS
        .get(name)
        .ok_or_else(|| SizeError::material_not_found(name))
}

/// Look up an insulation product by catalog name.
pub fn lookup_insulation(name: &str) -> SizeResult<&'static InsulationProperties> {
    INSULATION
        .get(name)
        .ok_or_else(|| SizeError::material_not_found(name))
}

/// Catalog names, sorted, for pickers and error messages.
pub fn metal_names() -> Vec<&'static str> {
    METALS.keys().copied().collect()
}

/// Insulation catalog names, sorted.
pub fn insulation_names() -> Vec<&'static str> {
    INSULATION.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_alloy() {
        let steel = lookup("Steel 17-4PH").unwrap();
        assert_eq!(steel.elastic_modulus_gpa, 196.0);
        assert_eq!(steel.poisson_ratio, 0.291);
        assert_eq!(steel.uts_pa(), 660.0e6);
    }

    #[test]
    fn test_unknown_material_is_an_error() {
        let err = lookup("Unobtainium").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_only_6061_carries_conductivity() {
        assert_eq!(
            lookup("Aluminium 6061-T6").unwrap().thermal_conductivity_w_mk,
            Some(167.0)
        );
        assert_eq!(
            lookup("Aluminium 7075").unwrap().thermal_conductivity_w_mk,
            None
        );
    }

    #[test]
    fn test_insulation_catalog() {
        let aerogel = lookup_insulation("Silica Aerogel").unwrap();
        assert_eq!(aerogel.thermal_conductivity_w_mk, 0.024);
        assert!(lookup_insulation("Cork").is_err());
    }

    #[test]
    fn test_catalog_listing() {
        let names = metal_names();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"Ti6Al4V Grade"));
        assert_eq!(insulation_names().len(), 2);
    }
}
