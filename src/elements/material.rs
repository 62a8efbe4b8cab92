//! Material properties

use serde::{Deserialize, Serialize};

/// Material class of a BHA element, selects Young's modulus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKind {
    /// Carbon/alloy steel collars, motors, subs
    #[default]
    Steel,
    /// Non-magnetic (monel / austenitic) collars around the D&I sensor
    NonMagnetic,
}

impl MaterialKind {
    /// Parse the catalog material label.
    ///
    /// Only `NON_MAGNETIC` (any case) selects the non-magnetic class; every
    /// other label is treated as steel.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("NON_MAGNETIC") {
            Self::NonMagnetic
        } else {
            Self::Steel
        }
    }
}

/// Physical constants used by the discretizer and load model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Steel density in kg/m³
    #[serde(alias = "ro_steel")]
    pub steel_density: f64,
    /// Young's modulus of steel in Pa
    #[serde(alias = "e_steel")]
    pub steel_modulus: f64,
    /// Young's modulus of non-magnetic alloy in Pa
    #[serde(alias = "e_nmag")]
    pub non_magnetic_modulus: f64,
}

impl PhysicalConstants {
    /// Standard gravity in m/s²
    pub const GRAVITY: f64 = 9.81;

    /// Create a new set of constants
    pub fn new(steel_density: f64, steel_modulus: f64, non_magnetic_modulus: f64) -> Self {
        Self {
            steel_density,
            steel_modulus,
            non_magnetic_modulus,
        }
    }

    /// Young's modulus for the given material
    pub fn modulus(&self, kind: MaterialKind) -> f64 {
        match kind {
            MaterialKind::Steel => self.steel_modulus,
            MaterialKind::NonMagnetic => self.non_magnetic_modulus,
        }
    }

    /// Buoyancy factor `1 - rho_mud / rho_steel` for a mud weight in g/ml
    pub fn buoyancy_factor(&self, mud_weight_g_ml: f64) -> f64 {
        1.0 - mud_weight_g_ml * 1000.0 / self.steel_density
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            steel_density: 7850.0,        // kg/m³
            steel_modulus: 2.05e11,       // Pa
            non_magnetic_modulus: 1.90e11, // Pa
        }
    }
}
