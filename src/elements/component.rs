//! BHA component - a single mechanical element of the assembly

use serde::{Deserialize, Serialize};

use super::material::MaterialKind;
use crate::error::{CalcResult, SagError};

/// One mechanical element of a BHA, ordered from the bit upward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BhaElement {
    /// Catalog label ("Bit", "Motor", "NM SS", ...)
    pub description: String,
    /// Nominal outer diameter in m
    pub od: f64,
    /// Nominal inner diameter in m
    pub id: f64,
    /// Maximum outer diameter (upsets, pads) in m
    pub max_od: f64,
    /// Length in m
    pub length: f64,
    /// Weight in metric tonnes
    pub weight: f64,
    /// Material class
    #[serde(default, deserialize_with = "deserialize_material")]
    pub material: MaterialKind,
}

impl BhaElement {
    /// Create a new steel element
    pub fn new(description: &str, od: f64, id: f64, max_od: f64, length: f64, weight: f64) -> Self {
        Self {
            description: description.to_string(),
            od,
            id,
            max_od,
            length,
            weight,
            material: MaterialKind::Steel,
        }
    }

    /// Set the material class
    pub fn with_material(mut self, material: MaterialKind) -> Self {
        self.material = material;
        self
    }

    /// Mark the element as non-magnetic
    pub fn non_magnetic(self) -> Self {
        self.with_material(MaterialKind::NonMagnetic)
    }

    /// Linear mass in kg/m
    pub fn linear_mass(&self) -> f64 {
        self.weight * 1000.0 / self.length
    }

    /// Reject catalog data the discretizer cannot use
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.weight > 0.0) {
            return Err(SagError::NonPositiveWeight {
                description: self.description.clone(),
                weight: self.weight,
            });
        }
        if !(self.length > 0.0) {
            return Err(SagError::NonPositiveLength {
                description: self.description.clone(),
                length: self.length,
            });
        }
        if !(self.od > 0.0) {
            return Err(SagError::NonPositiveDiameter {
                description: self.description.clone(),
                od: self.od,
            });
        }
        Ok(())
    }
}

fn deserialize_material<'de, D>(deserializer: D) -> Result<MaterialKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    Ok(MaterialKind::from_label(&label))
}
