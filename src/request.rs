//! JSON request payload for a sag correction run

use serde::{Deserialize, Serialize};

use crate::elements::{Bha, BhaElement, PhysicalConstants, Stabilizer};
use crate::error::CalcResult;
use crate::model::SagModel;
use crate::options::SagOptions;
use crate::results::SagCorrectionReport;
use crate::trajectory::TrajectoryPoint;

fn default_uphole_length() -> f64 {
    25.0
}

/// BHA section of the request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BhaPayload {
    /// Elements, bit first
    pub structure: Vec<BhaElement>,
    #[serde(default)]
    pub stabilizers: Vec<Stabilizer>,
    /// Bend angle (deg)
    #[serde(default)]
    pub bend_angle: f64,
    /// Bend distance from bit (m)
    #[serde(default)]
    pub bend_to_bit: f64,
}

/// A complete sag correction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SagCorrectionRequest {
    /// Survey stations; extra survey columns are ignored
    pub trajectory: Vec<TrajectoryPoint>,
    pub bha: BhaPayload,
    /// D&I sensor distance from bit (m)
    pub sensor_position: f64,
    /// Mud weight (g/ml)
    pub mud_weight: f64,
    #[serde(default = "default_uphole_length")]
    pub dni_uphole_length: f64,
    #[serde(default)]
    pub physical_constants: Option<PhysicalConstants>,
    /// Toolface (deg)
    #[serde(default)]
    pub toolface: f64,
}

impl SagCorrectionRequest {
    /// Parse a request from JSON
    pub fn from_json(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the BHA model, converting the bend to radians
    pub fn to_bha(&self) -> Bha {
        Bha {
            elements: self.bha.structure.clone(),
            stabilizers: self.bha.stabilizers.clone(),
            dni_to_bit: self.sensor_position,
            bend_angle: self.bha.bend_angle.to_radians(),
            bend_to_bit: self.bha.bend_to_bit,
        }
    }

    /// Apply the request's overrides on top of `base`
    pub fn options(&self, base: SagOptions) -> SagOptions {
        let options = base.with_uphole_length(self.dni_uphole_length);
        match self.physical_constants {
            Some(constants) => options.with_constants(constants),
            None => options,
        }
    }

    /// Run with default options
    pub fn run(&self) -> CalcResult<SagCorrectionReport> {
        self.run_with(SagOptions::default())
    }

    /// Run with `base` options, overridden by the request's own settings
    pub fn run_with(&self, base: SagOptions) -> CalcResult<SagCorrectionReport> {
        SagModel::new(self.to_bha(), self.mud_weight)?
            .with_toolface(self.toolface)
            .with_options(self.options(base))?
            .run(&self.trajectory)
    }
}

/// Parse a JSON request, run it and serialise the report
pub fn calculate_sag_correction_json(json: &str) -> CalcResult<String> {
    let report = SagCorrectionRequest::from_json(json)?.run()?;
    Ok(serde_json::to_string(&report)?)
}
