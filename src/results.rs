//! Result types for sag correction

use serde::{Deserialize, Serialize};

use crate::analysis::StopReason;
use crate::math::Vector;

/// Full solution for one survey station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagResult {
    /// Sag angle (rad)
    pub sag: f64,
    /// Distance from bit per node (m)
    pub grid: Vector,
    /// Solved BHA axis position (m)
    pub opt: Vector,
    /// Low-side borehole wall (m)
    pub low: Vector,
    /// High-side borehole wall (m)
    pub top: Vector,
    /// Borehole centreline (m)
    pub mid: Vector,
    /// Outer diameter (m)
    pub od: Vector,
    /// Inner diameter (m)
    pub id: Vector,
    /// Slope θ(z) (rad)
    pub slope: Vector,
    /// Bending moment (N·m)
    pub moment: Vector,
    /// Shear force (N)
    pub shear: Vector,
    /// Whether the beam solve converged
    pub valid: bool,
    /// Why the beam solve stopped
    pub stop_reason: StopReason,
    /// Solver sweeps used
    pub iterations: usize,
    /// Grid spacing (m)
    pub dz: f64,
    /// Grid node used for the D&I sensor
    pub sensor_index: usize,
    /// Whether the sensor node was clamped into the grid interior
    pub sensor_clamped: bool,
}

impl SagResult {
    /// Sag angle in degrees
    pub fn sag_deg(&self) -> f64 {
        self.sag.to_degrees()
    }

    /// Number of grid nodes
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// Whether the grid is empty
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Deflection from the borehole centreline per node (m)
    pub fn deflection(&self) -> Vector {
        &self.opt - &self.mid
    }

    /// Whether the axis respects `low + od/2 <= opt <= top - od/2` everywhere
    pub fn within_walls(&self) -> bool {
        (0..self.len()).all(|i| {
            let half = self.od[i] * 0.5;
            self.opt[i] >= self.low[i] + half && self.opt[i] <= self.top[i] - half
        })
    }

    /// Diagnostic grid rows
    pub fn grid_points(&self) -> Vec<GridPoint> {
        (0..self.len())
            .map(|i| GridPoint {
                z_from_bit_m: self.grid[i],
                deflection_m: self.opt[i] - self.mid[i],
                slope_deg: self.slope[i].to_degrees(),
                moment_nm: self.moment[i],
                shear_n: self.shear[i],
            })
            .collect()
    }
}

/// Corrected inclination for one survey station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    /// Measured depth (m)
    pub md: f64,
    /// Raw inclination (deg)
    pub original_inc: f64,
    /// Sag correction (deg)
    pub sag: f64,
    /// Corrected inclination (deg)
    pub corrected_inc: f64,
    /// Whether the beam solve converged
    pub valid: bool,
    /// Solver sweeps used
    pub iterations: usize,
    /// Why this station could not be computed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StationRecord {
    /// Record for a solved station
    pub fn solved(md: f64, inc: f64, result: &SagResult) -> Self {
        let sag = result.sag_deg();
        Self {
            md,
            original_inc: inc,
            sag,
            corrected_inc: inc + sag,
            valid: result.valid,
            iterations: result.iterations,
            error: None,
        }
    }

    /// Record for a station whose input was rejected
    pub fn failed(md: f64, inc: f64, error: String) -> Self {
        Self {
            md,
            original_inc: inc,
            sag: 0.0,
            corrected_inc: inc,
            valid: false,
            iterations: 0,
            error: Some(error),
        }
    }
}

/// One row of the diagnostic beam grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Distance from bit (m)
    pub z_from_bit_m: f64,
    /// Deflection from the borehole centreline (m)
    pub deflection_m: f64,
    /// Slope (deg)
    pub slope_deg: f64,
    /// Bending moment (N·m)
    #[serde(rename = "moment_Nm")]
    pub moment_nm: f64,
    /// Shear force (N)
    #[serde(rename = "shear_N")]
    pub shear_n: f64,
}

/// Output of a full sag correction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SagCorrectionReport {
    /// One record per survey station, in depth order
    pub survey_results: Vec<StationRecord>,
    /// Beam grid of the deepest successfully solved station
    pub grid_data: Vec<GridPoint>,
    /// D&I sensor distance from bit (m)
    pub sensor_position: f64,
    /// Length modelled uphole of the sensor (m)
    pub dni_uphole_length: f64,
}

impl SagCorrectionReport {
    /// Stations that were solved and converged
    pub fn valid_count(&self) -> usize {
        self.survey_results.iter().filter(|r| r.valid).count()
    }

    /// Stations rejected for invalid input
    pub fn failed(&self) -> impl Iterator<Item = &StationRecord> {
        self.survey_results.iter().filter(|r| r.error.is_some())
    }

    /// Largest absolute sag over all stations (deg)
    pub fn max_abs_sag(&self) -> f64 {
        self.survey_results
            .iter()
            .map(|r| r.sag.abs())
            .fold(0.0, f64::max)
    }
}
