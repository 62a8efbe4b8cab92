//! Survey trajectory windows and their projection onto the BHA grid

use serde::{Deserialize, Serialize};

use crate::error::{CalcResult, SagError};
use crate::math::{interp, Vector};

/// A survey station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    /// Measured depth (m)
    pub md: f64,
    /// Inclination (deg)
    pub inc: f64,
}

impl TrajectoryPoint {
    /// Create a new survey station
    pub fn new(md: f64, inc: f64) -> Self {
        Self { md, inc }
    }
}

/// Stations within `lookback` metres above `md_bit`, ordered by depth.
///
/// `stations` must already be sorted by measured depth. When nothing falls
/// inside the window the single station closest to `md_bit` is returned.
pub fn lookback_window(
    stations: &[TrajectoryPoint],
    md_bit: f64,
    lookback: f64,
) -> Vec<TrajectoryPoint> {
    let window: Vec<TrajectoryPoint> = stations
        .iter()
        .filter(|s| md_bit - lookback <= s.md && s.md <= md_bit)
        .copied()
        .collect();

    if !window.is_empty() {
        return window;
    }

    stations
        .iter()
        .min_by(|a, b| (a.md - md_bit).abs().total_cmp(&(b.md - md_bit).abs()))
        .copied()
        .into_iter()
        .collect()
}

/// Borehole geometry projected onto the BHA grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    /// Lateral offset of the borehole centreline per node (m)
    pub midline: Vector,
    /// Inclination per node (rad)
    pub inclination: Vector,
    /// Mean inclination over the grid (rad)
    pub mean_inclination: f64,
}

/// Project a depth-ordered trajectory `window` onto grid coordinates `z`
/// (distance from bit, increasing uphole).
///
/// The centreline offset is the running integral of
/// `cos(inc) - cos(mean inc)` over the node spacing, i.e. the departure of
/// the local hole from a straight reference line at the mean inclination.
pub fn project(z: &Vector, md_bit: f64, window: &[TrajectoryPoint]) -> CalcResult<Projection> {
    if window.is_empty() {
        return Err(SagError::EmptyTrajectory);
    }

    // Deepest station first, as distance uphole from the bit
    let along: Vec<f64> = window.iter().rev().map(|s| md_bit - s.md).collect();
    let incs: Vec<f64> = window.iter().rev().map(|s| s.inc.to_radians()).collect();

    let n = z.len();
    let mut inclination = Vector::zeros(n);
    for i in 0..n {
        inclination[i] = interp(z[i], &along, &incs).ok_or(SagError::EmptyTrajectory)?;
    }
    let mean_inclination = if n > 0 { inclination.mean() } else { 0.0 };

    let step = if n > 1 { z[1] - z[0] } else { 0.0 };
    let reference = mean_inclination.cos();
    let mut midline = Vector::zeros(n);
    let mut offset = 0.0;
    for i in 0..n {
        offset += step * (inclination[i].cos() - reference);
        midline[i] = offset;
    }

    Ok(Projection {
        midline,
        inclination,
        mean_inclination,
    })
}
