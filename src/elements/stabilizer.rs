//! Stabilizer blades positioned along the BHA

use serde::{Deserialize, Serialize};

/// A near-gauge stabilizer acting as a rigid wall-contact point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stabilizer {
    /// Blade outer diameter in m
    pub blade_od: f64,
    /// Distance from blade mid-point to bit in m
    pub distance_to_bit: f64,
    /// Blade length in m
    pub length: f64,
}

impl Stabilizer {
    /// Create a new stabilizer
    pub fn new(blade_od: f64, distance_to_bit: f64, length: f64) -> Self {
        Self {
            blade_od,
            distance_to_bit,
            length,
        }
    }

    /// Grid span `[start, stop)` covered by the blades at spacing `dz`.
    ///
    /// The span always covers at least one node.
    pub fn grid_span(&self, dz: f64) -> (usize, usize) {
        let start = (self.distance_to_bit / dz).round().max(0.0) as usize;
        let nodes = ((self.length / dz).round() as usize).max(1);
        (start, start + nodes)
    }
}
