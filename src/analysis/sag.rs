//! Sag angle at the D&I sensor

use serde::{Deserialize, Serialize};

use crate::math::Vector;

/// Sag read off the deflection curve at the sensor node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSag {
    /// Sag angle (rad); add to the raw inclination to correct it
    pub angle: f64,
    /// Grid node used for the sensor
    pub index: usize,
    /// Whether the sensor index had to be moved inside the grid
    pub clamped: bool,
}

/// Sag angle from `deflection` (position relative to the borehole
/// centreline) at the sensor `dni_to_bit` metres from the bit.
///
/// The mean of the forward and backward slope angles at the sensor node,
/// negative when the axis falls toward the low side going uphole. The node
/// is clamped to `[1, n - 2]` so both differences exist.
/// Grids shorter than three nodes yield a zero angle.
pub fn sag_angle(dz: f64, deflection: &Vector, dni_to_bit: f64) -> SensorSag {
    let n = deflection.len();
    let raw = (dni_to_bit / dz).round();
    if n < 3 {
        return SensorSag {
            angle: 0.0,
            index: 0,
            clamped: true,
        };
    }

    let (index, clamped) = if raw <= 0.0 {
        (1, true)
    } else if raw >= (n - 1) as f64 {
        (n - 2, true)
    } else {
        (raw as usize, false)
    };
    if clamped {
        log::debug!(
            "D&I sensor at {:.2} m maps outside the grid interior; using node {}",
            dni_to_bit,
            index
        );
    }

    let forward = ((deflection[index + 1] - deflection[index]) / dz).atan();
    let backward = ((deflection[index] - deflection[index - 1]) / dz).atan();

    SensorSag {
        angle: (forward + backward) / 2.0,
        index,
        clamped,
    }
}
