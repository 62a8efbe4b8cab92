//! Beam section quantities derived from a solved deflection curve

use serde::{Deserialize, Serialize};

use crate::math::{first_derivative, second_derivative, Vector};

/// Slope, bending moment and shear along the BHA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamSections {
    /// Slope θ(z) (rad, small-angle)
    pub slope: Vector,
    /// Bending moment M(z) = EI·κ (N·m)
    pub moment: Vector,
    /// Shear V(z) = dM/dz (N)
    pub shear: Vector,
}

/// Differentiate the solved positions `x` on spacing `dz`.
pub fn beam_sections(x: &Vector, ei: &Vector, dz: f64) -> BeamSections {
    let slope = first_derivative(x, dz);
    let curvature = second_derivative(x, dz);
    let moment = ei.component_mul(&curvature);
    let shear = first_derivative(&moment, dz);

    BeamSections {
        slope,
        moment,
        shear,
    }
}
