//! Gravity loads on the BHA

use crate::elements::PhysicalConstants;
use crate::error::{CalcResult, SagError};
use crate::math::Vector;

/// Lateral distributed load per node (N/m), positive toward the low side.
///
/// `q = m·(1 - ρ_mud/ρ_steel)·sin(inc)·g` for dry linear mass `m` (kg/m),
/// mud weight in g/ml and local inclination in radians.
pub fn lateral_load(
    linear_mass: &Vector,
    inclination: &Vector,
    mud_weight: f64,
    constants: &PhysicalConstants,
) -> CalcResult<Vector> {
    if inclination.len() != linear_mass.len() {
        return Err(SagError::LengthMismatch {
            name: "inclination",
            expected: linear_mass.len(),
            actual: inclination.len(),
        });
    }

    let buoyed = constants.buoyancy_factor(mud_weight) * PhysicalConstants::GRAVITY;
    Ok(linear_mass.zip_map(inclination, |m, inc| m * buoyed * inc.sin()))
}
