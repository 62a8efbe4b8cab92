//! Tubular section properties for BHA components

use std::f64::consts::PI;

/// Second moment of area of a hollow circular section in m⁴
pub fn tube_inertia(outer_diameter: f64, inner_diameter: f64) -> f64 {
    PI * (outer_diameter.powi(4) - inner_diameter.powi(4)) / 64.0
}

/// Apparent bore diameter back-computed from linear mass.
///
/// `ID² = OD² - 4·Q/(π·ρ)`, with `Q` in kg/m and `ρ` in kg/m³. The result
/// folds the mass of connections and threads into the section, so it is
/// usually smaller than the nominal bore. A negative `ID²` clamps to a solid
/// section.
pub fn apparent_inner_diameter(outer_diameter: f64, linear_mass: f64, density: f64) -> f64 {
    let id_squared = outer_diameter.powi(2) - 4.0 * linear_mass / (PI * density);
    if id_squared > 0.0 {
        id_squared.sqrt()
    } else {
        0.0
    }
}

/// Lumped second moment of area added by stabilizer blades.
///
/// Empirical: `B³·D/36 + B·D³/324` for blade diameter `B` over body
/// diameter `D`. Reproduced as-is; not derived from the blade geometry.
pub fn blade_inertia(blade_od: f64, body_od: f64) -> f64 {
    blade_od.powi(3) * body_od / 36.0 + blade_od * body_od.powi(3) / 324.0
}
