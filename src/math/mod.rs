//! Mathematical utilities for the sag calculations

pub mod sor;

use nalgebra::DVector;

pub use sor::{projected_sor, BendKink, SweepOutcome};

/// Dense per-node vector
pub type Vector = DVector<f64>;

/// Piecewise-linear interpolation of `(xp, fp)` at `x`.
///
/// `xp` must be non-decreasing. Values outside `[xp[0], xp[last]]` clamp to
/// the end values. Returns `None` when `xp` is empty or the lengths differ.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> Option<f64> {
    if xp.is_empty() || xp.len() != fp.len() {
        return None;
    }
    let last = xp.len() - 1;
    if x <= xp[0] {
        return Some(fp[0]);
    }
    if x >= xp[last] {
        return Some(fp[last]);
    }

    // First knot strictly greater than x
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    if span <= 0.0 {
        return Some(fp[hi]);
    }
    let t = (x - xp[lo]) / span;
    Some(fp[lo] + t * (fp[hi] - fp[lo]))
}

/// First derivative on a uniform grid.
///
/// Central differences in the interior, one-sided at both ends. Inputs with
/// fewer than two samples yield zeros.
pub fn first_derivative(values: &Vector, h: f64) -> Vector {
    let n = values.len();
    let mut out = Vector::zeros(n);
    if n < 2 {
        return out;
    }
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - values[i - 1]) / (2.0 * h);
    }
    out[0] = (values[1] - values[0]) / h;
    out[n - 1] = (values[n - 1] - values[n - 2]) / h;
    out
}

/// Second derivative on a uniform grid.
///
/// Three-point stencil in the interior; the end nodes reuse the stencil of
/// their nearest interior neighbour. Inputs with fewer than three samples
/// yield zeros.
pub fn second_derivative(values: &Vector, h: f64) -> Vector {
    let n = values.len();
    let mut out = Vector::zeros(n);
    if n < 3 {
        return out;
    }
    let h2 = h * h;
    for i in 1..n - 1 {
        out[i] = (values[i + 1] - 2.0 * values[i] + values[i - 1]) / h2;
    }
    out[0] = (values[2] - 2.0 * values[1] + values[0]) / h2;
    out[n - 1] = (values[n - 1] - 2.0 * values[n - 2] + values[n - 3]) / h2;
    out
}
