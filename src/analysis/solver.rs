//! Constrained beam solve: wall bounds, initial guess, kernel dispatch

use serde::{Deserialize, Serialize};

use super::{SolverOptions, StopReason};
use crate::error::{CalcResult, SagError};
use crate::math::{projected_sor, BendKink, SweepOutcome, Vector};

/// Borehole wall envelope and the resulting contact bounds for the BHA axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallBounds {
    /// Low-side borehole wall (m)
    pub low: Vector,
    /// High-side borehole wall (m)
    pub top: Vector,
    /// Lowest admissible axis position: `low + od/2`
    pub lower: Vector,
    /// Highest admissible axis position: `top - od/2`
    pub upper: Vector,
}

impl WallBounds {
    /// Symmetric envelope of half-width `half_width` about `midline`
    pub fn around_midline(midline: &Vector, od: &Vector, half_width: f64) -> CalcResult<Self> {
        if od.len() != midline.len() {
            return Err(SagError::LengthMismatch {
                name: "od",
                expected: midline.len(),
                actual: od.len(),
            });
        }
        let low = midline.add_scalar(-half_width);
        let top = midline.add_scalar(half_width);
        let lower = &low + od * 0.5;
        let upper = &top - od * 0.5;
        Ok(Self {
            low,
            top,
            lower,
            upper,
        })
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.low.len()
    }

    /// Whether the bounds are empty
    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }

    /// Borehole centreline
    pub fn midline(&self) -> Vector {
        (&self.low + &self.top) * 0.5
    }

    /// Whether every node of `x` respects its contact bounds
    pub fn contains(&self, x: &Vector) -> bool {
        x.len() == self.len()
            && x
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(v, (lo, hi))| v >= lo && v <= hi)
    }
}

/// Starting shape for the solver.
///
/// Lying on the low side when the hole is inclined enough to have one,
/// centred otherwise.
pub fn initial_guess(bounds: &WallBounds, low_side: bool) -> Vector {
    if low_side {
        bounds.lower.clone()
    } else {
        bounds.midline()
    }
}

/// Solved BHA axis position
#[derive(Debug, Clone)]
pub struct BeamSolution {
    /// Lateral position per node (m)
    pub position: Vector,
    /// Kernel summary
    pub outcome: SweepOutcome,
}

impl BeamSolution {
    /// Whether the tolerance was reached
    pub fn converged(&self) -> bool {
        self.outcome.converged()
    }
}

/// Solve the wall-constrained beam equilibrium from `initial`.
///
/// A bend whose index is 0 is treated as absent. Exhausting the sweep cap or
/// the time budget is not an error: the best-effort shape is returned with
/// its [`StopReason`].
pub fn solve_constrained(
    ei: &Vector,
    q: &Vector,
    bounds: &WallBounds,
    dz: f64,
    bend: Option<BendKink>,
    initial: Vector,
    options: &SolverOptions,
) -> CalcResult<BeamSolution> {
    options.validate()?;

    let n = ei.len();
    if n < 4 {
        return Err(SagError::GridTooShort(n));
    }
    for (name, len) in [("q", q.len()), ("bounds", bounds.len()), ("initial", initial.len())] {
        if len != n {
            return Err(SagError::LengthMismatch {
                name,
                expected: n,
                actual: len,
            });
        }
    }
    if let Some(kink) = bend {
        if kink.index >= n {
            return Err(SagError::BendOutsideGrid {
                index: kink.index,
                len: n,
            });
        }
    }
    if !(dz > 0.0) {
        return Err(SagError::InvalidOptions(format!(
            "grid spacing must be positive, got {dz}"
        )));
    }

    let bend = bend.filter(|kink| kink.index > 0);
    let mut position = initial;
    let outcome = projected_sor(
        position.as_mut_slice(),
        ei.as_slice(),
        q.as_slice(),
        bounds.lower.as_slice(),
        bounds.upper.as_slice(),
        dz,
        bend,
        options,
    );

    match outcome.stop {
        StopReason::Converged => log::debug!(
            "beam solve converged in {} sweeps (residual {:.3e})",
            outcome.sweeps,
            outcome.residual
        ),
        StopReason::IterationLimit | StopReason::TimeBudget => log::warn!(
            "beam solve stopped without converging: {:?} after {} sweeps (residual {:.3e})",
            outcome.stop,
            outcome.sweeps,
            outcome.residual
        ),
    }

    Ok(BeamSolution { position, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(n: usize, value: f64) -> Vector {
        Vector::from_element(n, value)
    }

    #[test]
    fn test_wall_bounds_offsets() {
        let mid = Vector::from_vec(vec![0.0, 0.01, 0.02, 0.03]);
        let od = Vector::from_vec(vec![0.2, 0.2, 0.3, 0.2]);
        let bounds = WallBounds::around_midline(&mid, &od, 0.16).unwrap();

        assert!((bounds.low[1] - (0.01 - 0.16)).abs() < 1e-15);
        assert!((bounds.lower[2] - (0.02 - 0.16 + 0.15)).abs() < 1e-15);
        assert!((bounds.upper[0] - (0.16 - 0.1)).abs() < 1e-15);
        assert!((bounds.midline() - &mid).amax() < 1e-15);
    }

    #[test]
    fn test_initial_guess_modes() {
        let mid = uniform(5, 0.0);
        let od = uniform(5, 0.2);
        let bounds = WallBounds::around_midline(&mid, &od, 0.125).unwrap();

        assert!((initial_guess(&bounds, true)[0] - (-0.025)).abs() < 1e-15);
        assert_eq!(initial_guess(&bounds, false)[3], 0.0);
    }

    #[test]
    fn test_rejects_short_grid_and_bad_bend() {
        let options = SolverOptions::default();
        let bounds = WallBounds::around_midline(&uniform(3, 0.0), &uniform(3, 0.1), 0.1).unwrap();
        let err = solve_constrained(
            &uniform(3, 1.0),
            &uniform(3, 0.0),
            &bounds,
            1.0,
            None,
            uniform(3, 0.0),
            &options,
        );
        assert!(matches!(err, Err(SagError::GridTooShort(3))));

        let bounds = WallBounds::around_midline(&uniform(6, 0.0), &uniform(6, 0.1), 0.1).unwrap();
        let err = solve_constrained(
            &uniform(6, 1.0),
            &uniform(6, 0.0),
            &bounds,
            1.0,
            Some(BendKink { index: 6, angle: 0.01 }),
            uniform(6, 0.0),
            &options,
        );
        assert!(matches!(err, Err(SagError::BendOutsideGrid { index: 6, len: 6 })));
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let bounds = WallBounds::around_midline(&uniform(6, 0.0), &uniform(6, 0.1), 0.1).unwrap();
        let err = solve_constrained(
            &uniform(6, 1.0),
            &uniform(5, 0.0),
            &bounds,
            1.0,
            None,
            uniform(6, 0.0),
            &SolverOptions::default(),
        );
        assert!(matches!(err, Err(SagError::LengthMismatch { name: "q", .. })));
    }

    #[test]
    fn test_solution_respects_walls_without_convergence() {
        let n = 30;
        let mid = Vector::from_fn(n, |i, _| 0.002 * (i as f64 * 0.4).sin());
        let od = uniform(n, 0.17);
        let bounds = WallBounds::around_midline(&mid, &od, 0.11).unwrap();
        let start = initial_guess(&bounds, false);
        let options = SolverOptions::default().with_max_iter(25);

        let solution = solve_constrained(
            &uniform(n, 5.0e6),
            &uniform(n, 2.0e3),
            &bounds,
            0.75,
            None,
            start,
            &options,
        )
        .unwrap();

        assert!(!solution.converged());
        assert!(bounds.contains(&solution.position));
    }
}
