//! Projected Gauss-Seidel / SOR kernel for the discrete Euler-Bernoulli beam
//!
//! Solves `(EI·x'')'' = -q` node by node on a uniform grid, clamping every
//! update into `[lower, upper]` (unilateral wall contact). The kernel works
//! in place on flat slices and allocates nothing per sweep.
//!
//! Sweeps are strictly sequential: node `i` reads the already-updated node
//! `i - 1`.

use std::time::Instant;

use crate::analysis::{SolverOptions, StopReason};

/// Sweeps between wall-clock checks
const CLOCK_CHECK_INTERVAL: usize = 256;

/// Point kink in the assembly, e.g. an adjustable bent housing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendKink {
    /// Grid node carrying the kink
    pub index: usize,
    /// Kink angle projected onto the deflection plane (rad)
    pub angle: f64,
}

/// Summary of a kernel run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    /// Sweeps performed
    pub sweeps: usize,
    /// l2 norm of the position change during the last sweep (m)
    pub residual: f64,
    /// Why the kernel stopped
    pub stop: StopReason,
}

impl SweepOutcome {
    /// Whether the tolerance was reached
    pub fn converged(&self) -> bool {
        self.stop == StopReason::Converged
    }
}

#[inline]
fn project(value: f64, lower: f64, upper: f64) -> f64 {
    if value > upper {
        upper
    } else if value < lower {
        lower
    } else {
        value
    }
}

/// Run projected SOR sweeps on `x` until convergence, the sweep cap, or the
/// time budget.
///
/// All slices must share one length of at least 4 and satisfy
/// `lower[i] <= upper[i]`; [`crate::analysis::solve_constrained`] checks this
/// before calling. `q` is the lateral load per unit length (N/m), positive
/// toward `lower`.
///
/// Node 0 and 1 use one-sided curvature stencils, node `n - 2` drops the
/// curvature beyond it, and node `n - 1` is held at its starting value as the
/// uphole anchor.
#[allow(clippy::too_many_arguments)]
pub fn projected_sor(
    x: &mut [f64],
    ei: &[f64],
    q: &[f64],
    lower: &[f64],
    upper: &[f64],
    dz: f64,
    bend: Option<BendKink>,
    options: &SolverOptions,
) -> SweepOutcome {
    let n = x.len();
    debug_assert!(n >= 4);
    debug_assert!(ei.len() == n && q.len() == n && lower.len() == n && upper.len() == n);

    let dz2 = dz * dz;
    let inv_dz2 = 1.0 / dz2;
    let kink = bend.map(|b| (b.index, b.angle.sin() / dz));
    let omega = options.omega;
    let deadline = options.time_budget().map(|budget| Instant::now() + budget);

    // Curvature at node j, less the built-in kink rotation at the bend node
    let curvature = |x: &[f64], j: usize| -> f64 {
        let k = (x[j + 1] + x[j - 1] - 2.0 * x[j]) * inv_dz2;
        match kink {
            Some((index, db)) if index == j => k - db,
            _ => k,
        }
    };

    for i in 0..n {
        x[i] = project(x[i], lower[i], upper[i]);
    }

    let mut residual = f64::INFINITY;
    let mut sweeps = 0;

    while sweeps < options.max_iterations {
        sweeps += 1;
        let mut change = 0.0;

        for i in 0..n - 1 {
            let (e0, k0, e1, k1, e2, k2) = if i == 0 {
                (0.0, 0.0, ei[0], 0.0, ei[1], curvature(x, 1))
            } else if i == 1 {
                (ei[0], 0.0, ei[1], curvature(x, 1), ei[2], curvature(x, 2))
            } else if i == n - 2 {
                (ei[i - 1], curvature(x, i - 1), ei[i], curvature(x, i), ei[i + 1], 0.0)
            } else {
                (
                    ei[i - 1],
                    curvature(x, i - 1),
                    ei[i],
                    curvature(x, i),
                    ei[i + 1],
                    curvature(x, i + 1),
                )
            };

            let denom = e0 + 4.0 * e1 + e2;
            if denom == 0.0 {
                continue;
            }

            let dx = dz2 * ((2.0 * e1 * k1 - e2 * k2 - e0 * k0) - q[i] * dz2) / denom;
            let updated = project(x[i] + omega * dx, lower[i], upper[i]);

            change += (updated - x[i]).powi(2);
            x[i] = updated;
        }

        residual = change.sqrt();
        if residual <= options.tolerance {
            return SweepOutcome {
                sweeps,
                residual,
                stop: StopReason::Converged,
            };
        }

        if let Some(deadline) = deadline {
            if sweeps % CLOCK_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                return SweepOutcome {
                    sweeps,
                    residual,
                    stop: StopReason::TimeBudget,
                };
            }
        }
    }

    SweepOutcome {
        sweeps,
        residual,
        stop: StopReason::IterationLimit,
    }
}
