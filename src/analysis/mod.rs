//! Constrained beam analysis: solver options, wall bounds, section and sag
//! post-processing

mod sag;
mod sections;
mod solver;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use sag::{sag_angle, SensorSag};
pub use sections::{beam_sections, BeamSections};
pub use solver::{initial_guess, solve_constrained, BeamSolution, WallBounds};

/// Why the iterative solve stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Sweep residual fell to or below the tolerance
    Converged,
    /// The sweep cap was reached first
    IterationLimit,
    /// The wall-clock budget ran out first
    TimeBudget,
}

/// Options for the projected Gauss-Seidel / SOR beam solver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Convergence threshold on the l2 norm of one sweep's position change (m)
    pub tolerance: f64,
    /// Maximum number of sweeps
    pub max_iterations: usize,
    /// Over-relaxation factor (1.0 = plain Gauss-Seidel)
    pub omega: f64,
    /// Optional wall-clock budget per solve, in milliseconds
    #[serde(default)]
    pub time_budget_ms: Option<u64>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-7,
            max_iterations: 300_000,
            omega: 1.6,
            time_budget_ms: None,
        }
    }
}

impl SolverOptions {
    /// Set maximum sweeps
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iterations = max_iter;
        self
    }

    /// Set convergence tolerance
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Set relaxation factor
    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Bound each solve by wall-clock time
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    /// Wall-clock budget, if any
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    /// Check option sanity. SOR diverges outside `0 < omega < 2`.
    pub fn validate(&self) -> crate::error::CalcResult<()> {
        use crate::error::SagError;

        if !(self.tolerance > 0.0) {
            return Err(SagError::InvalidOptions(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.omega > 0.0 && self.omega < 2.0) {
            return Err(SagError::InvalidOptions(format!(
                "omega must lie in (0, 2), got {}",
                self.omega
            )));
        }
        if self.max_iterations == 0 {
            return Err(SagError::InvalidOptions(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SolverOptions::default();
        assert_eq!(options.tolerance, 1e-7);
        assert_eq!(options.max_iterations, 300_000);
        assert_eq!(options.omega, 1.6);
        assert!(options.time_budget().is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_and_validation() {
        let options = SolverOptions::default()
            .with_tolerance(1e-9)
            .with_max_iter(10)
            .with_time_budget(Duration::from_millis(250));
        assert_eq!(options.time_budget(), Some(Duration::from_millis(250)));
        assert!(options.validate().is_ok());

        assert!(SolverOptions::default().with_omega(2.0).validate().is_err());
        assert!(SolverOptions::default().with_tolerance(0.0).validate().is_err());
        assert!(SolverOptions::default().with_max_iter(0).validate().is_err());
    }
}
