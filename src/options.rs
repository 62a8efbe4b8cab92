//! Options for a sag correction run

use serde::{Deserialize, Serialize};

use crate::analysis::SolverOptions;
use crate::elements::PhysicalConstants;
use crate::error::{CalcResult, SagError};

/// Inclination-dependent grid spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpacing {
    /// Inclination separating the two spacings (deg)
    pub threshold_deg: f64,
    /// Spacing used below the threshold (m)
    pub below_threshold: f64,
    /// Spacing used at or above the threshold (m)
    pub above_threshold: f64,
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            threshold_deg: 10.0,
            below_threshold: 0.75,
            above_threshold: 1.5,
        }
    }
}

impl GridSpacing {
    /// Spacing for a window with average inclination `inc_deg`
    pub fn for_inclination(&self, inc_deg: f64) -> f64 {
        if inc_deg < self.threshold_deg {
            self.below_threshold
        } else {
            self.above_threshold
        }
    }
}

/// Options for the station orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SagOptions {
    /// Trajectory lookback window above the bit (m)
    pub lookback: f64,
    /// Length modelled uphole of the D&I sensor (m)
    pub dni_uphole_length: f64,
    /// Grid spacing policy
    pub spacing: GridSpacing,
    /// Borehole enlargement as a fraction of bit OD
    pub enlargement_factor: f64,
    /// Average inclination above which the solve starts on the low side (deg)
    pub low_side_seed_deg: f64,
    /// Beam solver options
    pub solver: SolverOptions,
    /// Material constants
    pub constants: PhysicalConstants,
    /// Evaluate stations concurrently
    pub parallel: bool,
}

impl Default for SagOptions {
    fn default() -> Self {
        Self {
            lookback: 200.0,
            dni_uphole_length: 25.0,
            spacing: GridSpacing::default(),
            enlargement_factor: 0.025,
            low_side_seed_deg: 2.5,
            solver: SolverOptions::default(),
            constants: PhysicalConstants::default(),
            parallel: false,
        }
    }
}

impl SagOptions {
    /// Set the lookback window
    pub fn with_lookback(mut self, lookback: f64) -> Self {
        self.lookback = lookback;
        self
    }

    /// Set the length modelled past the D&I sensor
    pub fn with_uphole_length(mut self, length: f64) -> Self {
        self.dni_uphole_length = length;
        self
    }

    /// Set the grid spacing policy
    pub fn with_spacing(mut self, spacing: GridSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Use one spacing regardless of inclination
    pub fn with_fixed_spacing(self, dz: f64) -> Self {
        self.with_spacing(GridSpacing {
            threshold_deg: 0.0,
            below_threshold: dz,
            above_threshold: dz,
        })
    }

    /// Set the borehole enlargement factor
    pub fn with_enlargement(mut self, factor: f64) -> Self {
        self.enlargement_factor = factor;
        self
    }

    /// Set solver options
    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    /// Override physical constants
    pub fn with_constants(mut self, constants: PhysicalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Evaluate stations concurrently
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check option sanity
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("lookback", self.lookback >= 0.0),
            ("dni_uphole_length", self.dni_uphole_length >= 0.0),
            ("spacing.below_threshold", self.spacing.below_threshold > 0.0),
            ("spacing.above_threshold", self.spacing.above_threshold > 0.0),
            ("enlargement_factor", self.enlargement_factor >= 0.0),
            ("constants.steel_density", self.constants.steel_density > 0.0),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, ok)| !ok) {
            return Err(SagError::InvalidOptions(format!("{name} is out of range")));
        }
        self.solver.validate()
    }
}
