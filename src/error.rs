//! Error types for the sag correction engine

use thiserror::Error;

/// Main error type for sag correction operations
///
/// Solver non-convergence is not an error. It is reported through
/// [`crate::analysis::StopReason`] alongside a best-effort shape.
#[derive(Error, Debug)]
pub enum SagError {
    #[error("BHA element '{description}' has non-positive weight ({weight}). Check your input data.")]
    NonPositiveWeight { description: String, weight: f64 },

    #[error("BHA element '{description}' has non-positive length ({length})")]
    NonPositiveLength { description: String, length: f64 },

    #[error("BHA element '{description}' has non-positive outer diameter ({od})")]
    NonPositiveDiameter { description: String, od: f64 },

    #[error("BHA has no elements")]
    EmptyBha,

    #[error("Trajectory window is empty")]
    EmptyTrajectory,

    #[error("Bend index {index} lies outside the modelled grid of {len} nodes")]
    BendOutsideGrid { index: usize, len: usize },

    #[error("Grid has {0} nodes; at least 4 are required")]
    GridTooShort(usize),

    #[error("Array '{name}' has length {actual}, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for sag correction operations
pub type CalcResult<T> = Result<T, SagError>;
