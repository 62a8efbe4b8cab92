//! Sag Correction - BHA sag correction for MWD inclination surveys
//!
//! A bent or sagging bottom-hole assembly tilts the directional sensor away
//! from the borehole axis, biasing the measured inclination. This library
//! models the BHA as an Euler-Bernoulli beam lying inside the borehole and
//! recovers the sag angle at the sensor:
//! - Cell-centred discretization of the BHA (stiffness, diameters, weight)
//! - Stabilizer blades as lumped stiffness and wall-contact diameter
//! - Trajectory projection of the local borehole curvature
//! - Wall-constrained beam solve by projected Gauss-Seidel / SOR
//! - Point bends (adjustable bent housings) projected by toolface
//! - Slope, bending moment and shear along the assembly
//!
//! ## Example
//! ```rust
//! use sag_correction::prelude::*;
//!
//! let bha = Bha::new(
//!     vec![
//!         BhaElement::new("Bit", 0.2159, 0.0826, 0.2159, 0.41, 0.25),
//!         BhaElement::new("NM collar", 0.2, 0.08, 0.2, 9.0, 1.9).non_magnetic(),
//!         BhaElement::new("Collar", 0.2, 0.08, 0.2, 27.0, 5.7),
//!     ],
//!     6.0,
//! )
//! .with_stabilizer(Stabilizer::new(0.212, 1.0, 0.6));
//!
//! let trajectory = vec![
//!     TrajectoryPoint::new(1000.0, 30.0),
//!     TrajectoryPoint::new(1030.0, 31.0),
//!     TrajectoryPoint::new(1060.0, 32.5),
//! ];
//!
//! let model = SagModel::new(bha, 1.2).unwrap();
//! let report = model.run(&trajectory).unwrap();
//!
//! for station in &report.survey_results {
//!     println!("{:.1} m: {:.3} -> {:.3} deg", station.md, station.original_inc, station.corrected_inc);
//! }
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod grid;
pub mod loads;
pub mod math;
pub mod model;
pub mod options;
pub mod request;
pub mod results;
pub mod trajectory;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{SolverOptions, StopReason};
    pub use crate::elements::{Bha, BhaElement, MaterialKind, PhysicalConstants, Stabilizer};
    pub use crate::error::{CalcResult, SagError};
    pub use crate::model::SagModel;
    pub use crate::options::{GridSpacing, SagOptions};
    pub use crate::request::SagCorrectionRequest;
    pub use crate::results::{GridPoint, SagCorrectionReport, SagResult, StationRecord};
    pub use crate::trajectory::TrajectoryPoint;
}
