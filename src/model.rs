//! Sag model - per-station orchestration of discretization, projection,
//! constrained solve and post-processing

use crate::analysis::{
    beam_sections, initial_guess, sag_angle, solve_constrained, WallBounds,
};
use crate::elements::Bha;
use crate::error::{CalcResult, SagError};
use crate::grid::discretize;
use crate::loads::lateral_load;
use crate::math::BendKink;
use crate::options::SagOptions;
use crate::results::{SagCorrectionReport, SagResult, StationRecord};
use crate::trajectory::{lookback_window, project, TrajectoryPoint};

/// Sag correction model for one BHA in one mud system
#[derive(Debug, Clone)]
pub struct SagModel {
    /// Assembly being modelled
    bha: Bha,
    /// Mud weight (g/ml)
    mud_weight: f64,
    /// Steering toolface (deg); projects the bend onto the deflection plane
    toolface_deg: f64,
    /// Run options
    options: SagOptions,
}

impl SagModel {
    /// Create a model, rejecting invalid BHA data up front
    pub fn new(bha: Bha, mud_weight: f64) -> CalcResult<Self> {
        bha.validate()?;
        if !(mud_weight >= 0.0) {
            return Err(SagError::InvalidOptions(format!(
                "mud weight must be non-negative, got {mud_weight}"
            )));
        }
        Ok(Self {
            bha,
            mud_weight,
            toolface_deg: 0.0,
            options: SagOptions::default(),
        })
    }

    /// Set the steering toolface (deg)
    pub fn with_toolface(mut self, toolface_deg: f64) -> Self {
        self.toolface_deg = toolface_deg;
        self
    }

    /// Replace the run options
    pub fn with_options(mut self, options: SagOptions) -> CalcResult<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// The modelled BHA
    pub fn bha(&self) -> &Bha {
        &self.bha
    }

    /// Current options
    pub fn options(&self) -> &SagOptions {
        &self.options
    }

    /// Bend angle projected onto the plane of deflection (rad)
    pub fn apparent_bend_angle(&self) -> f64 {
        self.bha.bend_angle * self.toolface_deg.to_radians().cos()
    }

    /// Solve the BHA shape with the bit at `md_bit` inside the hole described
    /// by the depth-ordered `window`.
    pub fn solve_station(&self, md_bit: f64, window: &[TrajectoryPoint]) -> CalcResult<SagResult> {
        let (first, last) = match (window.first(), window.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(SagError::EmptyTrajectory),
        };
        let constants = &self.options.constants;

        let avg_inc = (first.inc + last.inc) / 2.0;
        let dz = self.options.spacing.for_inclination(avg_inc);
        let grid = discretize(&self.bha, dz, constants, self.options.dni_uphole_length)?;

        let projection = project(&grid.z, md_bit, window)?;
        let q = lateral_load(&grid.linear_mass, &projection.inclination, self.mud_weight, constants)?;

        let bit_od = self.bha.bit_od().ok_or(SagError::EmptyBha)?;
        let half_width = 0.5 * (grid.max_od() + self.options.enlargement_factor * bit_od);
        let bounds = WallBounds::around_midline(&projection.midline, &grid.od, half_width)?;

        let low_side = projection.mean_inclination > self.options.low_side_seed_deg.to_radians();
        let start = initial_guess(&bounds, low_side);

        let bend = grid.bend_index.map(|index| BendKink {
            index,
            angle: self.apparent_bend_angle(),
        });

        let solution = solve_constrained(&grid.ei, &q, &bounds, dz, bend, start, &self.options.solver)?;

        let mid = bounds.midline();
        let deflection = &solution.position - &mid;
        let sensor = sag_angle(dz, &deflection, self.bha.dni_to_bit);
        let sections = beam_sections(&solution.position, &grid.ei, dz);

        log::debug!(
            "station md={:.2}: dz={} nodes={} sag={:.4} deg converged={}",
            md_bit,
            dz,
            grid.len(),
            sensor.angle.to_degrees(),
            solution.converged()
        );

        Ok(SagResult {
            sag: sensor.angle,
            grid: grid.z,
            opt: solution.position,
            low: bounds.low,
            top: bounds.top,
            mid,
            od: grid.od,
            id: grid.id,
            slope: sections.slope,
            moment: sections.moment,
            shear: sections.shear,
            valid: solution.outcome.converged(),
            stop_reason: solution.outcome.stop,
            iterations: solution.outcome.sweeps,
            dz,
            sensor_index: sensor.index,
            sensor_clamped: sensor.clamped,
        })
    }

    /// Correct every station of `trajectory`.
    ///
    /// Each station is solved from scratch over its own lookback window.
    /// Stations whose input is rejected are reported with an error and do not
    /// stop the batch. The diagnostic grid comes from the deepest station that
    /// solved.
    pub fn run(&self, trajectory: &[TrajectoryPoint]) -> CalcResult<SagCorrectionReport> {
        if trajectory.is_empty() {
            return Err(SagError::EmptyTrajectory);
        }

        let mut stations = trajectory.to_vec();
        stations.sort_by(|a, b| a.md.total_cmp(&b.md));

        log::info!(
            "computing sag correction for {} stations ({} BHA elements, {} stabilizers)",
            stations.len(),
            self.bha.elements.len(),
            self.bha.stabilizers.len()
        );

        let outcomes = self.evaluate_all(&stations);

        let mut survey_results = Vec::with_capacity(outcomes.len());
        let mut last_solved = None;
        for (record, result) in outcomes {
            survey_results.push(record);
            if result.is_some() {
                last_solved = result;
            }
        }

        let unconverged = survey_results
            .iter()
            .filter(|r| !r.valid && r.error.is_none())
            .count();
        if unconverged > 0 {
            log::warn!("{} stations did not converge; sag values are best effort", unconverged);
        }

        Ok(SagCorrectionReport {
            survey_results,
            grid_data: last_solved.map(|r| r.grid_points()).unwrap_or_default(),
            sensor_position: self.bha.dni_to_bit,
            dni_uphole_length: self.options.dni_uphole_length,
        })
    }

    fn evaluate(
        &self,
        stations: &[TrajectoryPoint],
        station: &TrajectoryPoint,
    ) -> (StationRecord, Option<SagResult>) {
        let window = lookback_window(stations, station.md, self.options.lookback);
        match self.solve_station(station.md, &window) {
            Ok(result) => (StationRecord::solved(station.md, station.inc, &result), Some(result)),
            Err(e) => {
                log::warn!("station md={:.2} rejected: {}", station.md, e);
                (StationRecord::failed(station.md, station.inc, e.to_string()), None)
            }
        }
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all(&self, stations: &[TrajectoryPoint]) -> Vec<(StationRecord, Option<SagResult>)> {
        use rayon::prelude::*;

        if self.options.parallel {
            stations
                .par_iter()
                .map(|station| self.evaluate(stations, station))
                .collect()
        } else {
            stations.iter().map(|station| self.evaluate(stations, station)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all(&self, stations: &[TrajectoryPoint]) -> Vec<(StationRecord, Option<SagResult>)> {
        if self.options.parallel {
            log::debug!("built without the `parallel` feature; evaluating stations sequentially");
        }
        stations.iter().map(|station| self.evaluate(stations, station)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SolverOptions;
    use crate::elements::{BhaElement, Stabilizer};

    fn packed_bha() -> Bha {
        Bha::new(
            vec![
                BhaElement::new("Bit", 0.2159, 0.0826, 0.2159, 0.4, 0.12),
                BhaElement::new("NM collar", 0.171, 0.071, 0.171, 9.0, 1.35).non_magnetic(),
                BhaElement::new("Collar", 0.171, 0.071, 0.171, 27.0, 4.05),
            ],
            6.0,
        )
        .with_stabilizer(Stabilizer::new(0.2127, 1.2, 0.6))
    }

    fn options() -> SagOptions {
        SagOptions::default()
            .with_fixed_spacing(1.0)
            .with_uphole_length(10.0)
            .with_solver(SolverOptions::default().with_max_iter(20_000))
    }

    fn hold(md_end: f64, inc: f64) -> Vec<TrajectoryPoint> {
        (0..=10)
            .map(|i| TrajectoryPoint::new(md_end - 30.0 * (10 - i) as f64, inc))
            .collect()
    }

    #[test]
    fn test_new_rejects_bad_bha() {
        let mut bha = packed_bha();
        bha.elements[1].weight = 0.0;
        assert!(matches!(SagModel::new(bha, 1.2), Err(SagError::NonPositiveWeight { .. })));
        assert!(SagModel::new(packed_bha(), -1.0).is_err());
    }

    #[test]
    fn test_apparent_bend_follows_toolface() {
        let bha = packed_bha().with_bend(0.02, 3.0);
        let model = SagModel::new(bha, 1.2).unwrap();
        assert!((model.apparent_bend_angle() - 0.02).abs() < 1e-15);

        let model = model.with_toolface(90.0);
        assert!(model.apparent_bend_angle().abs() < 1e-15);
        let model = model.with_toolface(180.0);
        assert!((model.apparent_bend_angle() + 0.02).abs() < 1e-15);
    }

    #[test]
    fn test_station_result_is_consistent() {
        let model = SagModel::new(packed_bha(), 1.2).unwrap().with_options(options()).unwrap();
        let window = hold(2000.0, 40.0);
        let result = model.solve_station(2000.0, &window).unwrap();

        let n = result.len();
        assert_eq!(n, 17);
        for array in [&result.opt, &result.low, &result.top, &result.mid, &result.od, &result.slope] {
            assert_eq!(array.len(), n);
        }
        assert!(result.within_walls());
        assert_eq!(result.sensor_index, 6);
        assert!(!result.sensor_clamped);

        let d = result.deflection();
        let forward = (d[7] - d[6]).atan();
        let backward = (d[6] - d[5]).atan();
        assert!((result.sag - (forward + backward) / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_empty_window_is_an_error() {
        let model = SagModel::new(packed_bha(), 1.2).unwrap();
        assert!(matches!(model.solve_station(1000.0, &[]), Err(SagError::EmptyTrajectory)));
        assert!(matches!(model.run(&[]), Err(SagError::EmptyTrajectory)));
    }

    #[test]
    fn test_run_reports_every_station_in_depth_order() {
        let model = SagModel::new(packed_bha(), 1.2).unwrap().with_options(options()).unwrap();
        let mut trajectory = hold(1300.0, 30.0);
        trajectory.reverse();

        let report = model.run(&trajectory).unwrap();
        assert_eq!(report.survey_results.len(), trajectory.len());
        assert!(report.survey_results.windows(2).all(|w| w[0].md < w[1].md));
        assert_eq!(report.grid_data.len(), 17);
        assert_eq!(report.sensor_position, 6.0);

        for record in &report.survey_results {
            assert!(record.error.is_none());
            assert!((record.corrected_inc - (record.original_inc + record.sag)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_station_errors_do_not_stop_the_batch() {
        // Bend well past the modelled length: every station rejects it
        let bha = packed_bha().with_bend(0.01, 30.0);
        let model = SagModel::new(bha, 1.2).unwrap().with_options(options()).unwrap();

        let report = model.run(&hold(1300.0, 30.0)).unwrap();
        assert_eq!(report.survey_results.len(), 11);
        assert_eq!(report.failed().count(), 11);
        assert!(report.grid_data.is_empty());
        assert!(report.survey_results.iter().all(|r| r.corrected_inc == r.original_inc));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let trajectory: Vec<TrajectoryPoint> = (0..12)
            .map(|i| TrajectoryPoint::new(1500.0 + 30.0 * i as f64, 20.0 + 2.0 * i as f64))
            .collect();
        let sequential = SagModel::new(packed_bha(), 1.1)
            .unwrap()
            .with_options(options())
            .unwrap()
            .run(&trajectory)
            .unwrap();
        let parallel = SagModel::new(packed_bha(), 1.1)
            .unwrap()
            .with_options(options().with_parallel(true))
            .unwrap()
            .run(&trajectory)
            .unwrap();

        assert_eq!(sequential.survey_results, parallel.survey_results);
        assert_eq!(sequential.grid_data, parallel.grid_data);
    }
}
