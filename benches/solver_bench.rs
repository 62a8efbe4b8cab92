//! Benchmarks for the sag correction engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sag_correction::analysis::SolverOptions;
use sag_correction::math::projected_sor;
use sag_correction::prelude::*;

fn create_collar_bha() -> Bha {
    Bha::new(
        vec![
            BhaElement::new("Bit", 0.2159, 0.0826, 0.2159, 0.41, 0.25),
            BhaElement::new("NM collar", 0.2037, 0.0762, 0.2037, 9.3, 2.2).non_magnetic(),
            BhaElement::new("Collar", 0.2108, 0.073, 0.2108, 37.9, 9.1),
        ],
        8.0,
    )
    .with_stabilizer(Stabilizer::new(0.2127, 1.2, 0.4))
    .with_stabilizer(Stabilizer::new(0.2127, 18.0, 0.6))
}

fn create_survey(stations: usize) -> Vec<TrajectoryPoint> {
    (0..stations)
        .map(|i| TrajectoryPoint::new(2000.0 + 30.0 * i as f64, (20.0 + 2.0 * i as f64).min(85.0)))
        .collect()
}

fn benchmark_kernel(c: &mut Criterion) {
    let n = 64;
    let ei = vec![2.0e7; n];
    let q = vec![1500.0; n];
    let lower = vec![-0.01; n];
    let upper = vec![0.01; n];
    let options = SolverOptions::default().with_max_iter(2_000);

    c.bench_function("kernel_64_nodes_2000_sweeps", |b| {
        b.iter(|| {
            let mut x = vec![0.0; n];
            let outcome = projected_sor(&mut x, &ei, &q, &lower, &upper, 0.75, None, &options);
            black_box((&x, outcome));
        })
    });
}

fn benchmark_station(c: &mut Criterion) {
    let model = SagModel::new(create_collar_bha(), 1.2).unwrap();
    let survey = create_survey(8);

    c.bench_function("single_station_45m_bha", |b| {
        b.iter(|| {
            let result = model.solve_station(2210.0, &survey).unwrap();
            black_box(result);
        })
    });
}

fn benchmark_survey(c: &mut Criterion) {
    let survey = create_survey(24);
    let sequential = SagModel::new(create_collar_bha(), 1.2).unwrap();
    let parallel = SagModel::new(create_collar_bha(), 1.2)
        .unwrap()
        .with_options(SagOptions::default().with_parallel(true))
        .unwrap();

    c.bench_function("survey_24_stations_sequential", |b| {
        b.iter(|| black_box(sequential.run(&survey).unwrap()))
    });
    c.bench_function("survey_24_stations_parallel", |b| {
        b.iter(|| black_box(parallel.run(&survey).unwrap()))
    });
}

criterion_group!(benches, benchmark_kernel, benchmark_station, benchmark_survey);

criterion_main!(benches);
