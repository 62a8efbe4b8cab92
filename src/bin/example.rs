//! Sag Correction Example - motor BHA through a build section

use anyhow::Context;
use sag_correction::prelude::*;

fn sample_bha() -> Bha {
    let steel = |description, od, id, max_od, length, weight| {
        BhaElement::new(description, od, id, max_od, length, weight)
    };

    Bha::new(
        vec![
            steel("Bit", 0.2159, 0.0826, 0.4064, 0.41, 0.25),
            steel("Motor", 0.2452, 0.1994, 0.4032, 10.03, 2.48),
            steel("NM SS", 0.2045, 0.0762, 0.308, 2.23, 0.53).non_magnetic(),
            steel("GWD", 0.2136, 0.1473, 0.2136, 4.6, 0.86),
            steel("MWD", 0.2134, 0.1499, 0.2134, 8.37, 1.56),
            steel("LWD", 0.2139, 0.0714, 0.2324, 5.87, 1.16),
            steel("Crossover", 0.2096, 0.0826, 0.2096, 0.78, 0.18),
            steel("NM SS", 0.2037, 0.0762, 0.4032, 2.46, 0.58).non_magnetic(),
            steel("Collar", 0.2108, 0.073, 0.2108, 9.48, 2.28),
            steel("Sub", 0.207, 0.0606, 0.207, 3.92, 0.75),
            steel("Sub", 0.2, 0.073, 0.2, 0.82, 0.17),
            steel("Collar", 0.2108, 0.073, 0.2108, 18.96, 4.56),
            steel("Jar", 0.2032, 0.0762, 0.205, 10.21, 1.68),
        ],
        21.37,
    )
    .with_stabilizer(Stabilizer::new(0.4032, 1.15, 0.38))
    .with_stabilizer(Stabilizer::new(0.308, 11.4, 0.67))
    .with_stabilizer(Stabilizer::new(0.4032, 33.5, 0.84))
    .with_bend(1.5_f64.to_radians(), 2.1)
}

fn build_section() -> Vec<TrajectoryPoint> {
    // 3 deg/30 m build from 12 deg, then hold
    (0..16)
        .map(|i| {
            let md = 1500.0 + 30.0 * i as f64;
            let inc = (12.0 + 3.0 * i as f64).min(45.0);
            TrajectoryPoint::new(md, inc)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Sag Correction Example: Motor BHA in a Build Section ===\n");

    let bha = sample_bha();
    println!("BHA: {} elements, {:.2} m, D&I sensor {:.2} m from bit", bha.elements.len(), bha.length(), bha.dni_to_bit);
    println!("Stabilizers: {}", bha.stabilizers.len());
    println!("Bend: {:.2} deg at {:.2} m\n", bha.bend_angle.to_degrees(), bha.bend_to_bit);

    let options = SagOptions::default().with_parallel(true);
    let model = SagModel::new(bha, 1.14)
        .context("invalid BHA")?
        .with_toolface(30.0)
        .with_options(options)?;

    let report = model.run(&build_section()).context("sag correction failed")?;

    println!("{:>10} {:>10} {:>10} {:>10} {:>6} {:>8}", "MD (m)", "Inc", "Sag", "Corrected", "Conv", "Sweeps");
    println!("{}", "-".repeat(60));
    for station in &report.survey_results {
        match &station.error {
            Some(err) => println!("{:>10.1} {:>10.3}  error: {}", station.md, station.original_inc, err),
            None => println!(
                "{:>10.1} {:>10.3} {:>10.4} {:>10.3} {:>6} {:>8}",
                station.md,
                station.original_inc,
                station.sag,
                station.corrected_inc,
                if station.valid { "yes" } else { "no" },
                station.iterations
            ),
        }
    }

    println!("\nConverged stations: {}/{}", report.valid_count(), report.survey_results.len());
    println!("Max |sag|: {:.4} deg", report.max_abs_sag());

    println!("\n=== Deepest Station Beam Grid ===");
    println!("{:>8} {:>12} {:>10} {:>12} {:>10}", "z (m)", "defl (mm)", "slope", "M (kN·m)", "V (kN)");
    for point in &report.grid_data {
        println!(
            "{:>8.2} {:>12.2} {:>10.4} {:>12.3} {:>10.3}",
            point.z_from_bit_m,
            point.deflection_m * 1000.0,
            point.slope_deg,
            point.moment_nm / 1000.0,
            point.shear_n / 1000.0
        );
    }

    println!("\n=== JSON Report ===");
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
