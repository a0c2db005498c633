use std::time::Instant;

use crate::simulation::generator::{Generator, Progress};
use crate::simulation::magnets::MagnetRegistry;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec2;

/// `n` magnets evenly spaced on a circle of radius 0.25 around the center
pub fn ring_of_magnets(n: usize) -> MagnetRegistry {
    MagnetRegistry::from_positions((0..n).map(|k| {
        let a = k as f64 / n as f64 * std::f64::consts::TAU;
        NVec2::new(0.5 + 0.25 * a.cos(), 0.5 + 0.25 * a.sin())
    }))
}

/// Time one full sweep for a range of grid sizes and magnet counts
/// Paste output directly into a spreadsheet to graph
pub fn bench_sweep() {
    let sizes = [16, 32, 64, 128];
    let magnet_counts = [1, 3, 6];
    let params = Parameters::default();

    println!("side,magnets,ms,us_per_pixel");

    for side in sizes {
        for n in magnet_counts {
            let magnets = ring_of_magnets(n);
            let Ok(mut generator) = Generator::new(side, side) else { continue };

            let t0 = Instant::now();
            generator.start(&params);
            while let Progress::Row(_) = generator.step_row(magnets.snapshot()) {}
            let elapsed = t0.elapsed().as_secs_f64();

            let ms = elapsed * 1000.0;
            let us_per_pixel = elapsed * 1.0e6 / (side * side) as f64;
            println!("{},{},{:.3},{:.3}", side, n, ms, us_per_pixel);
        }
    }
}
