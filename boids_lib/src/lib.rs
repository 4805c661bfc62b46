use birdwatcher::{Birdwatcher, BoidData};
use options::{OptionsError, RunOptions};
use simulation::Simulation;

pub mod boid;
pub mod simulation;

pub mod birdwatcher;
pub mod math_helpers;
pub mod options;

/// Runs `no_iter` frames of `delta` without any presentation attached and
/// returns what the birdwatcher sampled along the way.
pub fn run_headless(
    no_iter: u64,
    delta: f64,
    run_options: &RunOptions,
) -> Result<Vec<BoidData>, OptionsError> {
    let mut simulation = Simulation::try_new(run_options)?;
    let mut bird_watcher = Birdwatcher::new(run_options.sample_rate);

    (0..no_iter).for_each(|_| {
        simulation.update_boids(delta);
        bird_watcher.watch(&simulation);
    });

    Ok(bird_watcher.pop_data())
}
