use std::mem;

use serde::Serialize;

use crate::{math_helpers::Vector, simulation::Simulation};

// a bird data accumulator: keeps what it saw in memory, the caller decides
// what happens with it
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BoidData {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub time: u64,
}

pub struct Birdwatcher {
    locations: Vec<BoidData>,
    render_ticker: u64,
    sample_rate: u64,
}

impl Birdwatcher {
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            locations: Vec::new(),
            render_ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection, only every `sample_rate`-th call records anything
    pub fn watch(&mut self, simulation: &Simulation) {
        if !self.should_sample() {
            return;
        }

        let time = self.render_ticker / self.sample_rate;
        self.locations.extend(simulation.boids().iter().map(|b| BoidData {
            id: b.id,
            x: b.position.x,
            y: b.position.y,
            vx: b.velocity.x,
            vy: b.velocity.y,
            time,
        }));
    }

    pub fn restart(&mut self) {
        self.locations.clear();
        self.render_ticker = 0;
    }

    pub fn data(&self) -> &[BoidData] {
        &self.locations
    }

    pub fn pop_data(&mut self) -> Vec<BoidData> {
        mem::take(&mut self.locations)
    }

    fn should_sample(&mut self) -> bool {
        self.render_ticker += 1;

        self.render_ticker % self.sample_rate == 0
    }
}

/// Aggregate view of a population, cheap enough to log every so often.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct FlockSummary {
    pub frame: u64,
    pub boids: usize,
    pub centroid_x: f64,
    pub centroid_y: f64,
    pub mean_speed: f64,
    /// boids with a NaN or infinite position, velocity or acceleration
    pub non_finite: usize,
}

impl FlockSummary {
    /// Centroid and mean speed are taken over finite boids only.
    pub fn of(simulation: &Simulation) -> Self {
        let mut centroid = Vector::ZERO;
        let mut speed = 0.;
        let mut finite = 0;

        for b in simulation.boids().iter().filter(|b| b.is_finite()) {
            centroid += b.position;
            speed += b.velocity.length();
            finite += 1;
        }

        if finite > 0 {
            centroid /= finite as f64;
            speed /= finite as f64;
        }

        FlockSummary {
            frame: simulation.frame(),
            boids: simulation.len(),
            centroid_x: centroid.x,
            centroid_y: centroid.y,
            mean_speed: speed,
            non_finite: simulation.len() - finite,
        }
    }
}
