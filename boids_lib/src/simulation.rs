use std::f64::consts::TAU;

use log::{debug, trace, warn};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::boid::Boid;
use crate::math_helpers::Vector;
use crate::options::{BoidSettings, OptionsError, RunOptions, UpdateMode, WindowSize};

/// Owns the population and the run's options, and steps everyone once per frame.
///
/// The population is a plain vector scanned in full for every boid, O(N^2)
/// per frame. Its order is the update order and never changes.
pub struct Simulation {
    boids: Vec<Boid>,
    run_options: RunOptions,
    frame: u64,
}

impl Simulation {
    /// Places `run_options.init_boids` boids at random. Options are taken as
    /// they are, see [`Simulation::try_new`] for the validating variant.
    pub fn new(run_options: &RunOptions) -> Self {
        let boids = get_boids(run_options);

        debug!(
            "initialized {} boids in a {}x{} world ({:?}, seed {:?})",
            boids.len(),
            run_options.window.width,
            run_options.window.height,
            run_options.update_mode,
            run_options.seed
        );

        Simulation {
            boids,
            run_options: run_options.clone(),
            frame: 0,
        }
    }

    pub fn try_new(run_options: &RunOptions) -> Result<Self, OptionsError> {
        run_options.validate()?;
        Ok(Simulation::new(run_options))
    }

    /// `count` randomly placed boids in a `width` x `height` world, all other
    /// options left at their defaults.
    pub fn initialize(count: usize, width: f64, height: f64, settings: BoidSettings) -> Self {
        let run_options = RunOptions {
            init_boids: count,
            window: WindowSize::new(width, height),
            settings,
            ..Default::default()
        };

        Simulation::new(&run_options)
    }

    /// Takes over an existing population. Ids are reassigned to match the
    /// population order, as they are what a boid uses to skip itself.
    pub fn from_boids(boids: Vec<Boid>, run_options: &RunOptions) -> Self {
        let boids = boids
            .into_iter()
            .enumerate()
            .map(|(index, mut b)| {
                b.id = index;
                b
            })
            .collect();

        Simulation {
            boids,
            run_options: run_options.clone(),
            frame: 0,
        }
    }

    /// Advances every boid by one frame of `delta`.
    pub fn update_boids(&mut self, delta: f64) {
        match self.run_options.update_mode {
            UpdateMode::Sequential => self.update_sequential(delta),
            UpdateMode::Snapshot => self.update_snapshot(delta),
        }

        self.frame += 1;
        trace!("frame {} done, delta {}", self.frame, delta);
    }

    // mutate in place: later boids see earlier ones already moved
    fn update_sequential(&mut self, delta: f64) {
        for i_cur in 0..self.boids.len() {
            let mut boid = self.boids[i_cur];
            boid.update(&self.boids, delta, &self.run_options);

            self.report_non_finite(&self.boids[i_cur], &boid);
            self.boids[i_cur] = boid;
        }
    }

    fn update_snapshot(&mut self, delta: f64) {
        let ro = &self.run_options;

        // calculation loop
        let accelerations: Vec<Vector> = self
            .boids
            .iter()
            .map(|b| b.run_rules(b.steering_base(ro), &self.boids, ro))
            .collect();

        // update loop
        for (i_cur, acceleration) in accelerations.into_iter().enumerate() {
            let before = self.boids[i_cur];
            self.boids[i_cur].integrate(acceleration, delta, ro);
            self.report_non_finite(&before, &self.boids[i_cur]);
        }
    }

    fn report_non_finite(&self, before: &Boid, after: &Boid) {
        if before.is_finite() && !after.is_finite() {
            warn!(
                "boid {} went non-finite in frame {}: position {:?}, velocity {:?}",
                after.id,
                self.frame + 1,
                after.position,
                after.velocity
            );
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// Number of completed `update_boids` calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn run_options(&self) -> &RunOptions {
        &self.run_options
    }
}

fn get_boids(run_options: &RunOptions) -> Vec<Boid> {
    let mut rng = match run_options.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };

    (0..run_options.init_boids)
        .map(|id| get_boid(&mut rng, run_options, id))
        .collect()
}

fn get_boid<R: Rng>(rng: &mut R, run_options: &RunOptions, id: usize) -> Boid {
    let window = &run_options.window;
    let max_speed = run_options.settings.max_speed;

    // x in [0, width), y in [0, height)
    let x = rng.gen::<f64>() * window.width;
    let y = rng.gen::<f64>() * window.height;

    // speed in [0.5, max_speed) along a uniformly random direction
    let angle = rng.gen::<f64>() * TAU;
    let speed = rng.gen::<f64>() * (max_speed - 0.5) + 0.5;
    let velocity = Vector::new(angle.cos(), angle.sin()) * speed;

    // each component in [0, 1)
    let acceleration = Vector::new(rng.gen::<f64>(), rng.gen::<f64>());

    Boid::new(Vector::new(x, y), velocity, acceleration, id)
}
