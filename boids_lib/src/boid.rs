use crate::{
    math_helpers::{unit_with, Vector, VectorExt},
    options::RunOptions,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    // sequential id starting from 0
    pub id: usize,
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
}

impl Boid {
    /// Creates a new [`Boid`].
    pub fn new(position: Vector, velocity: Vector, acceleration: Vector, id: usize) -> Self {
        Boid {
            id,
            position,
            velocity,
            acceleration,
        }
    }

    /// Facing angle derived from the velocity, for whoever draws the boid.
    pub fn heading(&self) -> f64 {
        self.velocity.heading()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }

    /// Every other boid within vision radius, in population order.
    ///
    /// This is the one O(N) scan per boid per frame, all rules work off its result.
    pub fn get_neighbours<'a>(&self, population: &'a [Boid], run_options: &RunOptions) -> Vec<&'a Boid> {
        population
            .iter()
            .filter(|other| {
                self.position.distance(other.position) <= run_options.settings.vision_rad
                    && other.id != self.id
            })
            .collect()
    }

    /// Sums the five steering contributions on top of `base`.
    pub fn run_rules(&self, base: Vector, population: &[Boid], run_options: &RunOptions) -> Vector {
        let neighbours = self.get_neighbours(population, run_options);

        base + self.pull_center(run_options)
            + self.contain(run_options)
            + self.align(&neighbours, run_options)
            + self.separate(&neighbours, run_options)
            + self.cohesion(&neighbours, run_options)
    }

    /// Steers against `population` and moves by one frame of `delta`.
    ///
    /// `population` may contain this boid itself, it is skipped by id.
    pub fn update(&mut self, population: &[Boid], delta: f64, run_options: &RunOptions) {
        let acceleration = self.run_rules(self.steering_base(run_options), population, run_options);
        self.integrate(acceleration, delta, run_options);
    }

    pub(crate) fn steering_base(&self, run_options: &RunOptions) -> Vector {
        if run_options.accumulate_acceleration {
            self.acceleration
        } else {
            Vector::ZERO
        }
    }

    // Actually shifts the individual's location
    pub fn integrate(&mut self, acceleration: Vector, delta: f64, run_options: &RunOptions) {
        self.acceleration = acceleration;
        self.velocity =
            (self.velocity + self.acceleration).cap_speed(run_options.settings.max_speed);
        self.position += self.velocity * delta;
    }

    /// Desired velocity at full speed along `desired`, turned into a steering
    /// correction of length `weight`.
    fn steer(&self, desired: Vector, weight: f64, run_options: &RunOptions) -> Vector {
        let guarded = run_options.numeric_guard;

        let mut dir = unit_with(desired, guarded) * run_options.settings.max_speed;
        dir -= self.velocity;
        unit_with(dir, guarded) * run_options.settings.pull_force * weight
    }

    /// Gravitates towards the world center, harder the farther away the boid is.
    pub fn pull_center(&self, run_options: &RunOptions) -> Vector {
        let (cx, cy) = run_options.window.center();
        let center = Vector::new(cx, cy);
        let distance = self.position.distance(center);
        let settings = &run_options.settings;

        self.steer(
            center - self.position,
            distance * settings.center_force,
            run_options,
        )
    }

    /// Pushes away from every edge closer than the containment padding.
    ///
    /// The force is re-applied after each triggered edge, so in a corner the
    /// first push gets scaled twice.
    pub fn contain(&self, run_options: &RunOptions) -> Vector {
        let padding = run_options.settings.contain_padding;
        let force = run_options.settings.contain_force;
        let window = &run_options.window;

        let left = self.position.x - padding;
        let right = self.position.x + padding;
        let bottom = self.position.y + padding;
        let top = self.position.y - padding;

        let mut dir = Vector::ZERO;
        if left < 0. {
            dir = (dir + Vector::new(1., 0.)) * force;
        }
        if right > window.width {
            dir = (dir + Vector::new(-1., 0.)) * force;
        }
        if top < 0. {
            dir = (dir + Vector::new(0., 1.)) * force;
        }
        if bottom > window.height {
            dir = (dir + Vector::new(0., -1.)) * force;
        }
        dir
    }

    pub fn align(&self, neighbours: &[&Boid], run_options: &RunOptions) -> Vector {
        if neighbours.is_empty() {
            return Vector::ZERO;
        }

        let mut avg = Vector::ZERO;
        for other in neighbours {
            avg += other.velocity;
        }
        avg /= neighbours.len() as f64;

        self.steer(avg, run_options.settings.align_force, run_options)
    }

    /// Inverse-square repulsion from every neighbour. Two boids sharing a
    /// position divide by zero unless the numeric guard is on, in which case
    /// the coincident neighbour is ignored.
    pub fn separate(&self, neighbours: &[&Boid], run_options: &RunOptions) -> Vector {
        let mut res = Vector::ZERO;
        let mut count = 0;

        for other in neighbours {
            let distance = self.position.distance(other.position);
            if run_options.numeric_guard && distance == 0. {
                continue;
            }

            res += (self.position - other.position) / (distance * distance);
            count += 1;
        }

        if count > 0 {
            res /= count as f64;
            self.steer(res, run_options.settings.separation_force, run_options)
        } else {
            Vector::ZERO
        }
    }

    pub fn cohesion(&self, neighbours: &[&Boid], run_options: &RunOptions) -> Vector {
        if neighbours.is_empty() {
            return Vector::ZERO;
        }

        let mut center = Vector::ZERO;
        for other in neighbours {
            center += other.position;
        }
        center /= neighbours.len() as f64;

        self.steer(
            center - self.position,
            run_options.settings.cohesion_force,
            run_options,
        )
    }
}
