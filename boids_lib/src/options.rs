use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Steering weights and limits shared read-only by every boid of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoidSettings {
    /// neighbour detection radius, inclusive
    pub vision_rad: f64,
    /// speed cap applied after force integration
    pub max_speed: f64,
    pub contain_force: f64,
    /// distance from an edge at which containment kicks in
    pub contain_padding: f64,
    /// multiplier applied to the steering terms before their own weight
    pub pull_force: f64,
    /// pull towards the world center, scaled by the distance to it
    pub center_force: f64,
    pub align_force: f64,
    pub cohesion_force: f64,
    pub separation_force: f64,
    /// sprite scale, only meaningful to a renderer
    pub size: f64,
}

impl Default for BoidSettings {
    fn default() -> Self {
        BoidSettings {
            vision_rad: 50.,
            max_speed: 6.,
            contain_force: 0.25,
            contain_padding: 25.,
            pull_force: 1.,
            center_force: 0.000025,
            align_force: 0.1,
            cohesion_force: 0.02,
            separation_force: 0.04,
            size: 0.05,
        }
    }
}

impl BoidSettings {
    fn named_values(&self) -> [(&'static str, f64); 10] {
        [
            ("vision_rad", self.vision_rad),
            ("max_speed", self.max_speed),
            ("contain_force", self.contain_force),
            ("contain_padding", self.contain_padding),
            ("pull_force", self.pull_force),
            ("center_force", self.center_force),
            ("align_force", self.align_force),
            ("cohesion_force", self.cohesion_force),
            ("separation_force", self.separation_force),
            ("size", self.size),
        ]
    }
}

/// How a frame's updates see each other.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
// {"type": "Snapshot"}
pub enum UpdateMode {
    /// Boids are mutated in place, one after another. Boid `i` sees boids
    /// `0..i` already moved this frame and boids `i+1..` not yet moved.
    #[default]
    Sequential,
    /// Every boid steers against the frame-start state, then all of them
    /// integrate in a second pass. Independent of update order, but not
    /// numerically identical to `Sequential`.
    Snapshot,
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

impl WindowSize {
    pub fn new(width: f64, height: f64) -> WindowSize {
        WindowSize { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2., self.height / 2.)
    }
}

pub fn get_window_size(init_width: u32, init_height: u32) -> WindowSize {
    WindowSize::new(init_width as f64, init_height as f64)
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub init_boids: usize,
    pub window: WindowSize,
    pub settings: BoidSettings,

    /// seeds the initial placement, entropy when `None`
    pub seed: Option<u64>,
    pub update_mode: UpdateMode,
    /// maps zero-length normalizations to the zero vector and makes
    /// separation skip coincident neighbours instead of yielding NaN
    pub numeric_guard: bool,
    /// keep last frame's acceleration and add the new steering on top
    pub accumulate_acceleration: bool,

    pub sample_rate: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        let init_boids = 256;
        let init_height = 600;
        let init_width = 600;

        RunOptions {
            init_boids,
            window: self::get_window_size(init_width, init_height),
            settings: Default::default(),
            seed: None,
            update_mode: UpdateMode::Sequential,
            numeric_guard: false,
            accumulate_acceleration: false,
            sample_rate: 1,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("setting `{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("setting `{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("world must have a positive size, got {width}x{height}")]
    EmptyWorld { width: f64, height: f64 },
    #[error("sample rate must be at least 1")]
    ZeroSampleRate,
}

impl RunOptions {
    pub fn with_settings(settings: BoidSettings) -> Self {
        RunOptions {
            settings,
            ..Default::default()
        }
    }

    /// Checks everything a run depends on. The simulation itself never fails,
    /// so this is the one place bad configuration gets reported.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for (name, value) in self.settings.named_values() {
            if !value.is_finite() {
                return Err(OptionsError::NonFinite { name, value });
            }
            if value < 0. {
                return Err(OptionsError::Negative { name, value });
            }
        }

        let WindowSize { width, height } = self.window;
        if !(width.is_finite() && height.is_finite() && width > 0. && height > 0.) {
            return Err(OptionsError::EmptyWorld { width, height });
        }

        if self.sample_rate == 0 {
            return Err(OptionsError::ZeroSampleRate);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{BoidSettings, OptionsError, RunOptions, UpdateMode, WindowSize};

    #[test]
    fn defaults_are_valid() {
        assert_eq!(RunOptions::default().validate(), Ok(()));
    }

    #[rstest]
    #[case(BoidSettings { max_speed: f64::NAN, ..Default::default() }, "max_speed")]
    #[case(BoidSettings { vision_rad: f64::INFINITY, ..Default::default() }, "vision_rad")]
    fn rejects_non_finite_settings(#[case] settings: BoidSettings, #[case] field: &str) {
        match RunOptions::with_settings(settings).validate() {
            Err(OptionsError::NonFinite { name, .. }) => assert_eq!(name, field),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn rejects_negative_weights() {
        let settings = BoidSettings {
            cohesion_force: -0.1,
            ..Default::default()
        };
        assert_eq!(
            RunOptions::with_settings(settings).validate(),
            Err(OptionsError::Negative {
                name: "cohesion_force",
                value: -0.1
            })
        );
    }

    #[test]
    fn rejects_empty_world_and_zero_sample_rate() {
        let mut ro = RunOptions::default();
        ro.window = WindowSize::new(0., 100.);
        assert!(matches!(ro.validate(), Err(OptionsError::EmptyWorld { .. })));

        let mut ro = RunOptions::default();
        ro.sample_rate = 0;
        assert_eq!(ro.validate(), Err(OptionsError::ZeroSampleRate));
    }

    #[test]
    fn settings_fill_missing_fields_from_defaults() {
        let settings: BoidSettings =
            serde_json::from_str(r#"{"max_speed": 3.5, "align_force": 0.2}"#).unwrap();

        assert_eq!(settings.max_speed, 3.5);
        assert_eq!(settings.align_force, 0.2);
        assert_eq!(settings.vision_rad, BoidSettings::default().vision_rad);
    }

    #[test]
    fn update_mode_is_tagged() {
        let mode: UpdateMode = serde_json::from_str(r#"{"type": "Snapshot"}"#).unwrap();
        assert_eq!(mode, UpdateMode::Snapshot);
        assert_eq!(UpdateMode::default(), UpdateMode::Sequential);
    }
}
