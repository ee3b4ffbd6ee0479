// config.rs - Tunable defaults for the engine and its host

use std::time::Duration;

/// Side length of one rendered cell, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 20;
/// Delay between generations when nothing else is configured.
pub const DEFAULT_INTERVAL_MS: u64 = 50;
/// Chance that `randomise` brings a cell to life. Keeps the initial soup sparse.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.1;
/// Multiplier applied to the speed slider before it becomes milliseconds.
pub const DEFAULT_SLIDER_SCALE: u64 = 10;

/// Knobs shared by the simulation controller and the front end.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeConfig {
    pub cell_size: u32,
    pub interval: Duration,
    pub alive_probability: f64,
    pub slider_scale: u64,
    /// Seed for the randomise command. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            slider_scale: DEFAULT_SLIDER_SCALE,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_alive_probability(mut self, probability: f64) -> Self {
        self.alive_probability = probability;
        self
    }

    pub fn with_slider_scale(mut self, scale: u64) -> Self {
        self.slider_scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Converts a speed slider position into a tick interval.
    pub fn slider_interval(&self, slider: u64) -> Duration {
        Duration::from_millis(slider.saturating_mul(self.slider_scale).max(1))
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}
