use serde::{Deserialize, Serialize};
use std::env;

use crate::domain::errors::ConfigError;

/// Tunable settings for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Number of joint samples to draw (1,000 - 100,000).
    pub num_simulations: usize,
    /// Seed of the deterministic sample stream.
    pub seed: u64,
    /// Boom threshold as a multiple of the projection.
    pub boom_multiplier: f64,
    /// Percentile reported as the floor.
    pub floor_percentile: f64,
    /// Percentile reported as the ceiling.
    pub ceiling_percentile: f64,
    /// Rows drawn between cancellation checks. Does not affect the sample
    /// stream: rows are drawn in the same order regardless of chunking.
    pub chunk_size: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            num_simulations: 10_000,
            seed: 42,
            boom_multiplier: 1.5,
            floor_percentile: 10.0,
            ceiling_percentile: 90.0,
            chunk_size: 4_096,
        }
    }
}

impl SimulationSettings {
    pub const MIN_SIMULATIONS: usize = 1_000;
    pub const MAX_SIMULATIONS: usize = 100_000;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_simulations < Self::MIN_SIMULATIONS
            || self.num_simulations > Self::MAX_SIMULATIONS
        {
            return Err(ConfigError::SimulationCountOutOfRange {
                value: self.num_simulations,
                min: Self::MIN_SIMULATIONS,
                max: Self::MAX_SIMULATIONS,
            });
        }

        for percentile in [self.floor_percentile, self.ceiling_percentile] {
            if !percentile.is_finite() || !(0.0..=100.0).contains(&percentile) {
                return Err(ConfigError::PercentileOutOfRange { value: percentile });
            }
        }
        if self.floor_percentile >= self.ceiling_percentile {
            return Err(ConfigError::InvertedPercentiles {
                floor: self.floor_percentile,
                ceiling: self.ceiling_percentile,
            });
        }

        if !self.boom_multiplier.is_finite() || self.boom_multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveBoomMultiplier {
                value: self.boom_multiplier,
            });
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }

        Ok(())
    }

    /// Applies GPPSIM_* environment overrides on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = env::var("GPPSIM_SIMULATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.num_simulations = value;
        }

        if let Some(value) = env::var("GPPSIM_SEED").ok().and_then(|v| v.parse().ok()) {
            self.seed = value;
        }
    }
}
