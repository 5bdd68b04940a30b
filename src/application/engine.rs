//! Pipeline orchestration: volatility -> correlation -> sampler -> summarizer.

use tracing::info;

use crate::application::sampler::{self, SampleMatrix};
use crate::application::summarizer;
use crate::config::{EngineConfig, SimulationSettings};
use crate::domain::correlation::CorrelationModel;
use crate::domain::errors::{ConfigError, SimulationError};
use crate::domain::metrics::PlayerMetrics;
use crate::domain::player::PlayerPool;
use crate::domain::volatility::VolatilityProfile;

/// One completed simulation invocation: the settings that produced it, the
/// realized sample matrix, and the metrics derived from it. Held only for
/// the duration of one run; nothing carries over between invocations.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub settings: SimulationSettings,
    pub matrix: SampleMatrix,
    pub metrics: Vec<PlayerMetrics>,
}

/// The outcome-simulation pipeline, a pure function of pool and
/// configuration.
pub struct SimulationEngine {
    settings: SimulationSettings,
    volatility: VolatilityProfile,
    correlation: CorrelationModel,
}

impl SimulationEngine {
    /// Builds the engine from a configuration, validating every surface.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.simulation.validate()?;
        let volatility = config.volatility_profile()?;
        let correlation = CorrelationModel::new(config.correlation.clone())?;

        Ok(Self {
            settings: config.simulation.clone(),
            volatility,
            correlation,
        })
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    pub fn run(&self, pool: &PlayerPool) -> Result<SimulationRun, SimulationError> {
        self.run_with_cancel(pool, || false)
    }

    /// Runs the pipeline, checking `cancel` between sampling chunks.
    pub fn run_with_cancel(
        &self,
        pool: &PlayerPool,
        cancel: impl Fn() -> bool,
    ) -> Result<SimulationRun, SimulationError> {
        let pairs = self.correlation.pairs_for(pool);
        info!(
            players = pool.len(),
            simulations = self.settings.num_simulations,
            correlated_pairs = pairs.len(),
            seed = self.settings.seed,
            "Running outcome simulation"
        );

        let matrix =
            sampler::simulate_with_cancel(pool, &self.volatility, &pairs, &self.settings, cancel)?;
        let metrics = summarizer::summarize(&matrix, pool, &self.settings);

        Ok(SimulationRun {
            settings: self.settings.clone(),
            matrix,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::player::{Player, Position};

    fn pool() -> PlayerPool {
        PlayerPool::new(vec![
            Player {
                name: "QB One".to_string(),
                position: Position::Qb,
                team: "KC".to_string(),
                opponent: Some("BUF".to_string()),
                projection: 20.0,
            },
            Player {
                name: "WR One".to_string(),
                position: Position::Wr,
                team: "KC".to_string(),
                opponent: Some("BUF".to_string()),
                projection: 15.0,
            },
        ])
        .unwrap()
    }

    fn config(n: usize, seed: u64) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.simulation.num_simulations = n;
        config.simulation.seed = seed;
        config
    }

    #[test]
    fn test_engine_rejects_invalid_settings() {
        let result = SimulationEngine::from_config(&config(10, 1));
        assert!(matches!(
            result,
            Err(ConfigError::SimulationCountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_run_produces_one_metrics_row_per_player() {
        let engine = SimulationEngine::from_config(&config(1_000, 3)).unwrap();
        let run = engine.run(&pool()).unwrap();

        assert_eq!(run.metrics.len(), 2);
        assert_eq!(run.matrix.rows(), 1_000);
        assert_eq!(run.matrix.cols(), 2);
    }

    #[test]
    fn test_runs_are_independent_and_reproducible() {
        let engine = SimulationEngine::from_config(&config(1_000, 9)).unwrap();
        let pool = pool();

        let first = engine.run(&pool).unwrap();
        let second = engine.run(&pool).unwrap();

        assert_eq!(first.matrix, second.matrix);
    }

    #[test]
    fn test_cancelled_run_surfaces_error() {
        let engine = SimulationEngine::from_config(&config(1_000, 9)).unwrap();

        let result = engine.run_with_cancel(&pool(), || true);
        assert!(matches!(result, Err(SimulationError::Cancelled { .. })));
    }
}
