//! Configuration surface of the simulation engine.
//!
//! Every tuning knob — simulation settings, the volatility-by-position
//! table, and the correlation rule table — is externally supplied: loaded
//! from TOML, overridable from the environment, and validated before any
//! simulation work begins. The built-in tables are defaults, not constants
//! baked into engine code.

mod simulation_settings;
mod tables;

pub use simulation_settings::SimulationSettings;
pub use tables::{default_correlation_rules, default_volatility_table};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::correlation::CorrelationRule;
use crate::domain::errors::ConfigError;
use crate::domain::player::Position;
use crate::domain::volatility::VolatilityProfile;

/// Full engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub simulation: SimulationSettings,
    /// Coefficient of variation per position; the FLEX entry is the
    /// documented fallback for unmatched positions.
    pub volatility: BTreeMap<Position, f64>,
    /// Pairwise correlation rules; the most specific match wins per pair.
    pub correlation: Vec<CorrelationRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationSettings::default(),
            volatility: default_volatility_table(),
            correlation: default_correlation_rules(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file. Missing sections keep their
    /// defaults.
    pub fn load_toml(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;
        let config: EngineConfig =
            toml::from_str(&content).context(format!("Failed to parse config TOML: {}", path))?;
        Ok(config)
    }

    /// Validates the whole surface. Rejections happen here, at
    /// configuration time, never mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.volatility_profile()?;
        for rule in &self.correlation {
            rule.validate()?;
        }
        Ok(())
    }

    /// Builds the volatility model from the configured table.
    pub fn volatility_profile(&self) -> Result<VolatilityProfile, ConfigError> {
        VolatilityProfile::new(self.volatility.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.simulation.num_simulations, config.simulation.num_simulations);
        assert_eq!(parsed.volatility, config.volatility);
        assert_eq!(parsed.correlation, config.correlation);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: EngineConfig = toml::from_str(
            r#"
            [simulation]
            num_simulations = 25000
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(parsed.simulation.num_simulations, 25_000);
        assert_eq!(parsed.simulation.seed, 7);
        assert_eq!(parsed.simulation.boom_multiplier, 1.5);
        assert_eq!(parsed.volatility, default_volatility_table());
    }

    #[test]
    fn test_invalid_coefficient_rejected_at_validation() {
        let mut config = EngineConfig::default();
        config.correlation[0].coefficient = -1.5;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::CoefficientOutOfRange { .. })
        ));
    }

    #[test]
    fn test_volatility_table_parses_position_keys() {
        let parsed: EngineConfig = toml::from_str(
            r#"
            [volatility]
            QB = 0.25
            FLEX = 0.40
            "#,
        )
        .unwrap();

        assert_eq!(parsed.volatility.get(&Position::Qb), Some(&0.25));
        assert_eq!(parsed.volatility.len(), 2);
    }
}
