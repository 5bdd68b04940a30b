use std::collections::BTreeMap;

use crate::domain::errors::ConfigError;
use crate::domain::player::{Player, Position};

/// Position-keyed coefficient-of-variation table sizing each player's
/// outcome spread.
///
/// The model is total: an exact position match wins, and any position
/// missing from the table resolves to the FLEX entry, which is required at
/// construction time.
#[derive(Debug, Clone)]
pub struct VolatilityProfile {
    table: BTreeMap<Position, f64>,
    fallback: f64,
}

impl VolatilityProfile {
    pub fn new(table: BTreeMap<Position, f64>) -> Result<Self, ConfigError> {
        for (position, cv) in &table {
            if !cv.is_finite() || *cv <= 0.0 {
                return Err(ConfigError::NonPositiveVolatility {
                    position: position.to_string(),
                    value: *cv,
                });
            }
        }

        let fallback = *table
            .get(&Position::Flex)
            .ok_or(ConfigError::MissingFallbackVolatility)?;

        Ok(Self { table, fallback })
    }

    /// Coefficient of variation for the player's outcome distribution.
    pub fn spread_for(&self, player: &Player) -> f64 {
        self.table
            .get(&player.position)
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Position, &f64)> {
        self.table.iter()
    }
}
