use serde::Serialize;
use std::str::FromStr;

use crate::domain::errors::ConfigError;
use crate::domain::player::Position;

/// Per-player summary statistics derived from the sample matrix.
///
/// Boom score and bust risk are complementary and each lie in [0, 100];
/// leverage and consistency are likewise scaled to [0, 100].
#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub player: String,
    pub position: Position,
    pub team: String,
    pub mean: f64,
    pub std_dev: f64,
    pub floor: f64,
    pub ceiling: f64,
    pub boom_score: f64,
    pub bust_risk: f64,
    pub leverage: f64,
    pub consistency: f64,
}

/// Metric used for ranking and report tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Mean,
    StdDev,
    Floor,
    Ceiling,
    BoomScore,
    BustRisk,
    Leverage,
    Consistency,
}

impl MetricField {
    pub fn value(self, metrics: &PlayerMetrics) -> f64 {
        match self {
            MetricField::Mean => metrics.mean,
            MetricField::StdDev => metrics.std_dev,
            MetricField::Floor => metrics.floor,
            MetricField::Ceiling => metrics.ceiling,
            MetricField::BoomScore => metrics.boom_score,
            MetricField::BustRisk => metrics.bust_risk,
            MetricField::Leverage => metrics.leverage,
            MetricField::Consistency => metrics.consistency,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricField::Mean => "mean",
            MetricField::StdDev => "std_dev",
            MetricField::Floor => "floor",
            MetricField::Ceiling => "ceiling",
            MetricField::BoomScore => "boom_score",
            MetricField::BustRisk => "bust_risk",
            MetricField::Leverage => "leverage",
            MetricField::Consistency => "consistency",
        }
    }
}

impl FromStr for MetricField {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(MetricField::Mean),
            "std" | "std_dev" => Ok(MetricField::StdDev),
            "floor" => Ok(MetricField::Floor),
            "ceiling" => Ok(MetricField::Ceiling),
            "boom" | "boom_score" => Ok(MetricField::BoomScore),
            "bust" | "bust_risk" => Ok(MetricField::BustRisk),
            "leverage" => Ok(MetricField::Leverage),
            "consistency" => Ok(MetricField::Consistency),
            _ => Err(ConfigError::UnknownMetric {
                name: s.to_string(),
            }),
        }
    }
}
