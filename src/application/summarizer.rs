//! Reduces the sample matrix to per-player summary metrics.

use statrs::statistics::{Data, Distribution, OrderStatistics};

use crate::application::sampler::SampleMatrix;
use crate::config::SimulationSettings;
use crate::domain::metrics::PlayerMetrics;
use crate::domain::player::PlayerPool;

/// One metrics row per player, computed strictly from the player's sample
/// column.
///
/// Boom score is the share of samples strictly above the boom threshold
/// (boom multiplier x projection) on a 0-100 scale; bust risk is its exact
/// complement. Consistency is 100 x (1 - std/mean) clamped to [0, 100],
/// defined as 100 for a zero mean. Leverage is filled in a second pass over
/// the field.
pub fn summarize(
    matrix: &SampleMatrix,
    pool: &PlayerPool,
    settings: &SimulationSettings,
) -> Vec<PlayerMetrics> {
    let n = matrix.rows();

    let mut metrics: Vec<PlayerMetrics> = pool
        .players()
        .iter()
        .enumerate()
        .map(|(col, player)| {
            let mut column = Data::new(matrix.column(col));
            let mean = column.mean().unwrap_or(0.0);
            let std_dev = column.std_dev().unwrap_or(0.0);
            let floor = column.quantile(settings.floor_percentile / 100.0);
            let ceiling = column.quantile(settings.ceiling_percentile / 100.0);

            let boom_threshold = settings.boom_multiplier * player.projection;
            let booms = (0..n)
                .filter(|&row| matrix.value(row, col) > boom_threshold)
                .count();
            let boom_score = if n > 0 {
                100.0 * booms as f64 / n as f64
            } else {
                0.0
            };

            let consistency = if mean > 0.0 {
                (100.0 * (1.0 - std_dev / mean)).clamp(0.0, 100.0)
            } else {
                100.0
            };

            PlayerMetrics {
                player: player.name.clone(),
                position: player.position,
                team: player.team.clone(),
                mean,
                std_dev,
                floor,
                ceiling,
                boom_score,
                bust_risk: 100.0 - boom_score,
                leverage: 0.0,
                consistency,
            }
        })
        .collect();

    assign_leverage(&mut metrics);
    metrics
}

/// Percentile rank of each player's ceiling within the field, on a 0-100
/// scale with ties counted half. A single-player field scores a neutral 50.
fn assign_leverage(metrics: &mut [PlayerMetrics]) {
    let count = metrics.len();
    if count <= 1 {
        for row in metrics {
            row.leverage = 50.0;
        }
        return;
    }

    let ceilings: Vec<f64> = metrics.iter().map(|row| row.ceiling).collect();
    for (i, row) in metrics.iter_mut().enumerate() {
        let mut below = 0.0;
        for (j, &ceiling) in ceilings.iter().enumerate() {
            if j == i {
                continue;
            }
            if ceiling < row.ceiling {
                below += 1.0;
            } else if ceiling == row.ceiling {
                below += 0.5;
            }
        }
        row.leverage = 100.0 * below / (count - 1) as f64;
    }
}
