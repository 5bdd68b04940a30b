//! Ordering of metric rows for reporting.

use crate::domain::metrics::{MetricField, PlayerMetrics};

/// Top-k metric rows, stably sorted descending on `field`, ties broken
/// ascending by player name for determinism. A `k` larger than the pool
/// clamps to the pool size.
pub fn top_k(metrics: &[PlayerMetrics], field: MetricField, k: usize) -> Vec<PlayerMetrics> {
    let mut ranked = metrics.to_vec();
    ranked.sort_by(|a, b| {
        field
            .value(b)
            .partial_cmp(&field.value(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.player.cmp(&b.player))
    });
    ranked.truncate(k);
    ranked
}
