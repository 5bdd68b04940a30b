//! Joint outcome sampler.
//!
//! Each player's marginal is a normal distribution with mean equal to the
//! projection and standard deviation sized by the position's coefficient of
//! variation, truncated at zero. Configured pairwise correlations enter
//! through a covariance matrix whose factor transforms independent standard
//! normals into correlated shocks. The stream is fully determined by the
//! seed: identical inputs reproduce an identical matrix.

use nalgebra::{DMatrix, DVector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use crate::config::SimulationSettings;
use crate::domain::correlation::CorrelationPair;
use crate::domain::errors::SimulationError;
use crate::domain::player::PlayerPool;
use crate::domain::volatility::VolatilityProfile;

/// Row-major N x P matrix of simulated fantasy-point outcomes.
///
/// Owned by a single simulation run and never mutated after sampling
/// completes. All values are non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl SampleMatrix {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.value(row, col)).collect()
    }

    /// Pearson correlation between two player columns (sample estimate,
    /// n-1 normalization). Zero when either column is degenerate.
    pub fn sample_correlation(&self, a: usize, b: usize) -> f64 {
        if self.rows < 2 {
            return 0.0;
        }

        let n = self.rows as f64;
        let mean_a = self.column_mean(a);
        let mean_b = self.column_mean(b);

        let mut cov = 0.0;
        let mut var_a = 0.0;
        let mut var_b = 0.0;
        for row in 0..self.rows {
            let da = self.value(row, a) - mean_a;
            let db = self.value(row, b) - mean_b;
            cov += da * db;
            var_a += da * da;
            var_b += db * db;
        }
        cov /= n - 1.0;
        var_a /= n - 1.0;
        var_b /= n - 1.0;

        let denom = (var_a * var_b).sqrt();
        if denom > 1e-12 { cov / denom } else { 0.0 }
    }

    fn column_mean(&self, col: usize) -> f64 {
        if self.rows == 0 {
            return 0.0;
        }
        (0..self.rows).map(|row| self.value(row, col)).sum::<f64>() / self.rows as f64
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    fn scale_column(&mut self, col: usize, factor: f64) {
        for row in 0..self.rows {
            self.data[row * self.cols + col] *= factor;
        }
    }
}

/// Draws the joint sample matrix for the pool.
pub fn simulate(
    pool: &PlayerPool,
    volatility: &VolatilityProfile,
    pairs: &[CorrelationPair],
    settings: &SimulationSettings,
) -> Result<SampleMatrix, SimulationError> {
    simulate_with_cancel(pool, volatility, pairs, settings, || false)
}

/// Same as [`simulate`], but invokes `cancel` between chunks and aborts the
/// run when it returns true. Chunking never changes the draw order, so the
/// result is bit-identical for any chunk size.
pub fn simulate_with_cancel(
    pool: &PlayerPool,
    volatility: &VolatilityProfile,
    pairs: &[CorrelationPair],
    settings: &SimulationSettings,
    cancel: impl Fn() -> bool,
) -> Result<SampleMatrix, SimulationError> {
    let players = pool.players();
    let total_players = players.len();
    let n = settings.num_simulations;

    let sigmas: Vec<f64> = players
        .iter()
        .map(|player| player.projection * volatility.spread_for(player))
        .collect();

    // Zero-variance players (projection 0) stay out of the joint structure;
    // their columns remain the constant projection.
    let active: Vec<usize> = (0..total_players).filter(|&i| sigmas[i] > 0.0).collect();
    let mut slot_of = vec![None; total_players];
    for (slot, &index) in active.iter().enumerate() {
        slot_of[index] = Some(slot);
    }

    let mut matrix = SampleMatrix::zeros(n, total_players);
    if active.is_empty() {
        return Ok(matrix);
    }

    let transform = covariance_transform(&active, &slot_of, &sigmas, pairs);

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut z = DVector::<f64>::zeros(active.len());
    let chunk = settings.chunk_size.max(1);

    let mut row = 0;
    while row < n {
        if cancel() {
            return Err(SimulationError::Cancelled {
                rows_completed: row,
                requested: n,
            });
        }

        let end = (row + chunk).min(n);
        for r in row..end {
            for slot in 0..active.len() {
                z[slot] = StandardNormal.sample(&mut rng);
            }
            let shock = &transform * &z;
            for (slot, &index) in active.iter().enumerate() {
                let outcome = players[index].projection + shock[slot];
                matrix.set(r, index, outcome.max(0.0));
            }
        }
        debug!(rows = end, total = n, "sampling progress");
        row = end;
    }

    rescale_columns(&mut matrix, pool, &active);
    Ok(matrix)
}

/// Transform L with L * L^T = Sigma over the active players.
///
/// Cholesky when Sigma is positive definite. Inconsistent coefficient
/// combinations can make Sigma indefinite; the fallback clamps the
/// eigenvalues at zero so the draw stays well defined.
fn covariance_transform(
    active: &[usize],
    slot_of: &[Option<usize>],
    sigmas: &[f64],
    pairs: &[CorrelationPair],
) -> DMatrix<f64> {
    let size = active.len();
    let mut cov = DMatrix::<f64>::zeros(size, size);
    for (slot, &index) in active.iter().enumerate() {
        cov[(slot, slot)] = sigmas[index] * sigmas[index];
    }
    for pair in pairs {
        let (Some(slot_a), Some(slot_b)) = (slot_of[pair.a], slot_of[pair.b]) else {
            continue;
        };
        let covariance = pair.coefficient * sigmas[pair.a] * sigmas[pair.b];
        cov[(slot_a, slot_b)] = covariance;
        cov[(slot_b, slot_a)] = covariance;
    }

    match nalgebra::Cholesky::new(cov.clone()) {
        Some(cholesky) => cholesky.l(),
        None => {
            let eigen = nalgebra::SymmetricEigen::new(cov);
            let sqrt_eigenvalues = eigen.eigenvalues.map(|v| v.max(0.0).sqrt());
            &eigen.eigenvectors * DMatrix::from_diagonal(&sqrt_eigenvalues)
        }
    }
}

/// Restores each marginal mean after the zero clamp by scaling the column
/// back onto its projection. Scaling keeps values non-negative and leaves
/// pairwise correlations unchanged.
fn rescale_columns(matrix: &mut SampleMatrix, pool: &PlayerPool, active: &[usize]) {
    for &index in active {
        let target = pool.players()[index].projection;
        let observed = matrix.column_mean(index);
        if observed > 1e-12 {
            matrix.scale_column(index, target / observed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_volatility_table;
    use crate::domain::player::{Player, Position};

    fn pool(projections: &[(&str, Position, f64)]) -> PlayerPool {
        PlayerPool::new(
            projections
                .iter()
                .map(|(name, position, projection)| Player {
                    name: name.to_string(),
                    position: *position,
                    team: "KC".to_string(),
                    opponent: None,
                    projection: *projection,
                })
                .collect(),
        )
        .unwrap()
    }

    fn volatility() -> VolatilityProfile {
        VolatilityProfile::new(default_volatility_table()).unwrap()
    }

    fn settings(n: usize, seed: u64) -> SimulationSettings {
        SimulationSettings {
            num_simulations: n,
            seed,
            ..Default::default()
        }
    }

    #[test]
    fn test_matrix_shape_and_non_negativity() {
        let pool = pool(&[
            ("QB One", Position::Qb, 20.0),
            ("WR One", Position::Wr, 15.0),
        ]);
        let matrix = simulate(&pool, &volatility(), &[], &settings(1_000, 3)).unwrap();

        assert_eq!(matrix.rows(), 1_000);
        assert_eq!(matrix.cols(), 2);
        for row in 0..matrix.rows() {
            for col in 0..matrix.cols() {
                assert!(matrix.value(row, col) >= 0.0);
            }
        }
    }

    #[test]
    fn test_identical_seeds_reproduce_identical_matrices() {
        let pool = pool(&[
            ("QB One", Position::Qb, 20.0),
            ("WR One", Position::Wr, 15.0),
            ("RB One", Position::Rb, 12.0),
        ]);
        let pairs = [CorrelationPair {
            a: 0,
            b: 1,
            coefficient: 0.45,
        }];

        let first = simulate(&pool, &volatility(), &pairs, &settings(2_000, 99)).unwrap();
        let second = simulate(&pool, &volatility(), &pairs, &settings(2_000, 99)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_differ() {
        let pool = pool(&[("QB One", Position::Qb, 20.0)]);

        let first = simulate(&pool, &volatility(), &[], &settings(1_000, 1)).unwrap();
        let second = simulate(&pool, &volatility(), &[], &settings(1_000, 2)).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_chunking_is_bit_identical() {
        let pool = pool(&[
            ("QB One", Position::Qb, 20.0),
            ("WR One", Position::Wr, 15.0),
        ]);
        let mut coarse = settings(2_000, 7);
        coarse.chunk_size = 2_000;
        let mut fine = settings(2_000, 7);
        fine.chunk_size = 17;

        let a = simulate(&pool, &volatility(), &[], &coarse).unwrap();
        let b = simulate(&pool, &volatility(), &[], &fine).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_projection_yields_constant_zero_column() {
        let pool = pool(&[
            ("QB One", Position::Qb, 20.0),
            ("Benched", Position::Wr, 0.0),
        ]);
        let pairs = [CorrelationPair {
            a: 0,
            b: 1,
            coefficient: 0.45,
        }];

        let matrix = simulate(&pool, &volatility(), &pairs, &settings(1_000, 5)).unwrap();

        for row in 0..matrix.rows() {
            assert_eq!(matrix.value(row, 1), 0.0);
        }
    }

    #[test]
    fn test_all_zero_pool_does_not_crash() {
        let pool = pool(&[("A", Position::Wr, 0.0), ("B", Position::Wr, 0.0)]);

        let matrix = simulate(&pool, &volatility(), &[], &settings(1_000, 5)).unwrap();

        assert_eq!(matrix.rows(), 1_000);
        assert_eq!(matrix.value(999, 0), 0.0);
    }

    #[test]
    fn test_positive_correlation_is_recovered() {
        let pool = pool(&[
            ("QB One", Position::Qb, 20.0),
            ("WR One", Position::Wr, 15.0),
        ]);
        let pairs = [CorrelationPair {
            a: 0,
            b: 1,
            coefficient: 0.45,
        }];

        let matrix = simulate(&pool, &volatility(), &pairs, &settings(10_000, 11)).unwrap();

        let measured = matrix.sample_correlation(0, 1);
        assert!(
            (measured - 0.45).abs() < 0.1,
            "measured correlation {} too far from 0.45",
            measured
        );
    }

    #[test]
    fn test_negative_correlation_is_negative() {
        let pool = pool(&[
            ("DST One", Position::Dst, 8.0),
            ("QB Rival", Position::Qb, 20.0),
        ]);
        let pairs = [CorrelationPair {
            a: 0,
            b: 1,
            coefficient: -0.5,
        }];

        let matrix = simulate(&pool, &volatility(), &pairs, &settings(10_000, 11)).unwrap();

        assert!(matrix.sample_correlation(0, 1) < -0.2);
    }

    #[test]
    fn test_column_means_track_projections() {
        let pool = pool(&[
            ("QB One", Position::Qb, 20.0),
            ("WR One", Position::Wr, 15.0),
        ]);

        let matrix = simulate(&pool, &volatility(), &[], &settings(10_000, 23)).unwrap();

        assert!((matrix.column_mean(0) - 20.0).abs() < 0.2);
        assert!((matrix.column_mean(1) - 15.0).abs() < 0.15);
    }

    #[test]
    fn test_cancellation_aborts_between_chunks() {
        let pool = pool(&[("QB One", Position::Qb, 20.0)]);
        let mut settings = settings(10_000, 3);
        settings.chunk_size = 100;

        let result = simulate_with_cancel(&pool, &volatility(), &[], &settings, || true);

        assert!(matches!(
            result,
            Err(SimulationError::Cancelled {
                rows_completed: 0,
                requested: 10_000,
            })
        ));
    }

    #[test]
    fn test_contradictory_coefficients_fall_back_to_clamped_transform() {
        // Three mutually negative correlations near -1 cannot hold at once;
        // the covariance matrix is indefinite and takes the eigen fallback.
        let pool = pool(&[
            ("A", Position::Wr, 10.0),
            ("B", Position::Wr, 10.0),
            ("C", Position::Wr, 10.0),
        ]);
        let pairs = [
            CorrelationPair { a: 0, b: 1, coefficient: -0.9 },
            CorrelationPair { a: 0, b: 2, coefficient: -0.9 },
            CorrelationPair { a: 1, b: 2, coefficient: -0.9 },
        ];

        let matrix = simulate(&pool, &volatility(), &pairs, &settings(2_000, 13)).unwrap();

        assert_eq!(matrix.rows(), 2_000);
        // Still strongly negative pairwise even after clamping.
        assert!(matrix.sample_correlation(0, 1) < -0.2);
    }
}
