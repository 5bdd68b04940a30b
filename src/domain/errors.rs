use thiserror::Error;

/// Errors raised while validating the player pool, before any simulation
/// work begins. No partial runs: the first offending record aborts the load.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Player pool is empty")]
    EmptyPool,

    #[error("Duplicate player name: {name}")]
    DuplicatePlayer { name: String },

    #[error("Invalid projection for {player}: {value} (must be finite and non-negative)")]
    InvalidProjection { player: String, value: f64 },

    #[error("Non-numeric projection for {player}: '{value}'")]
    NonNumericProjection { player: String, value: String },

    #[error("Unknown position for {player}: '{value}'")]
    UnknownPosition { player: String, value: String },

    #[error("Missing required column '{field}' (tried: {tried})")]
    MissingColumn { field: &'static str, tried: String },
}

/// Errors raised at configuration-validation time, never mid-run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Simulation count {value} outside allowed range {min}-{max}")]
    SimulationCountOutOfRange {
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("Correlation coefficient {value} outside [-1, 1] for rule {rule}")]
    CoefficientOutOfRange { rule: String, value: f64 },

    #[error("Correlation rule {rule} can only match a player with itself")]
    SelfCorrelation { rule: String },

    #[error("Volatility for {position} must be positive, got {value}")]
    NonPositiveVolatility { position: String, value: f64 },

    #[error("Volatility table has no FLEX fallback entry")]
    MissingFallbackVolatility,

    #[error("Percentile cutoff {value} outside [0, 100]")]
    PercentileOutOfRange { value: f64 },

    #[error("Floor percentile {floor} must be below ceiling percentile {ceiling}")]
    InvertedPercentiles { floor: f64, ceiling: f64 },

    #[error("Boom multiplier must be positive, got {value}")]
    NonPositiveBoomMultiplier { value: f64 },

    #[error("Chunk size must be positive")]
    ZeroChunkSize,

    #[error("Unknown metric field: '{name}'")]
    UnknownMetric { name: String },
}

/// Errors raised by a running simulation.
///
/// Numeric degeneracy (zero projection, zero variance) is handled locally by
/// the sampler and summarizer and never surfaces here.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Simulation cancelled after {rows_completed} of {requested} samples")]
    Cancelled {
        rows_completed: usize,
        requested: usize,
    },
}
