// Correlation rules and pair matching
pub mod correlation;

// Domain-specific error types
pub mod errors;

// Derived per-player metrics
pub mod metrics;

// Players and the validated pool
pub mod player;

// Position volatility model
pub mod volatility;
