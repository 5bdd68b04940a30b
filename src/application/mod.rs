// Pipeline orchestration
pub mod engine;

// Metric ordering and top-K views
pub mod ranker;

// Console and file reporting
pub mod reporting;

// Joint outcome sampling
pub mod sampler;

// Sample-matrix reduction to per-player metrics
pub mod summarizer;
