// CSV player-pool ingestion
pub mod csv_loader;
