//! Reporting utilities for simulation results.
//!
//! Provides formatted console output plus CSV and JSON export.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;

use crate::config::SimulationSettings;
use crate::domain::metrics::{MetricField, PlayerMetrics};

/// Fixed export column order.
const CSV_COLUMNS: [&str; 11] = [
    "player",
    "position",
    "team",
    "mean",
    "std_dev",
    "floor",
    "ceiling",
    "boom_score",
    "bust_risk",
    "leverage",
    "consistency",
];

/// Reporter for simulation results output.
pub struct SimReporter {
    output_dir: String,
}

impl SimReporter {
    /// Creates a new reporter with the given output directory.
    pub fn new(output_dir: &str) -> Self {
        Self {
            output_dir: output_dir.to_string(),
        }
    }

    /// Prints the header banner for the simulation run.
    pub fn print_header(&self, source: &str, players: usize, settings: &SimulationSettings) {
        println!("{}", "=".repeat(80));
        println!("🏈 NFL GPP MONTE CARLO SIMULATOR");
        println!("{}", "=".repeat(80));
        println!("Source:        {}", source);
        println!("Players:       {}", players);
        println!("Simulations:   {}", settings.num_simulations);
        println!("Seed:          {}", settings.seed);
        println!("Boom:          {:.2}x projection", settings.boom_multiplier);
        println!(
            "Percentiles:   {:.0}/{:.0}",
            settings.floor_percentile, settings.ceiling_percentile
        );
        println!("{}", "=".repeat(80));
    }

    /// Prints field-wide aggregates.
    pub fn print_summary(&self, metrics: &[PlayerMetrics]) {
        if metrics.is_empty() {
            return;
        }
        let count = metrics.len() as f64;
        let avg_boom = metrics.iter().map(|m| m.boom_score).sum::<f64>() / count;
        let avg_consistency = metrics.iter().map(|m| m.consistency).sum::<f64>() / count;

        println!("\n📊 Players analyzed: {}", metrics.len());
        println!("   Avg boom score:  {:.1}", avg_boom);
        println!("   Avg consistency: {:.1}%", avg_consistency);
    }

    /// Prints a formatted table of the top rows.
    pub fn print_top_table(&self, rows: &[PlayerMetrics], field: MetricField) {
        println!("\n🎯 Top {} by {}", rows.len(), field.label());
        println!("{}", "-".repeat(80));
        println!(
            "{:<4} | {:<22} | {:<4} | {:>7} | {:>7} | {:>7} | {:>6} | {:>7}",
            "#", "Player", "Pos", "Mean", "Ceiling", "Boom", "Lev", "Consist"
        );
        println!("{}", "-".repeat(80));

        for (i, row) in rows.iter().enumerate() {
            println!(
                "{:<4} | {:<22} | {:<4} | {:>7.2} | {:>7.2} | {:>7.1} | {:>6.1} | {:>7.1}",
                i + 1,
                row.player,
                row.position.to_string(),
                row.mean,
                row.ceiling,
                row.boom_score,
                row.leverage,
                row.consistency
            );
        }

        println!("{}", "-".repeat(80));
    }

    /// Exports the metrics table to a CSV file, two decimal places per
    /// numeric column, and returns the written path.
    pub fn export_csv(&self, metrics: &[PlayerMetrics], filename: &str) -> Result<String> {
        let output_path = self.resolve_path(filename);
        if let Some(parent) = Path::new(&output_path).parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {:?}", parent))?;
        }

        let mut writer = csv::Writer::from_path(&output_path)
            .context(format!("Failed to create output file: {}", output_path))?;
        writer
            .write_record(CSV_COLUMNS)
            .context("Failed to write CSV header")?;

        for row in metrics {
            writer
                .write_record(&[
                    row.player.clone(),
                    row.position.to_string(),
                    row.team.clone(),
                    format!("{:.2}", row.mean),
                    format!("{:.2}", row.std_dev),
                    format!("{:.2}", row.floor),
                    format!("{:.2}", row.ceiling),
                    format!("{:.2}", row.boom_score),
                    format!("{:.2}", row.bust_risk),
                    format!("{:.2}", row.leverage),
                    format!("{:.2}", row.consistency),
                ])
                .context("Failed to write metrics row")?;
        }
        writer.flush().context("Failed to flush CSV output")?;

        println!("💾 Results saved to: {}", output_path);
        Ok(output_path)
    }

    /// Exports the metrics table to a JSON file.
    pub fn export_json(&self, metrics: &[PlayerMetrics], filename: &str) -> Result<String> {
        let output_path = self.resolve_path(filename);
        if let Some(parent) = Path::new(&output_path).parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {:?}", parent))?;
        }

        let json_output = serde_json::to_string_pretty(metrics)
            .context("Failed to serialize metrics to JSON")?;
        std::fs::write(&output_path, json_output)
            .context(format!("Failed to write metrics to {}", output_path))?;

        println!("💾 Results saved to: {}", output_path);
        Ok(output_path)
    }

    /// Timestamped default export filename.
    pub fn default_csv_filename(&self) -> String {
        format!(
            "nfl_gpp_sim_results_{}.csv",
            Local::now().format("%Y%m%d_%H%M")
        )
    }

    fn resolve_path(&self, filename: &str) -> String {
        if filename.contains('/') || filename.contains('\\') {
            filename.to_string()
        } else {
            format!("{}/{}", self.output_dir, filename)
        }
    }
}

impl Default for SimReporter {
    fn default() -> Self {
        Self::new(".")
    }
}
