//! NFL GPP Monte Carlo Simulator Binary
//!
//! A CLI tool for simulating fantasy-point outcome distributions over a
//! player pool and exporting per-player risk/reward metrics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

use gppsim::application::engine::SimulationEngine;
use gppsim::application::ranker;
use gppsim::application::reporting::SimReporter;
use gppsim::config::EngineConfig;
use gppsim::domain::metrics::MetricField;
use gppsim::infrastructure::csv_loader::load_players;

#[derive(Parser)]
#[command(author, version, about = "NFL GPP Monte Carlo Simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run simulations for a player pool CSV and export metrics
    Run {
        /// Players CSV exported from a DFS site
        #[arg(short, long)]
        players: String,

        /// TOML file with engine configuration
        #[arg(long)]
        config: Option<String>,

        /// Number of simulations (1,000 - 100,000)
        #[arg(short = 'n', long)]
        sims: Option<usize>,

        /// Random seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,

        /// Boom threshold as a multiple of projection
        #[arg(long)]
        boom_multiplier: Option<f64>,

        /// Metric for the top-plays table
        #[arg(long, default_value = "boom_score")]
        by: String,

        /// Number of top plays to display
        #[arg(short, long, default_value = "10")]
        top_n: usize,

        /// Output CSV file (default: timestamped name in the current dir)
        #[arg(short, long)]
        output: Option<String>,

        /// Also export metrics as JSON to this file
        #[arg(long)]
        json: Option<String>,
    },
    /// Print the active volatility table and correlation rules
    Rules {
        /// TOML file with engine configuration
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Setup logging
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            players,
            config,
            sims,
            seed,
            boom_multiplier,
            by,
            top_n,
            output,
            json,
        } => {
            let mut config = load_config(config)?;
            if let Some(n) = sims {
                config.simulation.num_simulations = n;
            }
            if let Some(s) = seed {
                config.simulation.seed = s;
            }
            if let Some(multiplier) = boom_multiplier {
                config.simulation.boom_multiplier = multiplier;
            }
            config.simulation.apply_env_overrides();
            config.validate()?;

            let field: MetricField = by.parse()?;
            let engine = SimulationEngine::from_config(&config)?;
            let pool = load_players(Path::new(&players))?;

            let reporter = SimReporter::default();
            reporter.print_header(&players, pool.len(), engine.settings());

            println!(
                "\n🚀 Running {} simulations...",
                config.simulation.num_simulations
            );
            let run = engine.run(&pool)?;

            reporter.print_summary(&run.metrics);
            let top = ranker::top_k(&run.metrics, field, top_n);
            reporter.print_top_table(&top, field);

            let filename = output.unwrap_or_else(|| reporter.default_csv_filename());
            reporter.export_csv(&run.metrics, &filename)?;
            if let Some(json_path) = json {
                reporter.export_json(&run.metrics, &json_path)?;
            }
            println!("✅ Simulation complete!\n");
        }
        Commands::Rules { config } => {
            let config = load_config(config)?;
            config.validate()?;

            let profile = config.volatility_profile()?;
            println!("📋 Volatility by position:");
            for (position, cv) in profile.entries() {
                println!("  {:<5} {:.2}", position.to_string(), cv);
            }

            println!("\n🔗 Correlation rules (most specific wins):");
            for rule in &config.correlation {
                println!("  {}", rule);
            }
        }
    }

    Ok(())
}

/// Loads the engine configuration from a TOML file, or the defaults.
fn load_config(path: Option<String>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading engine config from: {}", path);
            EngineConfig::load_toml(&path)
        }
        None => Ok(EngineConfig::default()),
    }
}
