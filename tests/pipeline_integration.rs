//! Full pipeline: CSV pool in, metrics CSV out.

use std::path::PathBuf;

use gppsim::application::engine::SimulationEngine;
use gppsim::application::reporting::SimReporter;
use gppsim::config::EngineConfig;
use gppsim::infrastructure::csv_loader::load_players;

fn fixture(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gppsim_it_{}_{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_pool_runs_end_to_end_and_exports() {
    let pool_path = fixture(
        "slate.csv",
        "Name,Position,Team,Opp,FPTS\n\
         Patrick Mahomes,QB,KC,BUF,21.3\n\
         Rashee Rice,WR,KC,BUF,15.2\n\
         Josh Allen,QB,BUF,KC,22.1\n\
         James Cook,RB,BUF,KC,14.4\n\
         Harrison Butker,K,KC,BUF,8.3\n",
    );

    let pool = load_players(&pool_path).unwrap();
    assert_eq!(pool.len(), 5);

    let mut config = EngineConfig::default();
    config.simulation.num_simulations = 2_000;
    config.simulation.seed = 11;
    let engine = SimulationEngine::from_config(&config).unwrap();

    let run = engine.run(&pool).unwrap();
    assert_eq!(run.metrics.len(), 5);

    let out_dir = std::env::temp_dir().join(format!("gppsim_it_out_{}", std::process::id()));
    let reporter = SimReporter::new(out_dir.to_str().unwrap());
    let written = reporter.export_csv(&run.metrics, "metrics.csv").unwrap();

    let content = std::fs::read_to_string(&written).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "player,position,team,mean,std_dev,floor,ceiling,boom_score,bust_risk,leverage,consistency"
    );

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 5);
    for row in rows {
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 11);
        // Numeric columns carry two decimal places.
        for value in &fields[3..] {
            let (_, decimals) = value.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2, "bad precision in {}", value);
            value.parse::<f64>().unwrap();
        }
    }

    std::fs::remove_file(&pool_path).ok();
    std::fs::remove_dir_all(&out_dir).ok();
}

#[test]
fn reloaded_export_matches_metric_values() {
    let pool_path = fixture(
        "two.csv",
        "Name,Position,Team,FPTS\nQB One,QB,KC,20.0\nWR One,WR,KC,15.0\n",
    );

    let pool = load_players(&pool_path).unwrap();
    let mut config = EngineConfig::default();
    config.simulation.num_simulations = 2_000;
    config.simulation.seed = 3;
    let run = SimulationEngine::from_config(&config)
        .unwrap()
        .run(&pool)
        .unwrap();

    let out_dir = std::env::temp_dir().join(format!("gppsim_it_rt_{}", std::process::id()));
    let reporter = SimReporter::new(out_dir.to_str().unwrap());
    let written = reporter.export_csv(&run.metrics, "metrics.csv").unwrap();

    let content = std::fs::read_to_string(&written).unwrap();
    let first_row = content.lines().nth(1).unwrap();
    let fields: Vec<&str> = first_row.split(',').collect();

    assert_eq!(fields[0], "QB One");
    assert_eq!(fields[1], "QB");
    let exported_mean: f64 = fields[3].parse().unwrap();
    assert!((exported_mean - run.metrics[0].mean).abs() < 0.005);

    std::fs::remove_file(&pool_path).ok();
    std::fs::remove_dir_all(&out_dir).ok();
}
