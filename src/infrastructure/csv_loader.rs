//! CSV player-pool loader.
//!
//! Accepts raw DFS-site exports: header names are detected against common
//! spellings so a DraftKings or FanDuel file loads without manual column
//! mapping. The engine itself only ever sees normalized [`Player`] records.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::domain::errors::InputError;
use crate::domain::player::{Player, PlayerPool, Position};

// Candidate order is priority order.
const NAME_HEADERS: &[&str] = &["name", "player", "player name"];
const POSITION_HEADERS: &[&str] = &["position", "pos", "roster position"];
const PROJECTION_HEADERS: &[&str] = &[
    "fpts",
    "projection",
    "points",
    "avg",
    "proj",
    "fp",
    "avgpointspergame",
];
const TEAM_HEADERS: &[&str] = &["team", "teamabbrev", "tm"];
const OPPONENT_HEADERS: &[&str] = &["opponent", "opp"];

/// Loads and validates a player pool from a delimited file.
pub fn load_players(path: &Path) -> Result<PlayerPool> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open player file: {}", path.display()))?;
    let headers = reader
        .headers()
        .context("Player file has no header row")?
        .clone();

    let name_col = require_column(&headers, "name", NAME_HEADERS)?;
    let position_col = require_column(&headers, "position", POSITION_HEADERS)?;
    let projection_col = require_column(&headers, "projection", PROJECTION_HEADERS)?;
    let team_col = find_column(&headers, TEAM_HEADERS);
    let opponent_col = find_column(&headers, OPPONENT_HEADERS);

    let mut players = Vec::new();
    for record in reader.records() {
        let record = record.context("Malformed CSV record in player file")?;

        let name = field(&record, name_col).to_string();

        let raw_position = field(&record, position_col);
        let position = Position::parse(raw_position).ok_or_else(|| InputError::UnknownPosition {
            player: name.clone(),
            value: raw_position.to_string(),
        })?;

        let raw_projection = field(&record, projection_col);
        let projection: f64 =
            raw_projection
                .parse()
                .map_err(|_| InputError::NonNumericProjection {
                    player: name.clone(),
                    value: raw_projection.to_string(),
                })?;

        let team = team_col
            .map(|col| field(&record, col).to_string())
            .unwrap_or_default();
        let opponent = opponent_col
            .map(|col| field(&record, col).to_string())
            .filter(|value| !value.is_empty());

        players.push(Player {
            name,
            position,
            team,
            opponent,
            projection,
        });
    }

    let pool = PlayerPool::new(players)?;
    info!(players = pool.len(), path = %path.display(), "Loaded player pool");
    Ok(pool)
}

fn field<'a>(record: &'a csv::StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("").trim()
}

fn find_column(headers: &csv::StringRecord, candidates: &[&str]) -> Option<usize> {
    for candidate in candidates {
        for (index, header) in headers.iter().enumerate() {
            if header.trim().eq_ignore_ascii_case(candidate) {
                return Some(index);
            }
        }
    }
    None
}

fn require_column(
    headers: &csv::StringRecord,
    field: &'static str,
    candidates: &[&str],
) -> Result<usize, InputError> {
    find_column(headers, candidates).ok_or_else(|| InputError::MissingColumn {
        field,
        tried: candidates.join(", "),
    })
}
