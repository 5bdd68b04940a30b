use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::domain::errors::InputError;

/// Roster position of a fantasy player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Qb,
    Rb,
    Wr,
    Te,
    Dst,
    K,
    /// Catch-all for flex and otherwise unclassified roster slots. Also the
    /// fallback key of the volatility table.
    Flex,
}

impl Position {
    /// Parses a position token, accepting the common DFS-export spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Qb),
            "RB" => Some(Position::Rb),
            "WR" => Some(Position::Wr),
            "TE" => Some(Position::Te),
            "DST" | "D/ST" | "DEF" | "D" => Some(Position::Dst),
            "K" | "PK" => Some(Position::K),
            "FLEX" | "OTHER" => Some(Position::Flex),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Qb => write!(f, "QB"),
            Position::Rb => write!(f, "RB"),
            Position::Wr => write!(f, "WR"),
            Position::Te => write!(f, "TE"),
            Position::Dst => write!(f, "DST"),
            Position::K => write!(f, "K"),
            Position::Flex => write!(f, "FLEX"),
        }
    }
}

/// A fantasy player with a point projection. Immutable once the pool is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub team: String,
    pub opponent: Option<String>,
    /// Expected fantasy points, non-negative.
    pub projection: f64,
}

/// The validated player pool for one simulation run.
///
/// Construction rejects malformed input (empty pool, duplicate names,
/// negative or non-finite projections) so every later stage can assume a
/// well-formed pool. Depth-chart ranks within each (team, position) group
/// are precomputed for role-specific correlation rules.
#[derive(Debug, Clone)]
pub struct PlayerPool {
    players: Vec<Player>,
    depth_ranks: Vec<u32>,
}

impl PlayerPool {
    pub fn new(players: Vec<Player>) -> Result<Self, InputError> {
        if players.is_empty() {
            return Err(InputError::EmptyPool);
        }

        let mut seen = HashSet::new();
        for player in &players {
            if !player.projection.is_finite() || player.projection < 0.0 {
                return Err(InputError::InvalidProjection {
                    player: player.name.clone(),
                    value: player.projection,
                });
            }
            if !seen.insert(player.name.as_str()) {
                return Err(InputError::DuplicatePlayer {
                    name: player.name.clone(),
                });
            }
        }

        let depth_ranks = Self::compute_depth_ranks(&players);
        Ok(Self {
            players,
            depth_ranks,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// 1-based rank of the player within its (team, position) group, highest
    /// projection first; ties broken by name for determinism.
    pub fn depth_rank(&self, index: usize) -> u32 {
        self.depth_ranks[index]
    }

    fn compute_depth_ranks(players: &[Player]) -> Vec<u32> {
        let mut groups: HashMap<(&str, Position), Vec<usize>> = HashMap::new();
        for (index, player) in players.iter().enumerate() {
            groups
                .entry((player.team.as_str(), player.position))
                .or_default()
                .push(index);
        }

        let mut ranks = vec![1u32; players.len()];
        for indices in groups.values_mut() {
            indices.sort_by(|&a, &b| {
                players[b]
                    .projection
                    .partial_cmp(&players[a].projection)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| players[a].name.cmp(&players[b].name))
            });
            for (rank, &index) in indices.iter().enumerate() {
                ranks[index] = rank as u32 + 1;
            }
        }
        ranks
    }
}
