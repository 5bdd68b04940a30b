//! Built-in volatility and correlation tables.
//!
//! These are defaults for a standard NFL slate; a TOML config file can
//! replace either table wholesale without touching engine code.

use std::collections::BTreeMap;

use crate::domain::correlation::{CorrelationRule, RolePattern, TeamRelation};
use crate::domain::player::Position;

/// Default coefficient of variation per position.
///
/// Spreads widen down the table: passing volume is steadier than
/// touchdown-dependent roles, and defenses swing hardest week to week.
pub fn default_volatility_table() -> BTreeMap<Position, f64> {
    BTreeMap::from([
        (Position::Qb, 0.28),
        (Position::Rb, 0.38),
        (Position::Wr, 0.44),
        (Position::Te, 0.48),
        (Position::K, 0.45),
        (Position::Dst, 0.50),
        (Position::Flex, 0.40),
    ])
}

/// Default stack correlations for a standard NFL slate.
pub fn default_correlation_rules() -> Vec<CorrelationRule> {
    vec![
        // Primary stacks: a QB's production flows through his top targets.
        rule(role(Position::Qb, None), role(Position::Wr, Some(1)), TeamRelation::SameTeam, 0.45),
        rule(role(Position::Qb, None), role(Position::Wr, None), TeamRelation::SameTeam, 0.30),
        rule(role(Position::Qb, None), role(Position::Te, Some(1)), TeamRelation::SameTeam, 0.32),
        rule(role(Position::Qb, None), role(Position::Rb, Some(1)), TeamRelation::SameTeam, 0.08),
        // Receivers on the same team compete for the same targets.
        rule(role(Position::Wr, Some(1)), role(Position::Wr, Some(2)), TeamRelation::SameTeam, -0.05),
        // Game stacks: shootouts lift both passing games.
        rule(role(Position::Qb, None), role(Position::Qb, None), TeamRelation::Opponents, 0.22),
        // A defense scores when the opposing offense stalls.
        rule(role(Position::Dst, None), role(Position::Qb, None), TeamRelation::Opponents, -0.30),
        // Positive game script feeds both the lead back and the defense.
        rule(role(Position::Dst, None), role(Position::Rb, Some(1)), TeamRelation::SameTeam, 0.20),
    ]
}

fn role(position: Position, depth: Option<u32>) -> RolePattern {
    RolePattern { position, depth }
}

fn rule(
    first: RolePattern,
    second: RolePattern,
    relation: TeamRelation,
    coefficient: f64,
) -> CorrelationRule {
    CorrelationRule {
        first,
        second,
        relation,
        coefficient,
    }
}
