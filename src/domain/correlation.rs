use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::ConfigError;
use crate::domain::player::{PlayerPool, Position};

/// Matches a player by position and optional depth-chart rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePattern {
    pub position: Position,
    /// 1-based rank within the player's (team, position) group, highest
    /// projection first. None matches any depth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl fmt::Display for RolePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth {
            Some(depth) => write!(f, "{}{}", self.position, depth),
            None => write!(f, "{}", self.position),
        }
    }
}

/// How the two roles of a rule relate across teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRelation {
    SameTeam,
    Opponents,
}

/// A pairwise correlation between two player roles.
///
/// Rules are unordered: either player of a candidate pair may take either
/// role. A pair matched by no rule is implicitly uncorrelated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRule {
    pub first: RolePattern,
    pub second: RolePattern,
    pub relation: TeamRelation,
    pub coefficient: f64,
}

impl CorrelationRule {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.coefficient.is_finite() || !(-1.0..=1.0).contains(&self.coefficient) {
            return Err(ConfigError::CoefficientOutOfRange {
                rule: self.to_string(),
                value: self.coefficient,
            });
        }
        // A same-team rule whose two roles name the identical exact slot can
        // only ever point at one player; self-correlation is not a rule.
        if self.relation == TeamRelation::SameTeam
            && self.first == self.second
            && self.first.depth.is_some()
        {
            return Err(ConfigError::SelfCorrelation {
                rule: self.to_string(),
            });
        }
        Ok(())
    }

    /// Number of exact depth constraints; higher is more specific.
    fn specificity(&self) -> u8 {
        u8::from(self.first.depth.is_some()) + u8::from(self.second.depth.is_some())
    }
}

impl fmt::Display for CorrelationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self.relation {
            TeamRelation::SameTeam => "same team",
            TeamRelation::Opponents => "opponents",
        };
        write!(
            f,
            "{}-{} ({}, {:+.2})",
            self.first, self.second, relation, self.coefficient
        )
    }
}

/// A matched pair of pool indices with its signed correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationPair {
    pub a: usize,
    pub b: usize,
    pub coefficient: f64,
}

/// Evaluates the configured rule table against a player pool.
#[derive(Debug, Clone, Default)]
pub struct CorrelationModel {
    rules: Vec<CorrelationRule>,
}

impl CorrelationModel {
    pub fn new(rules: Vec<CorrelationRule>) -> Result<Self, ConfigError> {
        for rule in &rules {
            rule.validate()?;
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[CorrelationRule] {
        &self.rules
    }

    /// All correlated pairs in the pool.
    ///
    /// Every unordered candidate pair is evaluated against every rule. When
    /// several rules match the same pair, the most specific wins (exact
    /// depth constraints beat wildcards); equally specific rules resolve in
    /// table order. Self-pairs are never emitted.
    pub fn pairs_for(&self, pool: &PlayerPool) -> Vec<CorrelationPair> {
        let count = pool.len();
        let mut pairs = Vec::new();

        for i in 0..count {
            for j in (i + 1)..count {
                let mut best: Option<(u8, f64)> = None;
                for rule in &self.rules {
                    if !rule_matches(rule, pool, i, j) {
                        continue;
                    }
                    let specificity = rule.specificity();
                    if best.is_none_or(|(s, _)| specificity > s) {
                        best = Some((specificity, rule.coefficient));
                    }
                }
                if let Some((_, coefficient)) = best {
                    pairs.push(CorrelationPair { a: i, b: j, coefficient });
                }
            }
        }
        pairs
    }
}

fn rule_matches(rule: &CorrelationRule, pool: &PlayerPool, i: usize, j: usize) -> bool {
    relation_holds(rule.relation, pool, i, j)
        && ((role_matches(&rule.first, pool, i) && role_matches(&rule.second, pool, j))
            || (role_matches(&rule.first, pool, j) && role_matches(&rule.second, pool, i)))
}

fn role_matches(pattern: &RolePattern, pool: &PlayerPool, index: usize) -> bool {
    let player = &pool.players()[index];
    player.position == pattern.position
        && pattern.depth.is_none_or(|depth| pool.depth_rank(index) == depth)
}

fn relation_holds(relation: TeamRelation, pool: &PlayerPool, i: usize, j: usize) -> bool {
    let a = &pool.players()[i];
    let b = &pool.players()[j];
    match relation {
        TeamRelation::SameTeam => !a.team.is_empty() && a.team == b.team,
        TeamRelation::Opponents => {
            a.team != b.team
                && (a.opponent.as_deref() == Some(b.team.as_str())
                    || b.opponent.as_deref() == Some(a.team.as_str()))
        }
    }
}
