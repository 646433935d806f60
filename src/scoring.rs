//! Reaction policy for a completed roll
//!
//! Pure and deterministic: the same rolls always yield the same reaction.

use crate::game::GameType;
use serde::{Deserialize, Serialize};

const BAD_SCORE: f64 = 0.3;
const GOOD_SCORE: f64 = 0.8;

/// Qualitative label for how favorable a roll was
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    Best,
    Good,
    Normal,
    Bad,
    Worst,
    CrapsLose,
    CrapsSeven,
    CrapsEleven,
    CrapsRetry,
}

/// Fraction of the maximum achievable total
#[allow(clippy::cast_precision_loss)]
pub fn score(total: u64, sides: u32, count: u32) -> f64 {
    let max = u64::from(sides) * u64::from(count);
    if max == 0 {
        return 0.0;
    }
    total as f64 / max as f64
}

pub fn react(game_type: GameType, rolls: &[u32], sides: u32, count: u32) -> Reaction {
    let total: u64 = rolls.iter().copied().map(u64::from).sum();
    match game_type {
        GameType::Craps => craps_reaction(total),
        GameType::Custom => score_reaction(total, sides, count),
    }
}

fn score_reaction(total: u64, sides: u32, count: u32) -> Reaction {
    let max = u64::from(sides) * u64::from(count);
    if total == max {
        return Reaction::Best;
    }
    if total == 0 {
        return Reaction::Worst;
    }
    let score = score(total, sides, count);
    if score <= BAD_SCORE {
        Reaction::Bad
    } else if score >= GOOD_SCORE {
        Reaction::Good
    } else {
        Reaction::Normal
    }
}

fn craps_reaction(total: u64) -> Reaction {
    match total {
        2 | 3 | 12 => Reaction::CrapsLose,
        7 => Reaction::CrapsSeven,
        11 => Reaction::CrapsEleven,
        _ => Reaction::CrapsRetry,
    }
}
