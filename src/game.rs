//! Game record persisted per conversation

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest die we will roll
pub const MIN_SIDES: u32 = 2;

/// Fallback when the sides reply cannot be used
pub const DEFAULT_SIDES: u32 = 6;

/// Inclusive bounds for the number of dice rolled in one go
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 100;

/// Fallback when the count reply cannot be used
pub const DEFAULT_COUNT: u32 = 1;

/// Which scoring rules apply to a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[default]
    Custom,
    Craps,
}

/// A fully resolved game, ready to roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "type")]
    pub game_type: GameType,
    pub sides: u32,
    pub count: u32,
    /// Completed rolls for this game
    pub turn: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
}

impl Game {
    pub fn new(game_type: GameType, sides: u32, count: u32) -> Self {
        Self {
            game_type,
            sides,
            count,
            turn: 0,
            debug: None,
        }
    }

    /// Two six-sided dice, scored with the craps table
    pub fn craps() -> Self {
        Self::new(GameType::Craps, 6, 2)
    }

    /// First resolution of a freshly created game
    pub fn is_first_turn(&self) -> bool {
        self.turn == 0
    }
}

/// A game whose parameters are still being collected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GameDraft {
    #[serde(rename = "type")]
    pub game_type: GameType,
    #[serde(default)]
    pub sides: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
}

impl GameDraft {
    pub fn new(game_type: GameType) -> Self {
        Self {
            game_type,
            sides: None,
            count: None,
        }
    }

    /// Build the game once both parameters are known
    pub fn resolve(&self) -> Option<Game> {
        match (self.sides, self.count) {
            (Some(sides), Some(count)) => Some(Game::new(self.game_type, sides, count)),
            _ => None,
        }
    }
}

/// Whether a sides value can be rolled
pub fn valid_sides(sides: u32) -> bool {
    sides >= MIN_SIDES
}

/// Whether a count value is within the accepted range
pub fn valid_count(count: u32) -> bool {
    (MIN_COUNT..=MAX_COUNT).contains(&count)
}
