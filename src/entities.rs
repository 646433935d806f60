//! Typed view over upstream recognition results
//!
//! The classifier hands us an intent name and a loose list of `{type, entity}`
//! pairs. Everything downstream works on [`Intent`] and [`TurnEntities`]
//! instead of looking entities up by name.

use crate::game::{valid_count, valid_sides};
use serde::{Deserialize, Serialize};

pub const SIDES_ENTITY: &str = "Sides";
pub const COUNT_ENTITY: &str = "Count";

/// A single entity as produced by the recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub entity: String,
}

impl RecognizedEntity {
    pub fn new(entity_type: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity: entity.into(),
        }
    }
}

/// Raw recognition result for one inbound turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recognition {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub entities: Vec<RecognizedEntity>,
    #[serde(default)]
    pub text: String,
}

/// Intents the dice dialog reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    CreateGame,
    PlayCraps,
    RollAgain,
    Help,
    None,
}

impl Intent {
    pub fn from_name(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Intent::None;
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "creategame" | "newgame" => Intent::CreateGame,
            "playcraps" | "craps" => Intent::PlayCraps,
            "rollagain" | "rolldice" => Intent::RollAgain,
            "help" => Intent::Help,
            _ => Intent::None,
        }
    }

    /// Intents that abandon a pending prompt instead of answering it
    pub fn interrupts_prompt(self) -> bool {
        matches!(self, Intent::CreateGame | Intent::PlayCraps | Intent::Help)
    }
}

/// Entities the dice dialog understands, already validated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnEntities {
    pub sides: Option<u32>,
    pub count: Option<u32>,
}

impl TurnEntities {
    pub fn extract(entities: &[RecognizedEntity]) -> Self {
        let sides = find_entity(entities, SIDES_ENTITY)
            .and_then(|e| parse_sides(&e.entity))
            .filter(|s| valid_sides(*s));
        let count = find_entity(entities, COUNT_ENTITY)
            .and_then(|e| parse_count_word(&e.entity))
            .filter(|c| valid_count(*c));
        Self { sides, count }
    }
}

/// One user turn after typed extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub intent: Intent,
    pub entities: TurnEntities,
    pub text: String,
}

impl Turn {
    pub fn new(intent: Intent, entities: TurnEntities, text: impl Into<String>) -> Self {
        Self {
            intent,
            entities,
            text: text.into(),
        }
    }
}

impl From<&Recognition> for Turn {
    fn from(recognition: &Recognition) -> Self {
        Self {
            intent: Intent::from_name(recognition.intent.as_deref()),
            entities: TurnEntities::extract(&recognition.entities),
            text: recognition.text.clone(),
        }
    }
}

/// First entity of the given type, if any
pub fn find_entity<'a>(entities: &'a [RecognizedEntity], name: &str) -> Option<&'a RecognizedEntity> {
    entities.iter().find(|e| e.entity_type == name)
}

pub fn parse_sides(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// "once" / "twice" / plain integers
pub fn parse_count_word(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("once") {
        Some(1)
    } else if raw.eq_ignore_ascii_case("twice") {
        Some(2)
    } else {
        raw.parse().ok()
    }
}
