//! Dialog state types

use crate::entities::parse_count_word;
use crate::game::{Game, GameDraft, DEFAULT_SIDES, MAX_COUNT, MIN_COUNT};
use serde::{Deserialize, Serialize};

/// Shape a pending prompt expects the next reply to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpectedInput {
    /// Any reply; conversion and fallback happen in the flow
    Number,
    /// Numeric replies outside the range are rejected
    BoundedNumber { min: u32, max: u32 },
}

impl ExpectedInput {
    pub fn count_range() -> Self {
        ExpectedInput::BoundedNumber {
            min: MIN_COUNT,
            max: MAX_COUNT,
        }
    }

    pub fn check(&self, reply: &str) -> ReplyCheck {
        match self {
            ExpectedInput::Number => ReplyCheck::Valid,
            ExpectedInput::BoundedNumber { min, max } => match parse_count_word(reply) {
                Some(n) if !(*min..=*max).contains(&n) => ReplyCheck::OutOfRange,
                // Non-numeric replies are normalized later
                _ => ReplyCheck::Valid,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCheck {
    Valid,
    OutOfRange,
}

/// Where the dice dialog stands between turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogState {
    /// No pending prompt
    #[default]
    Idle,

    /// Waiting for the number of sides
    AwaitingSides {
        draft: GameDraft,
        expected: ExpectedInput,
    },

    /// Waiting for the number of dice
    AwaitingCount {
        draft: GameDraft,
        expected: ExpectedInput,
        /// Prompts issued so far, including the first
        attempts: u32,
    },

    /// Dice requested, waiting for the results within the same turn
    Rolling { game: Game },
}

impl DialogState {
    /// Check if a prompt is waiting for the user
    pub fn is_awaiting_input(&self) -> bool {
        matches!(
            self,
            DialogState::AwaitingSides { .. } | DialogState::AwaitingCount { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            DialogState::Idle => "idle",
            DialogState::AwaitingSides { .. } => "awaiting_sides",
            DialogState::AwaitingCount { .. } => "awaiting_count",
            DialogState::Rolling { .. } => "rolling",
        }
    }
}

/// Everything persisted for one conversation
///
/// `dialog` holds the in-flight prompt and partial game; `game` is the last
/// resolved game, which survives across turns for "roll again".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Conversation {
    #[serde(default)]
    pub dialog: DialogState,
    #[serde(default)]
    pub game: Option<Game>,
}

impl Conversation {
    pub fn new(dialog: DialogState, game: Option<Game>) -> Self {
        Self { dialog, game }
    }
}

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    pub conversation_id: String,
    /// Used when the sides reply is not a usable number
    pub default_sides: u32,
}

impl ConvContext {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            default_sides: DEFAULT_SIDES,
        }
    }

    pub fn with_default_sides(mut self, sides: u32) -> Self {
        self.default_sides = sides;
        self
    }
}
