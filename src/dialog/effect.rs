//! Effects produced by state transitions

use super::play_game::ResultCard;
use super::state::ExpectedInput;
use crate::phrases::PhraseKey;
use crate::scoring::Reaction;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask the user for input
    Prompt {
        phrase: PhraseKey,
        expected: ExpectedInput,
    },

    /// Draw `count` dice with `sides` sides; answered with `Event::DiceRolled`
    RollDice { sides: u32, count: u32 },

    /// Present a roll result
    ShowResult {
        card: ResultCard,
        reaction: Reaction,
        spoken: Vec<PhraseKey>,
    },

    /// Plain text reply
    Say { text: String },

    /// Persist the conversation at the end of the turn
    PersistState,
}

impl Effect {
    pub fn prompt(phrase: PhraseKey, expected: ExpectedInput) -> Self {
        Effect::Prompt { phrase, expected }
    }

    pub fn say(text: impl Into<String>) -> Self {
        Effect::Say { text: text.into() }
    }
}
