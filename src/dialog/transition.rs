//! Pure state transition function
//!
//! Given the same conversation, context and event this always produces the
//! same result. Dice and wording choices are effects, executed by the runtime.

use super::{create_game, play_game, ConvContext, Conversation, DialogState, Effect, Event};
use crate::entities::{Intent, Turn};
use crate::game::{Game, GameType};
use crate::phrases::{fallback_text, PhraseKey, HELP_TEXT};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: Conversation,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: Conversation) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("A roll is already in progress for this conversation")]
    RollInProgress,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
pub fn transition(
    conv: &Conversation,
    ctx: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (&conv.dialog, event) {
        // ============================================================
        // Dice results
        // ============================================================
        (DialogState::Rolling { game }, Event::DiceRolled { rolls }) => {
            play_game::resolve(game, rolls)
        }

        (_, Event::DiceRolled { .. }) => Err(TransitionError::InvalidTransition(format!(
            "dice results while {}",
            conv.dialog.name()
        ))),

        (DialogState::Rolling { .. }, Event::UserTurn { .. }) => {
            Err(TransitionError::RollInProgress)
        }

        // ============================================================
        // Interruptions, valid in every waiting state
        // ============================================================
        (_, Event::UserTurn { turn }) if turn.intent.interrupts_prompt() => {
            Ok(interrupt(conv, &turn))
        }

        // ============================================================
        // Prompt replies
        // ============================================================
        (DialogState::AwaitingSides { draft, .. }, Event::UserTurn { turn }) => {
            Ok(create_game::resume_sides(draft, &turn.entities, &turn.text, ctx))
        }

        (
            DialogState::AwaitingCount {
                draft,
                expected,
                attempts,
            },
            Event::UserTurn { turn },
        ) => Ok(create_game::resume_count(
            draft,
            *expected,
            *attempts,
            &turn.entities,
            &turn.text,
        )),

        // ============================================================
        // Idle
        // ============================================================
        (DialogState::Idle, Event::UserTurn { turn }) => Ok(idle_turn(conv, &turn)),
    }
}

fn interrupt(conv: &Conversation, turn: &Turn) -> TransitionResult {
    match turn.intent {
        Intent::PlayCraps => play_game::begin(Game::craps(), None),
        Intent::Help => help(conv),
        _ => create_game::start(GameType::Custom, &turn.entities),
    }
}

fn idle_turn(conv: &Conversation, turn: &Turn) -> TransitionResult {
    match (turn.intent, &conv.game) {
        (Intent::RollAgain, Some(game)) => play_game::begin(game.clone(), Some(game.clone())),
        (Intent::RollAgain, None) => create_game::start(GameType::Custom, &turn.entities),
        _ => TransitionResult::new(conv.clone()).with_effect(Effect::say(fallback_text(&turn.text))),
    }
}

/// Help never disturbs a pending prompt; the prompt is asked again
fn help(conv: &Conversation) -> TransitionResult {
    let result = TransitionResult::new(conv.clone()).with_effect(Effect::say(HELP_TEXT));
    match &conv.dialog {
        DialogState::AwaitingSides { expected, .. } => {
            result.with_effect(Effect::prompt(PhraseKey::ChooseSides, *expected))
        }
        DialogState::AwaitingCount { expected, .. } => {
            result.with_effect(Effect::prompt(PhraseKey::ChooseCount, *expected))
        }
        DialogState::Idle | DialogState::Rolling { .. } => result,
    }
}
