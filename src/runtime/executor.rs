//! Turn executor
//!
//! Runs one inbound turn to completion: read the conversation once, feed
//! events through the pure transition, execute effects, write once.

use super::traits::{GameStore, RandomSource};
use super::{RenderRequest, Reply};
use crate::dialog::play_game::roll_dice;
use crate::dialog::{transition, ConvContext, Conversation, Effect, Event};
use crate::entities::{Recognition, Turn};
use crate::game::DEFAULT_SIDES;
use crate::phrases::{compose, variants};

/// Generic runtime that can work with any store and randomness source
pub struct ConversationRuntime<S, R>
where
    S: GameStore,
    R: RandomSource,
{
    store: S,
    random: R,
    default_sides: u32,
}

/// Side effects accumulated while a turn runs
#[derive(Debug, Default)]
struct TurnOutcome {
    replies: Vec<Reply>,
    persist: bool,
}

impl<S, R> ConversationRuntime<S, R>
where
    S: GameStore,
    R: RandomSource,
{
    pub fn new(store: S, random: R) -> Self {
        Self {
            store,
            random,
            default_sides: DEFAULT_SIDES,
        }
    }

    pub fn with_default_sides(mut self, sides: u32) -> Self {
        self.default_sides = sides;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process one user turn and return the replies in order
    pub async fn handle_turn(
        &self,
        conv_id: &str,
        recognition: &Recognition,
    ) -> Result<Vec<Reply>, String> {
        let context = ConvContext::new(conv_id).with_default_sides(self.default_sides);
        let mut conv: Conversation = self.store.get(conv_id).await?.unwrap_or_default();
        let turn = Turn::from(recognition);

        tracing::info!(
            conv_id = %conv_id,
            intent = ?turn.intent,
            state = conv.dialog.name(),
            pending_prompt = conv.dialog.is_awaiting_input(),
            has_game = conv.game.is_some(),
            "Processing turn"
        );

        let mut outcome = TurnOutcome::default();
        // Effects may produce follow-up events (dice results)
        let mut events_to_process = vec![Event::user_turn(turn)];

        while let Some(event) = events_to_process.pop() {
            let result = transition(&conv, &context, event).map_err(|e| {
                tracing::warn!(conv_id = %conv_id, error = %e, "Transition rejected");
                e.to_string()
            })?;

            conv = result.new_state;

            for effect in result.effects {
                if let Some(generated) = self.execute_effect(effect, &mut outcome) {
                    events_to_process.push(generated);
                }
            }
        }

        if outcome.persist {
            self.store.set(conv_id, &conv).await.map_err(|e| {
                tracing::error!(conv_id = %conv_id, error = %e, "Failed to persist conversation");
                e
            })?;
            tracing::debug!(
                conv_id = %conv_id,
                state = conv.dialog.name(),
                turn = conv.game.as_ref().map(|g| g.turn),
                "Conversation persisted"
            );
        }

        Ok(outcome.replies)
    }

    fn execute_effect(&self, effect: Effect, outcome: &mut TurnOutcome) -> Option<Event> {
        match effect {
            Effect::Prompt { phrase, expected } => {
                let options = variants(phrase);
                let text = options[self.random.pick(options.len()).min(options.len() - 1)];
                outcome.replies.push(Reply::Prompt {
                    text: text.to_string(),
                    expected,
                });
                None
            }
            Effect::RollDice { sides, count } => {
                let rolls = roll_dice(sides, count, |s| self.random.roll_die(s));
                tracing::info!(
                    sides,
                    count,
                    rolls = ?rolls,
                    total = rolls.iter().copied().map(u64::from).sum::<u64>(),
                    "Dice rolled"
                );
                Some(Event::DiceRolled { rolls })
            }
            Effect::ShowResult {
                card,
                reaction,
                spoken,
            } => {
                tracing::debug!(reaction = ?reaction, title = %card.title, "Showing result");
                let spoken_text = compose(&spoken, |n| self.random.pick(n));
                outcome.replies.push(Reply::Card(RenderRequest {
                    title: card.title,
                    subtitle: card.subtitle,
                    body: card.body,
                    actions: card.actions,
                    spoken_text,
                }));
                None
            }
            Effect::Say { text } => {
                outcome.replies.push(Reply::Text { text });
                None
            }
            Effect::PersistState => {
                outcome.persist = true;
                None
            }
        }
    }
}
