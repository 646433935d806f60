//! Play-game flow
//!
//! Requests the dice, then turns the results into a reaction and a result
//! card, bumps the turn counter and persists the game.

use super::effect::Effect;
use super::state::{Conversation, DialogState};
use super::transition::{TransitionError, TransitionResult};
use crate::game::Game;
use crate::phrases::PhraseKey;
use crate::scoring::react;

pub const ROLL_AGAIN: &str = "roll again";
pub const NEW_GAME: &str = "new game";

/// Above this many rolls the results move from the title into the body
pub const MAX_ROLLS_IN_TITLE: usize = 5;

/// Render request for a roll result; markup is left to the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub subtitle: String,
    pub body: Option<String>,
    pub actions: Vec<String>,
}

/// Ask for the dice. `keep` is the game stored in the conversation slot
/// while the roll is in flight.
pub(super) fn begin(game: Game, keep: Option<Game>) -> TransitionResult {
    let effect = Effect::RollDice {
        sides: game.sides,
        count: game.count,
    };
    TransitionResult::new(Conversation::new(DialogState::Rolling { game }, keep)).with_effect(effect)
}

/// Score the rolls and re-arm the game for "roll again"
pub(super) fn resolve(game: &Game, rolls: Vec<u32>) -> Result<TransitionResult, TransitionError> {
    if rolls.len() != game.count as usize {
        return Err(TransitionError::InvalidTransition(format!(
            "expected {} rolls, got {}",
            game.count,
            rolls.len()
        )));
    }
    if let Some(bad) = rolls.iter().find(|r| !(1..=game.sides).contains(*r)) {
        return Err(TransitionError::InvalidTransition(format!(
            "roll {bad} outside 1..={}",
            game.sides
        )));
    }

    let reaction = react(game.game_type, &rolls, game.sides, game.count);

    let mut spoken = Vec::with_capacity(2);
    if game.is_first_turn() {
        spoken.push(PhraseKey::Intro);
    }
    spoken.push(PhraseKey::Reaction(reaction));

    let card = render_card(game, &rolls);

    let mut next = game.clone();
    next.turn = next.turn.saturating_add(1);

    Ok(TransitionResult::new(Conversation::new(DialogState::Idle, Some(next)))
        .with_effect(Effect::ShowResult {
            card,
            reaction,
            spoken,
        })
        .with_effect(Effect::PersistState))
}

pub fn render_card(game: &Game, rolls: &[u32]) -> ResultCard {
    let subtitle = if game.count == 1 {
        format!("1 {}-sided die", game.sides)
    } else {
        format!("{} {}-sided dice", game.count, game.sides)
    };

    let (title, body) = if rolls.len() > MAX_ROLLS_IN_TITLE {
        (format!("Rolled {} dice", rolls.len()), Some(join_rolls(rolls, ", ")))
    } else {
        (join_rolls(rolls, " . "), None)
    };

    ResultCard {
        title,
        subtitle,
        body,
        actions: vec![ROLL_AGAIN.to_string(), NEW_GAME.to_string()],
    }
}

fn join_rolls(rolls: &[u32], separator: &str) -> String {
    rolls
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Draw `count` dice, clamping each draw into `1..=sides`
pub fn roll_dice(sides: u32, count: u32, mut draw: impl FnMut(u32) -> u32) -> Vec<u32> {
    (0..count).map(|_| draw(sides).clamp(1, sides)).collect()
}
