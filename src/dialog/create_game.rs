//! Create-game flow
//!
//! Collects sides then count, prompting only for what the turn's entities did
//! not already supply, and hands the finished game to the play flow.

use super::effect::Effect;
use super::play_game;
use super::state::{ConvContext, Conversation, DialogState, ExpectedInput, ReplyCheck};
use super::transition::TransitionResult;
use crate::entities::{parse_count_word, parse_sides, TurnEntities};
use crate::game::{valid_sides, GameDraft, GameType, DEFAULT_COUNT};
use crate::phrases::PhraseKey;

/// Out-of-range count replies tolerated before the default count applies
pub const MAX_COUNT_ATTEMPTS: u32 = 2;

/// Start a new game; any previous game is discarded
pub(super) fn start(game_type: GameType, entities: &TurnEntities) -> TransitionResult {
    let mut draft = GameDraft::new(game_type);
    draft.sides = entities.sides;
    draft.count = entities.count;
    advance(draft)
}

/// Answer to the sides prompt. Recognized entities win over the raw text.
pub(super) fn resume_sides(
    draft: &GameDraft,
    entities: &TurnEntities,
    reply: &str,
    ctx: &ConvContext,
) -> TransitionResult {
    let mut draft = draft.clone();
    draft.sides = Some(
        entities
            .sides
            .unwrap_or_else(|| sides_from_reply(reply, ctx.default_sides)),
    );
    draft.count = draft.count.or(entities.count);
    advance(draft)
}

/// Answer to the count prompt
pub(super) fn resume_count(
    draft: &GameDraft,
    expected: ExpectedInput,
    attempts: u32,
    entities: &TurnEntities,
    reply: &str,
) -> TransitionResult {
    let mut draft = draft.clone();
    if let Some(count) = entities.count {
        draft.count = Some(count);
        return advance(draft);
    }
    let count = match expected.check(reply) {
        ReplyCheck::OutOfRange if attempts < MAX_COUNT_ATTEMPTS => {
            let state = DialogState::AwaitingCount {
                draft,
                expected,
                attempts: attempts + 1,
            };
            return TransitionResult::new(Conversation::new(state, None))
                .with_effect(Effect::prompt(PhraseKey::CountOutOfRange, expected))
                .with_effect(Effect::PersistState);
        }
        ReplyCheck::OutOfRange => DEFAULT_COUNT,
        ReplyCheck::Valid => count_from_reply(reply),
    };
    draft.count = Some(count);
    advance(draft)
}

/// Run the next unresolved step. Steps whose value is already known are
/// skipped, so re-entry never re-prompts. The previous game is gone for the
/// whole flow.
fn advance(draft: GameDraft) -> TransitionResult {
    if draft.sides.is_none() {
        let expected = ExpectedInput::Number;
        let state = DialogState::AwaitingSides { draft, expected };
        return TransitionResult::new(Conversation::new(state, None))
            .with_effect(Effect::prompt(PhraseKey::ChooseSides, expected))
            .with_effect(Effect::PersistState);
    }

    if draft.count.is_none() {
        let expected = ExpectedInput::count_range();
        let state = DialogState::AwaitingCount {
            draft,
            expected,
            attempts: 1,
        };
        return TransitionResult::new(Conversation::new(state, None))
            .with_effect(Effect::prompt(PhraseKey::ChooseCount, expected))
            .with_effect(Effect::PersistState);
    }

    match draft.resolve() {
        Some(game) => play_game::begin(game, None),
        // Both fields were checked above
        None => TransitionResult::new(Conversation::default()),
    }
}

/// Sides reply, falling back to the configured default
pub fn sides_from_reply(reply: &str, default_sides: u32) -> u32 {
    parse_sides(reply)
        .filter(|s| valid_sides(*s))
        .unwrap_or(default_sides)
}

/// Count reply: "once", "twice", an integer, or the default of one
pub fn count_from_reply(reply: &str) -> u32 {
    parse_count_word(reply).unwrap_or(DEFAULT_COUNT)
}
