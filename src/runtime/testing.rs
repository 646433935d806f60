//! Mock implementations for testing
//!
//! These mocks enable integration testing without real I/O.

use super::traits::*;
use crate::dialog::Conversation;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

// ============================================================================
// In-Memory Storage
// ============================================================================

/// In-memory store for testing
#[allow(dead_code)]
pub struct InMemoryStore {
    conversations: Mutex<HashMap<String, Conversation>>,
    /// Number of `get` and `set` calls, for read-once/write-once checks
    pub reads: Mutex<usize>,
    pub writes: Mutex<usize>,
    fail_writes: bool,
}

#[allow(dead_code)]
impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            conversations: Mutex::new(HashMap::new()),
            reads: Mutex::new(0),
            writes: Mutex::new(0),
            fail_writes: false,
        }
    }

    /// Store whose writes always fail
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn with_conversation(self, conv_id: &str, conversation: Conversation) -> Self {
        self.conversations
            .lock()
            .unwrap()
            .insert(conv_id.to_string(), conversation);
        self
    }

    /// Get current conversation without counting a read
    pub fn snapshot(&self, conv_id: &str) -> Option<Conversation> {
        self.conversations.lock().unwrap().get(conv_id).cloned()
    }

    pub fn counts(&self) -> (usize, usize) {
        (*self.reads.lock().unwrap(), *self.writes.lock().unwrap())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn get(&self, conv_id: &str) -> Result<Option<Conversation>, String> {
        *self.reads.lock().unwrap() += 1;
        Ok(self.snapshot(conv_id))
    }

    async fn set(&self, conv_id: &str, conversation: &Conversation) -> Result<(), String> {
        *self.writes.lock().unwrap() += 1;
        if self.fail_writes {
            return Err("store unavailable".to_string());
        }
        self.conversations
            .lock()
            .unwrap()
            .insert(conv_id.to_string(), conversation.clone());
        Ok(())
    }
}

// ============================================================================
// Scripted Randomness
// ============================================================================

/// Dice that return queued values; phrase picks always take the first wording
#[allow(dead_code)]
pub struct ScriptedRandom {
    rolls: Mutex<VecDeque<u32>>,
    /// Sides requested for each roll
    pub requested: Mutex<Vec<u32>>,
}

#[allow(dead_code)]
impl ScriptedRandom {
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: Mutex::new(rolls.into_iter().collect()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn queue(&self, rolls: impl IntoIterator<Item = u32>) {
        self.rolls.lock().unwrap().extend(rolls);
    }

    pub fn recorded_sides(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

impl RandomSource for ScriptedRandom {
    /// Falls back to the highest face once the script runs out
    fn roll_die(&self, sides: u32) -> u32 {
        self.requested.lock().unwrap().push(sides);
        self.rolls.lock().unwrap().pop_front().unwrap_or(sides)
    }

    fn pick(&self, _len: usize) -> usize {
        0
    }
}

// ============================================================================
// Test Runtime
// ============================================================================

use crate::entities::{Recognition, RecognizedEntity};
use crate::runtime::{ConversationRuntime, Reply};
use std::sync::Arc;

/// Runtime over in-memory store and scripted dice
pub struct TestRuntime {
    pub runtime: ConversationRuntime<Arc<InMemoryStore>, Arc<ScriptedRandom>>,
    pub store: Arc<InMemoryStore>,
    pub random: Arc<ScriptedRandom>,
}

impl TestRuntime {
    pub fn new(store: InMemoryStore, rolls: impl IntoIterator<Item = u32>) -> Self {
        let store = Arc::new(store);
        let random = Arc::new(ScriptedRandom::new(rolls));
        Self {
            runtime: ConversationRuntime::new(store.clone(), random.clone()),
            store,
            random,
        }
    }

    pub async fn say(
        &self,
        conv_id: &str,
        intent: Option<&str>,
        entities: &[(&str, &str)],
        text: &str,
    ) -> Result<Vec<Reply>, String> {
        let recognition = Recognition {
            intent: intent.map(String::from),
            entities: entities
                .iter()
                .map(|(t, v)| RecognizedEntity::new(*t, *v))
                .collect(),
            text: text.to_string(),
        };
        self.runtime.handle_turn(conv_id, &recognition).await
    }

    pub fn conversation(&self, conv_id: &str) -> Option<Conversation> {
        self.store.snapshot(conv_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{DialogState, ExpectedInput};
    use crate::game::{Game, GameType};
    use crate::phrases::{fallback_text, variants, PhraseKey, HELP_TEXT};
    use crate::runtime::RenderRequest;
    use crate::scoring::Reaction;

    fn card(replies: &[Reply]) -> &RenderRequest {
        replies
            .iter()
            .find_map(|r| match r {
                Reply::Card(card) => Some(card),
                _ => None,
            })
            .expect("expected a result card")
    }

    fn first_wording(key: PhraseKey) -> &'static str {
        variants(key)[0]
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert!(store.get("conv-1").await.unwrap().is_none());

        let conv = Conversation::new(DialogState::Idle, Some(Game::craps()));
        store.set("conv-1", &conv).await.unwrap();
        assert_eq!(store.get("conv-1").await.unwrap(), Some(conv));
        assert_eq!(store.counts(), (2, 1));
    }

    #[tokio::test]
    async fn test_scripted_random() {
        let random = ScriptedRandom::new([3, 4]);
        assert_eq!(random.roll_die(6), 3);
        assert_eq!(random.roll_die(6), 4);
        assert_eq!(random.roll_die(6), 6);
        assert_eq!(random.recorded_sides(), vec![6, 6, 6]);
    }

    /// New conversation with both entities rolls immediately
    #[tokio::test]
    async fn test_entities_build_game_without_prompt() {
        let rt = TestRuntime::new(InMemoryStore::new(), [2, 5]);
        let replies = rt
            .say(
                "conv",
                Some("CreateGame"),
                &[("Sides", "6"), ("Count", "2")],
                "roll 2 six sided dice",
            )
            .await
            .unwrap();

        assert_eq!(replies.len(), 1);
        let card = card(&replies);
        assert_eq!(card.title, "2 . 5");
        assert_eq!(card.subtitle, "2 6-sided dice");
        assert_eq!(card.actions, vec!["roll again", "new game"]);
        // 7 / 12 is an ordinary roll; first turn gets the intro
        assert_eq!(
            card.spoken_text,
            format!(
                "{} {}",
                first_wording(PhraseKey::Intro),
                first_wording(PhraseKey::Reaction(Reaction::Normal))
            )
        );
        assert_eq!(rt.random.recorded_sides(), vec![6, 6]);

        let stored = rt.conversation("conv").unwrap();
        assert_eq!(stored.dialog, DialogState::Idle);
        let game = stored.game.unwrap();
        assert_eq!(game.sides, 6);
        assert_eq!(game.count, 2);
        assert_eq!(game.turn, 1);
        assert_eq!(game.game_type, GameType::Custom);

        assert_eq!(rt.store.counts(), (1, 1));
    }

    /// Existing game is replayed without re-entering creation
    #[tokio::test]
    async fn test_roll_again_uses_stored_game() {
        let mut game = Game::new(GameType::Custom, 6, 2);
        game.turn = 3;
        let store =
            InMemoryStore::new().with_conversation("conv", Conversation::new(DialogState::Idle, Some(game)));
        let rt = TestRuntime::new(store, [1, 1]);

        let replies = rt.say("conv", Some("RollAgain"), &[], "roll again").await.unwrap();

        assert!(!replies.iter().any(|r| matches!(r, Reply::Prompt { .. })));
        let card = card(&replies);
        assert_eq!(card.title, "1 . 1");
        // Not the first turn: reaction only
        assert_eq!(card.spoken_text, first_wording(PhraseKey::Reaction(Reaction::Bad)));
        assert_eq!(rt.conversation("conv").unwrap().game.unwrap().turn, 4);
    }

    /// Sides and count collected over three turns
    #[tokio::test]
    async fn test_multi_turn_creation() {
        let rt = TestRuntime::new(InMemoryStore::new(), [4, 4, 4]);

        let replies = rt.say("conv", Some("CreateGame"), &[], "new game").await.unwrap();
        assert_eq!(
            replies,
            vec![Reply::Prompt {
                text: first_wording(PhraseKey::ChooseSides).to_string(),
                expected: ExpectedInput::Number,
            }]
        );
        assert!(matches!(
            rt.conversation("conv").unwrap().dialog,
            DialogState::AwaitingSides { .. }
        ));

        let replies = rt.say("conv", None, &[], "8").await.unwrap();
        assert_eq!(
            replies,
            vec![Reply::Prompt {
                text: first_wording(PhraseKey::ChooseCount).to_string(),
                expected: ExpectedInput::count_range(),
            }]
        );

        let replies = rt.say("conv", None, &[], "3").await.unwrap();
        assert_eq!(card(&replies).title, "4 . 4 . 4");
        assert_eq!(rt.random.recorded_sides(), vec![8, 8, 8]);

        let game = rt.conversation("conv").unwrap().game.unwrap();
        assert_eq!((game.sides, game.count, game.turn), (8, 3, 1));
        // One read and one write per turn
        assert_eq!(rt.store.counts(), (3, 3));
    }

    #[tokio::test]
    async fn test_count_word_reply() {
        let rt = TestRuntime::new(InMemoryStore::new(), [6, 6]);
        rt.say("conv", Some("CreateGame"), &[("Sides", "6")], "roll a die")
            .await
            .unwrap();
        let replies = rt.say("conv", None, &[], "twice").await.unwrap();
        let card = card(&replies);
        assert_eq!(card.title, "6 . 6");
        assert!(card.spoken_text.ends_with(first_wording(PhraseKey::Reaction(Reaction::Best))));
    }

    #[tokio::test]
    async fn test_out_of_range_count_is_reprompted() {
        let rt = TestRuntime::new(InMemoryStore::new(), [2]);
        rt.say("conv", Some("CreateGame"), &[("Sides", "6")], "new game")
            .await
            .unwrap();

        let replies = rt.say("conv", None, &[], "250").await.unwrap();
        assert_eq!(
            replies,
            vec![Reply::Prompt {
                text: first_wording(PhraseKey::CountOutOfRange).to_string(),
                expected: ExpectedInput::count_range(),
            }]
        );

        let replies = rt.say("conv", None, &[], "once").await.unwrap();
        assert_eq!(card(&replies).title, "2");
    }

    #[tokio::test]
    async fn test_many_rolls_use_body() {
        let rt = TestRuntime::new(InMemoryStore::new(), [1, 2, 3, 4, 5, 6, 7]);
        let replies = rt
            .say("conv", Some("CreateGame"), &[("Sides", "10"), ("Count", "7")], "")
            .await
            .unwrap();
        let card = card(&replies);
        assert_eq!(card.title, "Rolled 7 dice");
        assert_eq!(card.body.as_deref(), Some("1, 2, 3, 4, 5, 6, 7"));
    }

    #[tokio::test]
    async fn test_craps_round() {
        let rt = TestRuntime::new(InMemoryStore::new(), [5, 6, 3, 4]);

        let replies = rt.say("conv", Some("PlayCraps"), &[], "let's play craps").await.unwrap();
        assert!(card(&replies)
            .spoken_text
            .ends_with(first_wording(PhraseKey::Reaction(Reaction::CrapsEleven))));

        let replies = rt.say("conv", Some("RollAgain"), &[], "roll again").await.unwrap();
        assert_eq!(
            card(&replies).spoken_text,
            first_wording(PhraseKey::Reaction(Reaction::CrapsSeven))
        );

        let game = rt.conversation("conv").unwrap().game.unwrap();
        assert_eq!(game.game_type, GameType::Craps);
        assert_eq!(game.turn, 2);
    }

    #[tokio::test]
    async fn test_help_and_fallback() {
        let rt = TestRuntime::new(InMemoryStore::new(), []);

        let replies = rt.say("conv", None, &[], "what's up").await.unwrap();
        assert_eq!(
            replies,
            vec![Reply::Text {
                text: fallback_text("what's up")
            }]
        );

        let replies = rt.say("conv", Some("Help"), &[], "help").await.unwrap();
        assert_eq!(
            replies,
            vec![Reply::Text {
                text: HELP_TEXT.to_string()
            }]
        );
        // Nothing to persist for either turn
        assert_eq!(rt.store.counts(), (2, 0));
        assert!(rt.conversation("conv").is_none());
    }

    #[tokio::test]
    async fn test_new_game_mid_prompt_restarts() {
        let rt = TestRuntime::new(InMemoryStore::new(), [3]);
        rt.say("conv", Some("CreateGame"), &[], "new game").await.unwrap();
        let replies = rt
            .say("conv", Some("CreateGame"), &[("Sides", "4"), ("Count", "1")], "roll a d4")
            .await
            .unwrap();
        assert_eq!(card(&replies).title, "3");
        assert_eq!(rt.conversation("conv").unwrap().game.unwrap().sides, 4);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let rt = TestRuntime::new(InMemoryStore::failing(), []);
        let result = rt.say("conv", Some("CreateGame"), &[], "new game").await;
        assert_eq!(result, Err("store unavailable".to_string()));
    }

    #[tokio::test]
    async fn test_conversations_are_independent() {
        let rt = TestRuntime::new(InMemoryStore::new(), [1, 2]);
        rt.say("a", Some("CreateGame"), &[], "new game").await.unwrap();
        rt.say("b", Some("CreateGame"), &[("Sides", "6"), ("Count", "2")], "")
            .await
            .unwrap();

        assert!(matches!(
            rt.conversation("a").unwrap().dialog,
            DialogState::AwaitingSides { .. }
        ));
        assert_eq!(rt.conversation("b").unwrap().game.unwrap().turn, 1);
    }
}
