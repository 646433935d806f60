//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::dialog::Conversation;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;

/// Per-conversation storage for dialog state and the current game
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Get the stored conversation, `None` if it has never been written
    async fn get(&self, conv_id: &str) -> Result<Option<Conversation>, String>;

    /// Replace the stored conversation
    async fn set(&self, conv_id: &str, conversation: &Conversation) -> Result<(), String>;
}

/// Source of randomness for dice and phrase selection
pub trait RandomSource: Send + Sync {
    /// Uniform draw in `1..=sides`
    fn roll_die(&self, sides: u32) -> u32;

    /// Uniform index below `len`
    fn pick(&self, len: usize) -> usize;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: GameStore + ?Sized> GameStore for Arc<T> {
    async fn get(&self, conv_id: &str) -> Result<Option<Conversation>, String> {
        (**self).get(conv_id).await
    }

    async fn set(&self, conv_id: &str, conversation: &Conversation) -> Result<(), String> {
        (**self).set(conv_id, conversation).await
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Arc<T> {
    fn roll_die(&self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }

    fn pick(&self, len: usize) -> usize {
        (**self).pick(len)
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

use crate::db::Database;

/// Adapter to use Database as a `GameStore`
#[derive(Clone)]
pub struct DatabaseStorage {
    db: Database,
}

impl DatabaseStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl GameStore for DatabaseStorage {
    async fn get(&self, conv_id: &str) -> Result<Option<Conversation>, String> {
        self.db.find_conversation(conv_id).map_err(|e| e.to_string())
    }

    async fn set(&self, conv_id: &str, conversation: &Conversation) -> Result<(), String> {
        self.db
            .upsert_conversation(conv_id, conversation)
            .map_err(|e| e.to_string())
    }
}

/// Thread-local RNG from `rand`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn roll_die(&self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(1..=sides)
    }

    fn pick(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}
