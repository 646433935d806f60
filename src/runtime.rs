//! Runtime for executing dialog turns
//!
//! Turns of one conversation run strictly one after another; different
//! conversations run concurrently and share nothing but the store.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationRuntime;
pub use traits::*;

use crate::db::DbError;
use crate::dialog::ExpectedInput;
use crate::entities::Recognition;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Type alias for production runtime with concrete implementations
pub type ProductionRuntime = ConversationRuntime<DatabaseStorage, ThreadRandom>;

/// Fields handed to the message-rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub actions: Vec<String>,
    pub spoken_text: String,
}

/// One outbound message for the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Prompt {
        text: String,
        expected: ExpectedInput,
    },
    Card(RenderRequest),
    Text {
        text: String,
    },
}

/// Manager that serializes turns per conversation
pub struct RuntimeManager {
    runtime: ProductionRuntime,
    turn_locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl RuntimeManager {
    pub fn new(runtime: ProductionRuntime) -> Self {
        Self {
            runtime,
            turn_locks: RwLock::new(HashMap::new()),
        }
    }

    /// Run a turn once any earlier turn for the same conversation is done
    pub async fn handle_turn(
        &self,
        conversation_id: &str,
        recognition: &Recognition,
    ) -> Result<Vec<Reply>, String> {
        let lock = self.turn_lock(conversation_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.runtime.handle_turn(conversation_id, recognition).await
        };
        drop(lock);
        self.release_turn_lock(conversation_id).await;
        result
    }

    /// Delete a conversation once any in-flight turn has written its record
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<bool, DbError> {
        let lock = self.turn_lock(conversation_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.db().delete_conversation(conversation_id)
        };
        drop(lock);
        self.release_turn_lock(conversation_id).await;
        result
    }

    async fn turn_lock(&self, conversation_id: &str) -> Arc<Mutex<()>> {
        self.turn_locks
            .write()
            .await
            .entry(conversation_id.to_string())
            .or_default()
            .clone()
    }

    /// Drop the lock entry when no other turn is holding or waiting on it
    async fn release_turn_lock(&self, conversation_id: &str) {
        let mut locks = self.turn_locks.write().await;
        if locks
            .get(conversation_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(conversation_id);
        }
    }

    /// Get the database handle
    pub fn db(&self) -> &crate::db::Database {
        self.runtime.store().inner()
    }

    #[cfg(test)]
    pub async fn tracked_conversations(&self) -> usize {
        self.turn_locks.read().await.len()
    }
}
