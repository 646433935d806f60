//! HTTP API for dicebot

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::db::Database;
use crate::runtime::{ConversationRuntime, DatabaseStorage, RuntimeManager, ThreadRandom};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<RuntimeManager>,
}

impl AppState {
    pub fn new(db: Database, default_sides: u32) -> Self {
        let runtime = ConversationRuntime::new(DatabaseStorage::new(db), ThreadRandom)
            .with_default_sides(default_sides);
        Self {
            runtime: Arc::new(RuntimeManager::new(runtime)),
        }
    }
}
