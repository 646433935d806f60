//! Database module for dicebot
//!
//! Provides persistence for conversation records.

mod schema;

pub use schema::*;

use crate::dialog::{Conversation, DialogState};
use crate::game::Game;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid stored JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Conversation Operations ====================

    /// Get the stored dialog and game, `None` for an unknown id
    pub fn find_conversation(&self, id: &str) -> DbResult<Option<Conversation>> {
        match self.get_conversation(id) {
            Ok(row) => Ok(Some(row.into())),
            Err(DbError::ConversationNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get the full conversation record by ID
    pub fn get_conversation(&self, id: &str) -> DbResult<ConversationRow> {
        let conn = self.conn.lock().unwrap();
        let raw = conn
            .query_row(
                "SELECT id, dialog, game, created_at, updated_at FROM conversations WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id_col, dialog_json, game_json, created_at, updated_at)) = raw else {
            return Err(DbError::ConversationNotFound(id.to_string()));
        };

        let dialog: DialogState = serde_json::from_str(&dialog_json)?;
        let game: Option<Game> = game_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(ConversationRow {
            id: id_col,
            dialog,
            game,
            created_at: parse_datetime(&created_at),
            updated_at: parse_datetime(&updated_at),
        })
    }

    /// Insert or replace the dialog and game for a conversation
    pub fn upsert_conversation(&self, id: &str, conversation: &Conversation) -> DbResult<()> {
        let dialog_json = serde_json::to_string(&conversation.dialog)?;
        let game_json = conversation
            .game
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO conversations (id, dialog, game, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(id) DO UPDATE SET dialog = ?2, game = ?3, updated_at = ?4",
            params![id, dialog_json, game_json, now],
        )?;
        Ok(())
    }

    /// Delete a conversation; `false` if it did not exist
    pub fn delete_conversation(&self, id: &str) -> DbResult<bool> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM conversations WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
