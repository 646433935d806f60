//! Startup configuration from the environment

use crate::game::{DEFAULT_SIDES, MIN_SIDES};

pub const DEFAULT_PORT: u16 = 3978;

/// Bot configuration, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub db_path: String,
    pub port: u16,
    /// Sides used when the sides reply cannot be understood
    pub default_sides: u32,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparseable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("DICEBOT_DB_PATH").unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
            format!("{home}/.dicebot/dicebot.db")
        });

        let port = lookup("DICEBOT_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let default_sides = lookup("DICEBOT_DEFAULT_SIDES")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&s| s >= MIN_SIDES)
            .unwrap_or(DEFAULT_SIDES);

        Self {
            db_path,
            port,
            default_sides,
        }
    }
}
