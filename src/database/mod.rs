//! SQLite backed storage for per-guild settings and per-user cooldowns.
//!
//! Every operation is a point read or a single-statement upsert, so no call
//! here ever holds a transaction open.

use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

mod auto_react;
mod channel_emojis;
mod cooldowns;
mod prefixes;

pub use auto_react::{GuildAutoReactConfig, GuildConfigUpdate, DEFAULT_EMOJIS};
pub use prefixes::{DEFAULT_PREFIX, MAX_PREFIX_LEN};

const SCHEMA: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS auto_react (
        guild_id       INTEGER PRIMARY KEY,
        enabled        INTEGER NOT NULL DEFAULT 0,
        target_user_id INTEGER,
        channel_ids    TEXT    NOT NULL DEFAULT '[]',
        emojis         TEXT    NOT NULL DEFAULT '[]'
    )",
    "CREATE TABLE IF NOT EXISTS channel_emojis (
        guild_id   INTEGER NOT NULL,
        channel_id INTEGER NOT NULL,
        emojis     TEXT    NOT NULL,
        PRIMARY KEY (guild_id, channel_id)
    )",
    "CREATE TABLE IF NOT EXISTS prefixes (
        guild_id INTEGER PRIMARY KEY,
        prefix   TEXT    NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS command_cooldowns (
        user_id   INTEGER NOT NULL,
        command   TEXT    NOT NULL,
        last_used TEXT    NOT NULL,
        PRIMARY KEY (user_id, command)
    )",
];

#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if missing) the database at `url` and ensures the tables exist.
    pub async fn open(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        tracing::info!("Opened database at {url}");
        Self::from_pool(pool).await
    }

    /// A private in-memory database, used by tests.
    pub async fn open_in_memory() -> Result<Self> {
        // Every connection to `:memory:` is its own database, so pin the pool to one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }

        Ok(Self { pool })
    }
}

// Snowflakes are u64 but SQLite only has signed integers, so store the bit pattern.
fn to_db(id: impl Into<u64>) -> i64 {
    id.into() as i64
}

fn from_db(id: i64) -> u64 {
    id as u64
}
