use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::serenity::UserId;
use super::{to_db, Database};

impl Database {
    pub async fn last_used(&self, user_id: UserId, command: &str) -> Result<Option<DateTime<Utc>>> {
        let row: Option<(DateTime<Utc>,)> = sqlx::query_as(
            "SELECT last_used FROM command_cooldowns WHERE user_id = ? AND command = ?"
        )
            .bind(to_db(user_id))
            .bind(command)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(last_used,)| last_used))
    }

    pub async fn stamp_last_used(&self, user_id: UserId, command: &str, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("
            INSERT INTO command_cooldowns (user_id, command, last_used) VALUES (?, ?, ?)
            ON CONFLICT (user_id, command) DO UPDATE SET last_used = excluded.last_used
        ")
            .bind(to_db(user_id))
            .bind(command)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
