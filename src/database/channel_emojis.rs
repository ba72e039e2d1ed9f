use anyhow::Result;

use crate::serenity::{ChannelId, GuildId};
use super::{from_db, to_db, Database};

impl Database {
    /// The emoji override for a channel, `None` if unset or stored empty.
    pub async fn channel_emojis(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<Option<Vec<String>>> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT emojis FROM channel_emojis WHERE guild_id = ? AND channel_id = ?"
        )
            .bind(to_db(guild_id))
            .bind(to_db(channel_id))
            .fetch_optional(&self.pool)
            .await?;

        let Some((emojis,)) = row else {return Ok(None)};
        let emojis: Vec<String> = serde_json::from_str(&emojis)?;
        Ok((!emojis.is_empty()).then_some(emojis))
    }

    pub async fn set_channel_emojis(&self, guild_id: GuildId, channel_id: ChannelId, emojis: &[String]) -> Result<()> {
        sqlx::query("
            INSERT INTO channel_emojis (guild_id, channel_id, emojis) VALUES (?, ?, ?)
            ON CONFLICT (guild_id, channel_id) DO UPDATE SET emojis = excluded.emojis
        ")
            .bind(to_db(guild_id))
            .bind(to_db(channel_id))
            .bind(serde_json::to_string(emojis)?)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn channel_emoji_overrides(&self, guild_id: GuildId) -> Result<Vec<(ChannelId, Vec<String>)>> {
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT channel_id, emojis FROM channel_emojis WHERE guild_id = ? ORDER BY rowid"
        )
            .bind(to_db(guild_id))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(channel_id, emojis)| -> Result<_> {
                Ok((ChannelId::new(from_db(channel_id)), serde_json::from_str(&emojis)?))
            })
            .collect()
    }
}
