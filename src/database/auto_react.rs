use anyhow::Result;

use crate::serenity::{ChannelId, GuildId, UserId};
use super::{from_db, to_db, Database};

pub const DEFAULT_EMOJIS: [&str; 3] = ["🔥", "💯", "👍"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildAutoReactConfig {
    pub enabled: bool,
    pub target_user_id: Option<UserId>,
    /// Empty means every channel.
    pub channel_allow_list: Vec<ChannelId>,
    pub default_emojis: Vec<String>,
}

impl Default for GuildAutoReactConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target_user_id: None,
            channel_allow_list: Vec::new(),
            default_emojis: DEFAULT_EMOJIS.map(String::from).to_vec(),
        }
    }
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct GuildConfigUpdate {
    pub enabled: Option<bool>,
    pub target_user_id: Option<UserId>,
    pub channel_allow_list: Option<Vec<ChannelId>>,
    pub default_emojis: Option<Vec<String>>,
}

impl GuildAutoReactConfig {
    #[must_use]
    pub fn merge(mut self, update: GuildConfigUpdate) -> Self {
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }

        if let Some(target_user_id) = update.target_user_id {
            self.target_user_id = Some(target_user_id);
        }

        if let Some(channel_allow_list) = update.channel_allow_list {
            self.channel_allow_list = channel_allow_list;
        }

        if let Some(default_emojis) = update.default_emojis.filter(|e| !e.is_empty()) {
            self.default_emojis = default_emojis;
        }

        self
    }
}

impl Database {
    pub async fn guild_config(&self, guild_id: GuildId) -> Result<Option<GuildAutoReactConfig>> {
        let row: Option<(bool, Option<i64>, String, String)> = sqlx::query_as(
            "SELECT enabled, target_user_id, channel_ids, emojis FROM auto_react WHERE guild_id = ?"
        )
            .bind(to_db(guild_id))
            .fetch_optional(&self.pool)
            .await?;

        let Some((enabled, target_user_id, channel_ids, emojis)) = row else {
            return Ok(None)
        };

        let channel_allow_list = serde_json::from_str::<Vec<u64>>(&channel_ids)?
            .into_iter()
            .map(ChannelId::new)
            .collect();

        let mut default_emojis: Vec<String> = serde_json::from_str(&emojis)?;
        if default_emojis.is_empty() {
            default_emojis = GuildAutoReactConfig::default().default_emojis;
        }

        Ok(Some(GuildAutoReactConfig {
            enabled,
            channel_allow_list,
            default_emojis,
            target_user_id: target_user_id.map(|id| UserId::new(from_db(id))),
        }))
    }

    /// Merges `update` over the stored row (or the default row) and writes it back.
    pub async fn update_guild_config(&self, guild_id: GuildId, update: GuildConfigUpdate) -> Result<GuildAutoReactConfig> {
        let config = self.guild_config(guild_id).await?.unwrap_or_default().merge(update);

        let channel_ids: Vec<u64> = config.channel_allow_list.iter().map(|c| c.get()).collect();
        sqlx::query("
            INSERT INTO auto_react (guild_id, enabled, target_user_id, channel_ids, emojis)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (guild_id) DO UPDATE SET
                enabled = excluded.enabled,
                target_user_id = excluded.target_user_id,
                channel_ids = excluded.channel_ids,
                emojis = excluded.emojis
        ")
            .bind(to_db(guild_id))
            .bind(config.enabled)
            .bind(config.target_user_id.map(to_db))
            .bind(serde_json::to_string(&channel_ids)?)
            .bind(serde_json::to_string(&config.default_emojis)?)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Updated auto-react config for guild {guild_id}: {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guild() -> GuildId {
        GuildId::new(1)
    }

    #[tokio::test]
    async fn missing_row_reads_as_none() -> Result<()> {
        let db = Database::open_in_memory().await?;
        assert_eq!(db.guild_config(guild()).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn first_write_starts_from_defaults() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let stored = db.update_guild_config(guild(), GuildConfigUpdate {
            enabled: Some(true),
            ..Default::default()
        }).await?;

        assert!(stored.enabled);
        assert_eq!(stored.target_user_id, None);
        assert!(stored.channel_allow_list.is_empty());
        assert_eq!(stored.default_emojis, ["🔥", "💯", "👍"]);
        assert_eq!(db.guild_config(guild()).await?, Some(stored));
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() -> Result<()> {
        let db = Database::open_in_memory().await?;
        db.update_guild_config(guild(), GuildConfigUpdate {
            enabled: Some(true),
            target_user_id: Some(UserId::new(42)),
            channel_allow_list: Some(vec![ChannelId::new(7), ChannelId::new(3)]),
            default_emojis: Some(vec!["😈".into(), "💀".into()]),
        }).await?;

        db.update_guild_config(guild(), GuildConfigUpdate {
            enabled: Some(false),
            ..Default::default()
        }).await?;

        let config = db.guild_config(guild()).await?.expect("row should exist");
        assert!(!config.enabled);
        assert_eq!(config.target_user_id, Some(UserId::new(42)));
        assert_eq!(config.channel_allow_list, [ChannelId::new(7), ChannelId::new(3)]);
        assert_eq!(config.default_emojis, ["😈", "💀"]);
        Ok(())
    }

    #[tokio::test]
    async fn empty_emoji_update_is_ignored() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let config = db.update_guild_config(guild(), GuildConfigUpdate {
            default_emojis: Some(Vec::new()),
            ..Default::default()
        }).await?;

        assert_eq!(config.default_emojis, GuildAutoReactConfig::default().default_emojis);
        Ok(())
    }

    #[tokio::test]
    async fn large_snowflakes_survive_storage() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let user = UserId::new(u64::MAX - 5);
        db.update_guild_config(guild(), GuildConfigUpdate {
            target_user_id: Some(user),
            ..Default::default()
        }).await?;

        assert_eq!(db.guild_config(guild()).await?.and_then(|c| c.target_user_id), Some(user));
        Ok(())
    }
}
