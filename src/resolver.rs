use anyhow::Result;

use crate::{database::Database, serenity::{ChannelId, GuildId, UserId}};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactPolicy {
    Ignore,
    React {
        target_user_id: UserId,
        emojis: Vec<String>,
    },
}

impl ReactPolicy {
    /// The emojis to react to `author` with, empty unless they are the target.
    #[must_use]
    pub fn emojis_for(&self, author: UserId) -> &[String] {
        match self {
            Self::React {target_user_id, emojis} if *target_user_id == author => emojis,
            _ => &[],
        }
    }
}

/// Cascades guild config, channel filter and channel override into a single policy.
///
/// Recomputed for every message, every step is a point read.
pub async fn resolve(db: &Database, guild_id: GuildId, channel_id: ChannelId) -> Result<ReactPolicy> {
    let config = require!(db.guild_config(guild_id).await?, Ok(ReactPolicy::Ignore));
    if !config.enabled {
        return Ok(ReactPolicy::Ignore);
    }

    let target_user_id = require!(config.target_user_id, Ok(ReactPolicy::Ignore));
    if !config.channel_allow_list.is_empty() && !config.channel_allow_list.contains(&channel_id) {
        return Ok(ReactPolicy::Ignore);
    }

    let emojis = match db.channel_emojis(guild_id, channel_id).await? {
        Some(overridden) => overridden,
        None => config.default_emojis,
    };

    Ok(ReactPolicy::React {target_user_id, emojis})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::GuildConfigUpdate;

    fn ids() -> (GuildId, ChannelId, UserId) {
        (GuildId::new(100), ChannelId::new(200), UserId::new(300))
    }

    async fn enabled_guild(db: &Database, channels: Vec<ChannelId>) -> Result<()> {
        let (guild, _, user) = ids();
        db.update_guild_config(guild, GuildConfigUpdate {
            enabled: Some(true),
            target_user_id: Some(user),
            channel_allow_list: Some(channels),
            default_emojis: None,
        }).await?;

        Ok(())
    }

    #[tokio::test]
    async fn unconfigured_guild_is_ignored() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let (guild, channel, _) = ids();

        assert_eq!(resolve(&db, guild, channel).await?, ReactPolicy::Ignore);
        Ok(())
    }

    #[tokio::test]
    async fn disabled_guild_is_ignored() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let (guild, channel, _) = ids();
        enabled_guild(&db, Vec::new()).await?;
        db.update_guild_config(guild, GuildConfigUpdate {enabled: Some(false), ..Default::default()}).await?;

        assert_eq!(resolve(&db, guild, channel).await?, ReactPolicy::Ignore);
        Ok(())
    }

    #[tokio::test]
    async fn enabled_without_target_is_ignored() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let (guild, channel, _) = ids();
        db.update_guild_config(guild, GuildConfigUpdate {enabled: Some(true), ..Default::default()}).await?;

        assert_eq!(resolve(&db, guild, channel).await?, ReactPolicy::Ignore);
        Ok(())
    }

    #[tokio::test]
    async fn channel_outside_allow_list_is_ignored() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let (guild, channel, _) = ids();
        enabled_guild(&db, vec![ChannelId::new(201), ChannelId::new(202)]).await?;

        assert_eq!(resolve(&db, guild, channel).await?, ReactPolicy::Ignore);
        assert_ne!(resolve(&db, guild, ChannelId::new(202)).await?, ReactPolicy::Ignore);
        Ok(())
    }

    #[tokio::test]
    async fn empty_allow_list_matches_every_channel() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let (guild, channel, user) = ids();
        enabled_guild(&db, Vec::new()).await?;

        let policy = resolve(&db, guild, channel).await?;
        assert_eq!(policy, ReactPolicy::React {
            target_user_id: user,
            emojis: vec!["🔥".into(), "💯".into(), "👍".into()],
        });
        Ok(())
    }

    #[tokio::test]
    async fn channel_override_beats_guild_default() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let (guild, channel, user) = ids();
        enabled_guild(&db, Vec::new()).await?;
        db.set_channel_emojis(guild, channel, &["🐢".into()]).await?;

        let policy = resolve(&db, guild, channel).await?;
        assert_eq!(policy.emojis_for(user), ["🐢"]);
        assert_eq!(resolve(&db, guild, ChannelId::new(999)).await?.emojis_for(user).len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn only_the_target_gets_emojis() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let (guild, channel, user) = ids();
        enabled_guild(&db, Vec::new()).await?;

        let policy = resolve(&db, guild, channel).await?;
        assert!(policy.emojis_for(UserId::new(301)).is_empty());
        assert!(!policy.emojis_for(user).is_empty());
        Ok(())
    }
}
