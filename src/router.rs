use anyhow::Result;
use itertools::Itertools as _;

use crate::{
    database::Database,
    resolver,
    serenity::{self, ChannelId, GuildId, UserId},
    Data, FrameworkContext,
};

/// The reactions owed to a message, in order and without repeats.
pub async fn reactions_for(
    db: &Database,
    guild_id: GuildId,
    channel_id: ChannelId,
    author_id: UserId,
) -> Result<Vec<String>> {
    let policy = resolver::resolve(db, guild_id, channel_id).await?;
    Ok(policy.emojis_for(author_id).iter().unique().cloned().collect())
}

async fn auto_react(ctx: &serenity::Context, data: &Data, message: &serenity::Message) -> Result<()> {
    let guild_id = require!(message.guild_id, Ok(()));
    if message.author.bot {
        return Ok(());
    }

    for emoji in reactions_for(&data.db, guild_id, message.channel_id, message.author.id).await? {
        let reaction = match serenity::ReactionType::try_from(emoji.as_str()) {
            Ok(reaction) => reaction,
            Err(err) => {
                tracing::warn!("Skipping unparseable emoji {emoji:?} in guild {guild_id}: {err:?}");
                continue;
            }
        };

        if let Err(err) = message.react(ctx, reaction).await {
            tracing::warn!("Failed to react with {emoji}: {err}");
        }
    }

    Ok(())
}

pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: FrameworkContext<'_>,
    data: &Data,
) -> Result<()> {
    match event {
        serenity::FullEvent::Ready {data_about_bot} => {
            tracing::info!(
                "Logged in as {} ({}), serving {} guilds!",
                data_about_bot.user.name, data_about_bot.user.id, data_about_bot.guilds.len()
            );
        }
        serenity::FullEvent::Message {new_message} => auto_react(ctx, data, new_message).await?,
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::GuildConfigUpdate;

    const GUILD: u64 = 1;
    const TARGET: u64 = 500;

    async fn enabled(emojis: Option<Vec<String>>) -> Result<Database> {
        let db = Database::open_in_memory().await?;
        db.update_guild_config(GuildId::new(GUILD), GuildConfigUpdate {
            enabled: Some(true),
            target_user_id: Some(UserId::new(TARGET)),
            channel_allow_list: Some(Vec::new()),
            default_emojis: emojis,
        }).await?;

        Ok(db)
    }

    #[tokio::test]
    async fn target_gets_default_reactions_in_any_channel() -> Result<()> {
        let db = enabled(None).await?;

        for channel in [10, 11, 12] {
            let reactions = reactions_for(&db, GuildId::new(GUILD), ChannelId::new(channel), UserId::new(TARGET)).await?;
            assert_eq!(reactions, ["🔥", "💯", "👍"]);
        }
        Ok(())
    }

    #[tokio::test]
    async fn other_authors_get_nothing() -> Result<()> {
        let db = enabled(None).await?;

        let reactions = reactions_for(&db, GuildId::new(GUILD), ChannelId::new(10), UserId::new(TARGET + 1)).await?;
        assert!(reactions.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_emojis_react_once() -> Result<()> {
        let db = enabled(Some(vec!["😈".into(), "💀".into(), "😈".into()])).await?;

        let reactions = reactions_for(&db, GuildId::new(GUILD), ChannelId::new(10), UserId::new(TARGET)).await?;
        assert_eq!(reactions, ["😈", "💀"]);
        Ok(())
    }

    #[test]
    fn stored_emojis_convert_to_reactions() {
        for emoji in ["🔥", "<:pepe:123456789012345678>", "<a:dance:123456789012345678>"] {
            assert!(serenity::ReactionType::try_from(emoji).is_ok(), "{emoji}");
        }
    }
}
