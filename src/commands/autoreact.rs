use anyhow::Result;
use itertools::Itertools as _;

use crate::{
    database::GuildConfigUpdate,
    serenity::{self, Mentionable as _},
    Context,
};

/// Enable auto-react for a specific user
#[poise::command(prefix_command, guild_only, category = "Auto-React", required_permissions = "ADMINISTRATOR")]
pub async fn autoreact(
    ctx: Context<'_>,
    #[description = "The user to react to"] user: Option<serenity::User>,
    #[description = "Emojis to react with, defaults to the current set"] emojis: Vec<String>,
) -> Result<()> {
    let guild_id = require_guild!(ctx);
    let Some(user) = user else {
        ctx.say(format!("❌ You must mention a user. Usage: {}autoreact @User 😈 💀", ctx.prefix())).await?;
        return Ok(())
    };

    let emoji_list = emojis.join(" ");
    ctx.data().db.update_guild_config(guild_id, GuildConfigUpdate {
        enabled: Some(true),
        target_user_id: Some(user.id),
        default_emojis: (!emojis.is_empty()).then_some(emojis),
        ..Default::default()
    }).await?;

    let mut response = format!("✅ Auto-react enabled.\n👤 Target: {}", user.mention());
    if !emoji_list.is_empty() {
        response.push_str("\n✨ Emojis: ");
        response.push_str(&emoji_list);
    }

    ctx.say(response).await?;
    Ok(())
}

/// Disable auto-react
#[poise::command(prefix_command, guild_only, category = "Auto-React", required_permissions = "ADMINISTRATOR")]
pub async fn autoreactoff(ctx: Context<'_>) -> Result<()> {
    let guild_id = require_guild!(ctx);
    ctx.data().db.update_guild_config(guild_id, GuildConfigUpdate {
        enabled: Some(false),
        ..Default::default()
    }).await?;

    ctx.say("🛑 Auto-react disabled.").await?;
    Ok(())
}

/// Set specific channels for auto-react, none to react everywhere
#[poise::command(prefix_command, guild_only, category = "Auto-React", required_permissions = "ADMINISTRATOR")]
pub async fn setreactchannels(
    ctx: Context<'_>,
    #[description = "Channels to react in"] channels: Vec<serenity::GuildChannel>,
) -> Result<()> {
    let guild_id = require_guild!(ctx);
    ctx.data().db.update_guild_config(guild_id, GuildConfigUpdate {
        channel_allow_list: Some(channels.iter().map(|c| c.id).collect()),
        ..Default::default()
    }).await?;

    if channels.is_empty() {
        ctx.say("✅ Channel filter cleared. Will react in all channels.").await?;
    } else {
        ctx.say(format!("✅ Will only react in: {}", channels.iter().map(|c| &c.name).join(", "))).await?;
    }

    Ok(())
}

/// Set custom emojis for a specific channel
#[poise::command(prefix_command, guild_only, category = "Auto-React", required_permissions = "ADMINISTRATOR")]
pub async fn setchannelemojis(
    ctx: Context<'_>,
    #[description = "The channel to override"] channel: serenity::GuildChannel,
    #[description = "Emojis to react with in that channel"] emojis: Vec<String>,
) -> Result<()> {
    let guild_id = require_guild!(ctx);
    if emojis.is_empty() {
        ctx.say("❌ Please provide at least one emoji.").await?;
        return Ok(())
    }

    ctx.data().db.set_channel_emojis(guild_id, channel.id, &emojis).await?;
    ctx.say(format!("✅ Set emojis for {} to: {}", channel.mention(), emojis.join(" "))).await?;
    Ok(())
}

/// View current auto-react configuration
#[poise::command(prefix_command, guild_only, category = "Auto-React")]
pub async fn autoreactconfig(ctx: Context<'_>) -> Result<()> {
    let guild_id = require_guild!(ctx);
    let db = &ctx.data().db;

    let config = db.guild_config(guild_id).await?.unwrap_or_default();
    let overrides = db.channel_emoji_overrides(guild_id).await?;

    let target = config.target_user_id.map_or_else(|| String::from("Not set"), |id| id.mention().to_string());
    let channels = if config.channel_allow_list.is_empty() {
        String::from("All channels")
    } else {
        config.channel_allow_list.iter().map(|c| c.mention()).join(", ")
    };

    let per_channel = if overrides.is_empty() {
        String::from("None")
    } else {
        overrides.iter().map(|(channel, emojis)| format!("• {} → {}", channel.mention(), emojis.join(" "))).join("\n")
    };

    ctx.send(poise::CreateReply::default().embed(serenity::CreateEmbed::default()
        .title("Auto-React Configuration")
        .colour(crate::TEAL)
        .field("Status", if config.enabled {"✅ Enabled"} else {"🛑 Disabled"}, false)
        .field("Target User", target, false)
        .field("Active Channels", channels, false)
        .field("Global Emojis", config.default_emojis.join(" "), false)
        .field("Per-Channel Emojis", per_channel, false)
    )).await?;

    Ok(())
}
