use anyhow::Result;

use crate::{database::MAX_PREFIX_LEN, Context};

/// Checks a requested prefix, returning the reply explaining why it was refused.
pub fn validate_prefix(prefix: &str) -> Result<(), String> {
    if prefix.trim().is_empty() {
        Err(String::from("❌ Prefix cannot be empty."))
    } else if prefix.chars().count() > MAX_PREFIX_LEN {
        Err(format!("❌ Prefix too long (max {MAX_PREFIX_LEN} characters)."))
    } else {
        Ok(())
    }
}

/// Check current prefix for this server
#[poise::command(prefix_command, guild_only, category = "Utility")]
pub async fn prefixinfo(ctx: Context<'_>) -> Result<()> {
    let guild_id = require_guild!(ctx);
    let prefix = ctx.data().db.prefix(guild_id).await?;

    ctx.say(format!("🔧 The current prefix for this server is: {prefix}")).await?;
    Ok(())
}

/// Set a new prefix for this server
#[poise::command(prefix_command, guild_only, category = "Utility", required_permissions = "ADMINISTRATOR")]
pub async fn setprefix(
    ctx: Context<'_>,
    #[description = "The new prefix, at most 5 characters"] new_prefix: String,
) -> Result<()> {
    let guild_id = require_guild!(ctx);
    if let Err(reason) = validate_prefix(&new_prefix) {
        ctx.say(reason).await?;
        return Ok(())
    }

    ctx.data().db.set_prefix(guild_id, &new_prefix).await?;
    ctx.say(format!(
        "✅ Prefix updated to `{new_prefix}`. Try `{new_prefix}help_interactive` to see GIF commands!"
    )).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prefixes_are_refused() {
        for prefix in ["", " ", "\t"] {
            assert_eq!(validate_prefix(prefix), Err(String::from("❌ Prefix cannot be empty.")), "{prefix:?}");
        }
    }

    #[test]
    fn length_is_counted_in_characters() {
        assert_eq!(validate_prefix("?"), Ok(()));
        assert_eq!(validate_prefix("?????"), Ok(()));
        assert_eq!(validate_prefix("🔥🔥🔥🔥🔥"), Ok(()));
        assert_eq!(validate_prefix("??????"), Err(String::from("❌ Prefix too long (max 5 characters).")));
    }
}
