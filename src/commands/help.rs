use anyhow::Result;

use crate::Context;

/// Show all available commands with current server prefix
#[poise::command(prefix_command, guild_only, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[rest] #[description = "The command to get help with"] command: Option<String>,
) -> Result<()> {
    crate::help::command(ctx, command.as_deref()).await
}

/// Show help for interactive GIF commands
#[poise::command(prefix_command, guild_only, category = "Utility")]
pub async fn help_interactive(ctx: Context<'_>) -> Result<()> {
    crate::help::interactive(ctx).await
}
