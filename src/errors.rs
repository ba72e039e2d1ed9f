use std::fmt::Write as _;

use anyhow::Result;
use poise::FrameworkError;

use crate::{commands::PERMISSION_DENIED, Command, Data, Error, PoiseContextExt as _};

/// Closest command name to what the user typed, if it is plausibly a typo.
fn suggest_command<'a>(commands: &'a [Command], typed: &str) -> Option<&'a str> {
    commands.iter()
        .filter(|c| !c.hide_in_help)
        .map(|c| (strsim::levenshtein(&c.name, typed), c.name.as_str()))
        .filter(|(distance, _)| *distance <= 2)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, name)| name)
}

fn unknown_command_message(commands: &[Command], prefix: &str, msg_content: &str) -> String {
    let mut message = format!("❓ Command not found. Use `{prefix}help` to see all available commands.");
    let typed = msg_content.split_whitespace().next().unwrap_or_default().to_lowercase();

    if let Some(suggestion) = suggest_command(commands, &typed) {
        let _ = write!(message, " Did you mean `{prefix}{suggestion}`?");
    }

    message
}

async fn handle_error(error: FrameworkError<'_, Data, Error>) -> Result<()> {
    match error {
        FrameworkError::Command {error, ctx, ..} => {
            tracing::error!("Error in {} command: {error:?}", ctx.command().qualified_name);
            ctx.send_error("something went wrong while running this command").await?;
        }
        FrameworkError::EventHandler {error, event, ..} => {
            tracing::error!("Error in {} event: {error:?}", event.snake_case_name());
        }
        FrameworkError::PermissionFetchFailed {ctx, ..} => {
            tracing::error!("Failed to fetch permissions for {} command", ctx.command().qualified_name);
            ctx.send_error("I couldn't check your permissions").await?;
        }
        FrameworkError::MissingUserPermissions {ctx, ..} => {
            ctx.say(PERMISSION_DENIED).await?;
        }
        FrameworkError::ArgumentParse {input: None, ctx, ..} => {
            ctx.say(format!("❌ Missing required argument. Use `{}help` to see command usage.", ctx.prefix())).await?;
        }
        FrameworkError::ArgumentParse {input: Some(input), ctx, ..} => {
            let prefix = ctx.prefix();
            let command = &ctx.command().qualified_name;

            ctx.say(if ctx.command().category.as_deref() == Some("Interactive") {
                format!("❌ User not found. Please mention a valid user. Example: `{prefix}{command} @username`")
            } else {
                format!("❌ Couldn't understand `{input}`. Use `{prefix}help {command}` to see command usage.")
            }).await?;
        }
        FrameworkError::UnknownCommand {ctx, msg, prefix, msg_content, framework, ..} => {
            let message = unknown_command_message(&framework.options().commands, prefix, msg_content);
            msg.channel_id.say(ctx, message).await?;
        }
        FrameworkError::GuildOnly {ctx, ..} => {
            ctx.say("❌ This command can only be used in a server.").await?;
        }
        error => poise::builtins::on_error(error).await?,
    }

    Ok(())
}

pub async fn on_error(error: FrameworkError<'_, Data, Error>) {
    if let Err(err) = handle_error(error).await {
        tracing::error!("Error while handling error: {err:?}");
    }
}

/// Message for a failed login or a dropped gateway.
#[must_use]
pub fn describe_client_error(err: &::serenity::Error) -> String {
    match err {
        ::serenity::Error::Gateway(::serenity::gateway::GatewayError::InvalidAuthentication) => {
            String::from("Failed to log in - Invalid token!")
        }
        err => format!("Bot crashed: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typos_get_a_suggestion() {
        let commands = crate::commands::all();

        assert_eq!(suggest_command(&commands, "hgu"), Some("hug"));
        assert_eq!(suggest_command(&commands, "setprefx"), Some("setprefix"));
        assert_eq!(suggest_command(&commands, "completelydifferent"), None);
    }

    #[test]
    fn unknown_command_message_uses_prefix() {
        let commands = crate::commands::all();

        assert_eq!(
            unknown_command_message(&commands, "??", "dance wildly"),
            "❓ Command not found. Use `??help` to see all available commands."
        );
        assert!(unknown_command_message(&commands, "!", "KISSS <@1>").ends_with("Did you mean `!kiss`?"));
    }

    #[test]
    fn invalid_token_is_called_out() {
        let err = ::serenity::Error::Gateway(::serenity::gateway::GatewayError::InvalidAuthentication);
        assert_eq!(describe_client_error(&err), "Failed to log in - Invalid token!");
    }
}
