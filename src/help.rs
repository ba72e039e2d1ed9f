use std::fmt::Write as _;

use anyhow::Result;
use indexmap::IndexMap;

use crate::{actions::Action, serenity, Command, Context};

enum HelpCommandMode<'a> {
    Root,
    Command(&'a Command),
}

fn get_command_mapping(commands: &[Command]) -> IndexMap<&str, Vec<&Command>> {
    let mut mapping = IndexMap::new();

    for command in commands {
        if !command.hide_in_help {
            let commands = mapping
                .entry(command.category.as_deref().unwrap_or("Uncategorised"))
                .or_insert_with(Vec::new);

            commands.push(command);
        }
    }

    mapping
}

fn format_params(command: &Command) -> String {
    command.parameters.iter().map(|p| {
        if p.required {
            format!("<{}> ", p.name)
        } else {
            format!("[{}] ", p.name)
        }
    }).collect()
}

fn show_group_description(prefix: &str, group: &IndexMap<&str, Vec<&Command>>) -> String {
    group.iter().map(|(category, commands)| {
        format!("**__{category}__**\n{}\n", commands.iter().map(|c| {
            let params = format_params(c);
            let description = c.description.as_deref().unwrap_or_default();
            let admin_note = if c.required_permissions.is_empty() {""} else {" (Admin)"};
            if params.is_empty() {
                format!("`{prefix}{}`: {description}{admin_note}\n", c.qualified_name)
            } else {
                format!("`{prefix}{} {}`: {description}{admin_note}\n", c.qualified_name, params.trim_end())
            }
        }).collect::<String>()
    )}).collect::<String>()
}

fn show_command_description(prefix: &str, command: &Command) -> String {
    let mut msg = format!("{}\n```{prefix}{} {}```\n",
        command.description.as_deref().unwrap_or("Command description not found!"),
        command.qualified_name, format_params(command),
    );

    if !command.parameters.is_empty() {
        msg.push_str("__**Parameter Descriptions**__\n");
        for p in &command.parameters {
            let _ = writeln!(msg, "`{}`: {}", p.name, p.description.as_deref().unwrap_or("no description"));
        }
    };

    msg
}

fn show_interactive_description(prefix: &str) -> String {
    Action::ALL.iter().map(|action| {
        format!("{} `{prefix}{} @user`: {}\n", action.emoji(), action.name(), action.description())
    }).collect()
}

const NOTES: &str = "\
    • GIF commands have 5-second cooldowns\n\
    • You cannot target yourself or bots\n\
    • Admin commands require administrator permissions\n\
    • Bot reacts to the configured user automatically when enabled";

pub async fn command(ctx: Context<'_>, command: Option<&str>) -> Result<()> {
    let commands = &ctx.framework().options().commands;
    let prefix = ctx.prefix();

    let mode = match command {
        None => HelpCommandMode::Root,
        Some(command) => {
            let (command_obj, _, _) = require!(poise::find_command(commands, command, true, &mut Vec::new()), {
                ctx.say(format!("No command called {command} found!")).await?;
                Ok(())
            });

            HelpCommandMode::Command(command_obj)
        }
    };

    ctx.send(poise::CreateReply::default().embed(serenity::CreateEmbed::default()
        .title(match &mode {
            HelpCommandMode::Root => String::from("🤖 Auto-React GIF Bot Commands"),
            HelpCommandMode::Command(c) => format!("`{}` Help!", c.qualified_name),
        })
        .description(match &mode {
            HelpCommandMode::Root => format!(
                "All commands for this server use prefix: `{prefix}`\n\n{}**__Notes__**\n{NOTES}",
                show_group_description(prefix, &get_command_mapping(commands)),
            ),
            HelpCommandMode::Command(command_obj) => show_command_description(prefix, command_obj),
        })
        .colour(crate::BLURPLE)
        .author(serenity::CreateEmbedAuthor::new(ctx.author().name.clone()).icon_url(ctx.author().face()))
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Use `{prefix}help [command]` for more info on a command • GIFs by Tenor"
        )))
    )).await?;

    Ok(())
}

pub async fn interactive(ctx: Context<'_>) -> Result<()> {
    let prefix = ctx.prefix();

    ctx.send(poise::CreateReply::default().embed(serenity::CreateEmbed::default()
        .title("🎭 Interactive GIF Commands")
        .description(format!("Express yourself with animated GIFs!\n\n{}", show_interactive_description(prefix)))
        .field("ℹ️ Note", "• All commands have a 5-second cooldown\n• You cannot target yourself or bots\n• Powered by Tenor API", false)
        .colour(crate::PINK)
    )).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_group_by_category_in_registration_order() {
        let commands = crate::commands::all();
        let mapping = get_command_mapping(&commands);

        assert_eq!(mapping.keys().copied().collect::<Vec<_>>(), ["Interactive", "Auto-React", "Utility"]);
        assert_eq!(mapping["Interactive"].len(), Action::ALL.len());
    }

    #[test]
    fn listing_uses_the_guild_prefix() {
        let commands = crate::commands::all();
        let listing = show_group_description("??", &get_command_mapping(&commands));

        assert!(listing.contains("`??hug <target>`"), "{listing}");
        assert!(listing.contains("`??autoreactoff`: Disable auto-react (Admin)"), "{listing}");
        assert!(listing.contains("`??autoreactconfig`: View current auto-react configuration\n"), "{listing}");
        assert!(!listing.contains("`!hug"));
    }

    #[test]
    fn optional_params_are_bracketed() {
        let commands = crate::commands::all();
        let autoreact = commands.iter().find(|c| c.name == "autoreact").expect("registered");

        assert!(format_params(autoreact).starts_with("[user] "));
    }

    #[test]
    fn interactive_listing_covers_every_action() {
        let listing = show_interactive_description("!");
        for action in Action::ALL {
            assert!(listing.contains(&format!("`!{} @user`", action.name())));
        }
    }
}
