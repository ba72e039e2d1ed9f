use anyhow::Result;

use crate::{database::DEFAULT_PREFIX, Command, Data, Error};

/// Per-guild prefix lookup for poise, DMs always use the default.
pub fn dynamic_prefix(ctx: poise::PartialContext<'_, Data, Error>) -> poise::BoxFuture<'_, Result<Option<String>>> {
    Box::pin(async move {
        Ok(Some(match ctx.guild_id {
            Some(guild_id) => ctx.data.db.prefix(guild_id).await?,
            None => String::from(DEFAULT_PREFIX),
        }))
    })
}

/// Prefix settings for the framework. Every prefix comes from [`dynamic_prefix`], so a
/// guild that changed its prefix does not also answer to the default one.
#[must_use]
pub fn prefix_options() -> poise::PrefixFrameworkOptions<Data, Error> {
    poise::PrefixFrameworkOptions {
        prefix: None,
        dynamic_prefix: Some(dynamic_prefix),
        case_insensitive_commands: true,
        ..Default::default()
    }
}

/// Finds the command `content` invokes, trying prefixes in the order poise does:
/// the guild's prefix, then the static prefix, then any additional literal prefixes.
#[must_use]
pub fn resolve_command<'a>(
    commands: &'a [Command],
    options: &poise::PrefixFrameworkOptions<Data, Error>,
    guild_prefix: &str,
    content: &'a str,
) -> Option<&'a Command> {
    let additional = options.additional_prefixes.iter().filter_map(|prefix| match prefix {
        poise::Prefix::Literal(prefix) => Some(*prefix),
        _ => None,
    });

    let invocation = std::iter::once(guild_prefix)
        .chain(options.prefix.as_deref())
        .chain(additional)
        .find_map(|prefix| content.strip_prefix(prefix))?
        .trim_start();

    if invocation.is_empty() {
        return None;
    }

    poise::find_command(commands, invocation, options.case_insensitive_commands, &mut Vec::new())
        .map(|(command, _, _)| command)
}
