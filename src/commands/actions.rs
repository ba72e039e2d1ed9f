use anyhow::Result;

use crate::{
    actions::{self, Action, ActionOutcome, Participant},
    serenity, Context,
};

async fn run(ctx: Context<'_>, target: serenity::User, action: Action) -> Result<()> {
    let _typing = ctx.channel_id().start_typing(&ctx.serenity_context().http);

    let data = ctx.data();
    let invoker = Participant::from(ctx.author());
    let target = Participant::from(&target);

    match actions::perform(&data.db, data.gifs.as_ref(), action, &invoker, &target, ctx.framework().bot_id).await? {
        ActionOutcome::Rejected(rejection) => ctx.say(rejection.message(action)).await?,
        ActionOutcome::Reply(reply) => ctx.send(poise::CreateReply::default().embed(serenity::CreateEmbed::default()
            .description(reply.message)
            .colour(crate::PINK)
            .image(reply.gif_url)
            .footer(serenity::CreateEmbedFooter::new(format!("Powered by Tenor • {} command", action.title())))
        )).await?,
    };

    Ok(())
}

/// Give someone a warm hug! 🤗
#[poise::command(prefix_command, guild_only, category = "Interactive")]
pub async fn hug(ctx: Context<'_>, #[description = "Who to hug"] target: serenity::User) -> Result<()> {
    run(ctx, target, Action::Hug).await
}

/// Give someone a sweet kiss! 😘
#[poise::command(prefix_command, guild_only, category = "Interactive")]
pub async fn kiss(ctx: Context<'_>, #[description = "Who to kiss"] target: serenity::User) -> Result<()> {
    run(ctx, target, Action::Kiss).await
}

/// Slap someone (playfully)! 👋
#[poise::command(prefix_command, guild_only, category = "Interactive")]
pub async fn slap(ctx: Context<'_>, #[description = "Who to slap"] target: serenity::User) -> Result<()> {
    run(ctx, target, Action::Slap).await
}

/// Throw a punch (playfully)! 👊
#[poise::command(prefix_command, guild_only, category = "Interactive")]
pub async fn punch(ctx: Context<'_>, #[description = "Who to punch"] target: serenity::User) -> Result<()> {
    run(ctx, target, Action::Punch).await
}

/// Eliminate someone (playfully)! ⚔️
#[poise::command(prefix_command, guild_only, category = "Interactive")]
pub async fn kill(ctx: Context<'_>, #[description = "Who to eliminate"] target: serenity::User) -> Result<()> {
    run(ctx, target, Action::Kill).await
}

/// Show intimate affection! 💕
#[poise::command(prefix_command, guild_only, category = "Interactive")]
pub async fn fuck(ctx: Context<'_>, #[description = "Who to get intimate with"] target: serenity::User) -> Result<()> {
    run(ctx, target, Action::Fuck).await
}

/// Help someone look their best! ✨
#[poise::command(prefix_command, guild_only, category = "Interactive")]
pub async fn groom(ctx: Context<'_>, #[description = "Who to groom"] target: serenity::User) -> Result<()> {
    run(ctx, target, Action::Groom).await
}
