use anyhow::Result;

use crate::{serenity, Context};

#[serenity::async_trait]
pub trait PoiseContextExt {
    async fn send_error(&self, error: &str) -> Result<Option<poise::ReplyHandle<'_>>>;
}

#[serenity::async_trait]
impl<'a> PoiseContextExt for Context<'a> {
    async fn send_error(&self, error: &str) -> Result<Option<poise::ReplyHandle<'_>>> {
        if let Some(channel) = self.guild_channel().await {
            let permissions = channel.permissions_for_user(self.serenity_context(), self.framework().bot_id)?;

            if !permissions.send_messages() {
                return Ok(None);
            };

            if !permissions.embed_links() {
                return self.say("An Error Occurred! Please give me embed links permissions so I can tell you more!")
                    .await.map(Some).map_err(Into::into)
            };
        }

        let author = self.author();
        let (name, avatar_url) = match self.author_member().await {
            Some(member) => (member.display_name().to_owned(), member.face()),
            None => (author.name.clone(), author.face()),
        };

        match self.send(poise::CreateReply::default()
            .embed(serenity::CreateEmbed::default()
                .colour(crate::RED)
                .title("An Error Occurred!")
                .author(serenity::CreateEmbedAuthor::new(name).icon_url(avatar_url))
                .description(format!("Sorry but {error}, please try again in a moment!"))
                .footer(serenity::CreateEmbedFooter::new(format!(
                    "Use {}help to see how commands are used", self.prefix()
                )))
            )
        ).await {
            Ok(handle) => Ok(Some(handle)),
            Err(_) => Ok(None)
        }
    }
}
