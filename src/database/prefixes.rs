use anyhow::Result;

use crate::serenity::GuildId;
use super::{to_db, Database};

pub const DEFAULT_PREFIX: &str = "!";
pub const MAX_PREFIX_LEN: usize = 5;

impl Database {
    pub async fn prefix(&self, guild_id: GuildId) -> Result<String> {
        let row: Option<(String,)> = sqlx::query_as("SELECT prefix FROM prefixes WHERE guild_id = ?")
            .bind(to_db(guild_id))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map_or_else(|| String::from(DEFAULT_PREFIX), |(prefix,)| prefix))
    }

    pub async fn set_prefix(&self, guild_id: GuildId, prefix: &str) -> Result<()> {
        sqlx::query("
            INSERT INTO prefixes (guild_id, prefix) VALUES (?, ?)
            ON CONFLICT (guild_id) DO UPDATE SET prefix = excluded.prefix
        ")
            .bind(to_db(guild_id))
            .bind(prefix)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn prefix_defaults_then_overwrites() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let guild = GuildId::new(9);

        assert_eq!(db.prefix(guild).await?, "!");
        db.set_prefix(guild, "??").await?;
        db.set_prefix(guild, "$").await?;
        assert_eq!(db.prefix(guild).await?, "$");
        assert_eq!(db.prefix(GuildId::new(10)).await?, "!");
        Ok(())
    }
}
