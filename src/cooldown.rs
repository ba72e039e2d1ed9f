use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::{database::Database, serenity::UserId};

/// How long a user must wait between two uses of the same GIF command.
pub const GIF_COMMAND_WINDOW: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    Allowed,
    Throttled { remaining_secs: u64 },
}

pub async fn check_and_stamp(db: &Database, user_id: UserId, command: &str, window: Duration) -> Result<CooldownStatus> {
    check_and_stamp_at(db, user_id, command, window, Utc::now()).await
}

/// Allows and stamps `now` if the window has passed, otherwise reports the wait.
///
/// A throttled attempt leaves the stored stamp untouched.
pub async fn check_and_stamp_at(
    db: &Database,
    user_id: UserId,
    command: &str,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<CooldownStatus> {
    if let Some(last_used) = db.last_used(user_id, command).await? {
        // A stamp from the future (clock went backwards) counts as zero elapsed.
        let elapsed = (now - last_used).to_std().unwrap_or_default();
        if elapsed < window {
            let remaining_secs = window.as_secs() - elapsed.as_secs();
            tracing::debug!("{user_id} is on cooldown for {command}, {remaining_secs}s left");
            return Ok(CooldownStatus::Throttled {remaining_secs});
        }
    }

    db.stamp_last_used(user_id, command, now).await?;
    Ok(CooldownStatus::Allowed)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    const WINDOW: Duration = Duration::from_secs(5);

    fn user() -> UserId {
        UserId::new(77)
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 250_000_000).expect("valid timestamp")
    }

    #[tokio::test]
    async fn first_use_is_allowed() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let status = check_and_stamp(&db, user(), "hug", WINDOW).await?;

        assert_eq!(status, CooldownStatus::Allowed);
        assert!(db.last_used(user(), "hug").await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn throttled_use_does_not_reset_the_clock() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let start = epoch();

        check_and_stamp_at(&db, user(), "hug", WINDOW, start).await?;

        let status = check_and_stamp_at(&db, user(), "hug", WINDOW, start + TimeDelta::milliseconds(1500)).await?;
        assert_eq!(status, CooldownStatus::Throttled {remaining_secs: 4});
        assert_eq!(db.last_used(user(), "hug").await?, Some(start));

        // Had the throttled attempt restamped, this would still be inside the window.
        let status = check_and_stamp_at(&db, user(), "hug", WINDOW, start + TimeDelta::seconds(5)).await?;
        assert_eq!(status, CooldownStatus::Allowed);
        Ok(())
    }

    #[tokio::test]
    async fn expired_window_is_allowed_and_restamped() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let start = epoch();
        let later = start + TimeDelta::seconds(6);

        check_and_stamp_at(&db, user(), "slap", WINDOW, start).await?;

        assert_eq!(check_and_stamp_at(&db, user(), "slap", WINDOW, later).await?, CooldownStatus::Allowed);
        assert_eq!(db.last_used(user(), "slap").await?, Some(later));
        Ok(())
    }

    #[tokio::test]
    async fn remaining_is_never_zero_inside_window() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let start = epoch();

        check_and_stamp_at(&db, user(), "kiss", WINDOW, start).await?;
        let status = check_and_stamp_at(&db, user(), "kiss", WINDOW, start + TimeDelta::milliseconds(4999)).await?;

        assert_eq!(status, CooldownStatus::Throttled {remaining_secs: 1});
        Ok(())
    }

    #[tokio::test]
    async fn commands_and_users_are_independent() -> Result<()> {
        let db = Database::open_in_memory().await?;
        let now = epoch();

        check_and_stamp_at(&db, user(), "hug", WINDOW, now).await?;

        assert_eq!(check_and_stamp_at(&db, user(), "kiss", WINDOW, now).await?, CooldownStatus::Allowed);
        assert_eq!(check_and_stamp_at(&db, UserId::new(78), "hug", WINDOW, now).await?, CooldownStatus::Allowed);
        Ok(())
    }
}
