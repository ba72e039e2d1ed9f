use std::sync::{atomic::{AtomicU64, Ordering}, Arc};

use anyhow::Result;

use crate::serenity;

/// Periodic liveness log, reads the gateway cache and touches nothing else.
pub struct Heartbeat {
    cache: Arc<serenity::Cache>,
    beats: AtomicU64,
}

impl Heartbeat {
    #[must_use]
    pub fn new(cache: Arc<serenity::Cache>) -> Self {
        Self {cache, beats: AtomicU64::new(0)}
    }
}

#[serenity::async_trait]
impl crate::Looper for Heartbeat {
    const NAME: &'static str = "Heartbeat";
    const MILLIS: u64 = 1000 * 60 * 5;

    async fn loop_func(&self) -> Result<()> {
        let beat = self.beats.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(
            "Keep alive ping #{beat}: serving {} guilds with {} users",
            self.cache.guild_count(),
            self.cache.user_count(),
        );

        Ok(())
    }
}
