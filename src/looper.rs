use std::{sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;

/// A task run on a fixed interval for the life of the process.
#[poise::async_trait]
pub trait Looper {
    const NAME: &'static str;
    const MILLIS: u64;

    async fn loop_func(&self) -> anyhow::Result<()>;

    async fn start(self: Arc<Self>) where Self: Sync {
        tracing::info!("{} started, running every {}ms", Self::NAME, Self::MILLIS);

        let mut interval = tokio::time::interval(Duration::from_millis(Self::MILLIS));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if let Err(err) = self.loop_func().await {
                tracing::error!("{} Error: {:?}", Self::NAME, err);
            }
        }
    }
}
