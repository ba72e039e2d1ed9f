use std::{collections::HashMap, fmt::Write, sync::Arc, borrow::Cow};

use parking_lot::Mutex;
use anyhow::Result;
use tracing_subscriber::{layer, Layer};

use crate::serenity;

type LogMessage = (&'static str, String);

const MAX_MESSAGE_LEN: usize = 2000;

/// Mirrors tracing events into Discord webhooks, batched by [`crate::Looper`].
pub struct WebhookLogger {
    http: Arc<serenity::Http>,
    log_prefix: &'static str,
    webhook_name: &'static str,
    max_verbosity: tracing::Level,
    level_lookup: HashMap<tracing::Level, String>,

    pending_logs: Mutex<HashMap<tracing::Level, Vec<LogMessage>>>,

    normal_logs: serenity::Webhook,
    error_logs: serenity::Webhook,
}

impl WebhookLogger {
    pub fn new(
        http: Arc<serenity::Http>,
        log_prefix: &'static str,
        webhook_name: &'static str,
        max_verbosity: tracing::Level,
        normal_logs: serenity::Webhook,
        error_logs: serenity::Webhook,
    ) -> ArcWrapper<Self> {
        let level_lookup = HashMap::from_iter([
            (tracing::Level::TRACE, 1),
            (tracing::Level::DEBUG, 1),
            (tracing::Level::INFO, 0),
            (tracing::Level::WARN, 3),
            (tracing::Level::ERROR, 4),
        ].map(|(level, value)| (level, format!("https://cdn.discordapp.com/embed/avatars/{value}.png"))));

        ArcWrapper(Arc::new(Self {
            http, max_verbosity, level_lookup, normal_logs, error_logs, webhook_name, log_prefix,
            pending_logs: Mutex::default(),
        }))
    }

    fn should_forward(&self, metadata: &tracing::Metadata<'_>) -> bool {
        // Ordered by verbosity
        if metadata.target().starts_with(self.log_prefix) {
            self.max_verbosity >= *metadata.level()
        } else {
            tracing::Level::WARN >= *metadata.level()
        }
    }
}

/// Formats a batch as `[target]: line` rows packed into webhook sized chunks.
fn chunk_logs(messages: Vec<LogMessage>) -> Vec<String> {
    let pre_chunked: String = messages
        .into_iter()
        .map(|(target, log_message)| {
            log_message.trim().split('\n').map(move |line| {
                format!("`[{target}]`: {line}\n")
            }).collect::<String>()
        })
        .collect();

    let mut chunks: Vec<Cow<'_, str>> = Vec::new();
    for line in pre_chunked.split_inclusive('\n') {
        if let Some(chunk) = chunks.last_mut() {
            if chunk.len() + line.len() > MAX_MESSAGE_LEN {
                chunks.push(Cow::Borrowed(line));
            } else {
                chunk.to_mut().push_str(line);
            }
        } else {
            chunks.push(Cow::Borrowed(line));
        }
    }

    chunks.into_iter().map(Cow::into_owned).collect()
}

#[serenity::async_trait]
impl crate::looper::Looper for WebhookLogger {
    const NAME: &'static str = "Logging";
    const MILLIS: u64 = 1100;

    async fn loop_func(&self) -> Result<()> {
        let pending_logs = self.pending_logs.lock().drain().collect::<HashMap<_, _>>();

        for (severity, messages) in pending_logs {
            let webhook = if tracing::Level::ERROR >= severity {
                &self.error_logs
            } else {
                &self.normal_logs
            };

            let webhook_name = format!("{} [{}]", self.webhook_name, severity.as_str());
            let avatar_url = self.level_lookup.get(&severity).cloned().unwrap_or_else(|| String::from(
                "https://cdn.discordapp.com/embed/avatars/5.png",
            ));

            for chunk in chunk_logs(messages) {
                let builder = serenity::ExecuteWebhook::new()
                    .content(chunk)
                    .username(webhook_name.clone())
                    .avatar_url(avatar_url.clone());

                webhook.execute(&*self.http, false, builder).await?;
            }
        }

        Ok(())
    }
}

impl<S: tracing::Subscriber> Layer<S> for ArcWrapper<WebhookLogger> {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: layer::Context<'_, S>) {
        pub struct StringVisitor<'a> {
            string: &'a mut String,
        }

        impl<'a> tracing::field::Visit for StringVisitor<'a> {
            fn record_debug(&mut self, _field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                let _ = write!(self.string, "{value:?}");
            }

            fn record_str(&mut self, _field: &tracing::field::Field, value: &str) {
                self.string.push_str(value);
            }
        }

        let metadata = event.metadata();
        if !self.should_forward(metadata) {
            return;
        }

        let mut message = String::new();
        event.record(&mut StringVisitor {string: &mut message});

        self.pending_logs
            .lock()
            .entry(*metadata.level())
            .or_insert_with(Vec::new)
            .push((metadata.target(), message));
    }
}

// So we can impl Layer for Arc<WebhookLogger>
pub struct ArcWrapper<T>(pub Arc<T>);
impl<T> Clone for ArcWrapper<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::ops::Deref for ArcWrapper<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
