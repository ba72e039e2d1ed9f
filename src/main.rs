use std::{str::FromStr, sync::Arc};

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter, Layer as _};

use reactbot::{
    commands, database::Database, dispatch, errors, gif::TenorClient, heartbeat::Heartbeat,
    logging::{ArcWrapper, WebhookLogger}, router, serenity, settings::Settings, Data, Looper,
};

async fn webhook_logger(settings: &Settings, max_verbosity: tracing::Level) -> Result<Option<ArcWrapper<WebhookLogger>>> {
    let Some((normal_url, error_url)) = settings.webhooks() else {return Ok(None)};

    let http = Arc::new(serenity::Http::new(""));
    let normal_logs = serenity::Webhook::from_url(&*http, normal_url).await?;
    let error_logs = serenity::Webhook::from_url(&*http, error_url).await?;

    Ok(Some(WebhookLogger::new(http, "reactbot", "Auto-React Bot", max_verbosity, normal_logs, error_logs)))
}

async fn init_logging(settings: &Settings) -> Result<()> {
    let max_verbosity = tracing::Level::from_str(&settings.log_level).unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,reactbot={max_verbosity}")));

    let webhook_logger = webhook_logger(settings, max_verbosity).await?;
    if let Some(logger) = &webhook_logger {
        tokio::spawn(Arc::clone(&logger.0).start());
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .with(webhook_logger)
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    init_logging(&settings).await?;
    tracing::debug!("Loaded {settings:?}");

    let db = Database::open(&settings.database_url).await?;
    let reqwest = reqwest::Client::new();
    let gifs = Arc::new(TenorClient::new(reqwest, settings.tenor_api_key.clone()));
    if settings.tenor_api_key.is_none() {
        tracing::warn!("TENOR_API_KEY is not set, GIF commands will report an error");
    }

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(errors::on_error(error)),
            event_handler: |ctx, event, framework, data| Box::pin(router::event_handler(ctx, event, framework, data)),
            prefix_options: dispatch::prefix_options(),
            ..Default::default()
        })
        .setup(move |ctx, _ready, _framework| Box::pin(async move {
            tokio::spawn(Arc::new(Heartbeat::new(ctx.cache.clone())).start());
            Ok(Data {db, gifs})
        }))
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MESSAGES;

    let mut client = serenity::ClientBuilder::new(&settings.discord_bot_token, intents)
        .framework(framework)
        .await?;

    if let Err(err) = client.start().await {
        let message = errors::describe_client_error(&err);
        tracing::error!("{message}");
        anyhow::bail!(message);
    }

    Ok(())
}
