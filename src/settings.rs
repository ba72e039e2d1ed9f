use serde::Deserialize;

fn default_database_url() -> String {
    String::from("sqlite://config.db")
}

fn default_log_level() -> String {
    String::from("info")
}

/// Process configuration, read once from the environment (and `.env`) at startup.
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub discord_bot_token: String,
    pub tenor_api_key: Option<String>,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    pub log_webhook_url: Option<String>,
    pub error_webhook_url: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("discord_bot_token", &"<redacted>")
            .field("tenor_api_key", &self.tenor_api_key.as_ref().map(|_| "<redacted>"))
            .field("database_url", &self.database_url)
            .field("log_webhook_url", &self.log_webhook_url.is_some())
            .field("error_webhook_url", &self.error_webhook_url.is_some())
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    pub fn from_source(source: impl config::Source + Send + Sync + 'static) -> anyhow::Result<Self> {
        let settings: Self = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
            .map_err(|err| anyhow::anyhow!("Invalid configuration: {err}. Is DISCORD_BOT_TOKEN set?"))?;

        anyhow::ensure!(!settings.discord_bot_token.trim().is_empty(), "DISCORD_BOT_TOKEN is set but empty");
        Ok(settings)
    }

    pub fn from_env() -> anyhow::Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!("Not loading .env file: {err}");
        }

        Self::from_source(config::Environment::default().try_parsing(false))
    }

    /// The webhook pair for mirroring logs, only if both are configured.
    #[must_use]
    pub fn webhooks(&self) -> Option<(&str, &str)> {
        Some((self.log_webhook_url.as_deref()?, self.error_webhook_url.as_deref()?))
    }
}
