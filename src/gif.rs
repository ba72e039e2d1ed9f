use std::time::Duration;

use rand::seq::SliceRandom;
use serde::Deserialize;

const TENOR_SEARCH_URL: &str = "https://tenor.googleapis.com/v2/search";
const SEARCH_LIMIT: u8 = 20;
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a GIF could not be fetched, worded to be shown to the user as-is.
#[derive(Debug, thiserror::Error)]
pub enum GifError {
    #[error("Tenor API key not configured")]
    MissingApiKey,
    #[error("No GIFs found for this action")]
    NotFound,
    #[error("API Error: {0}")]
    Status(u16),
    #[error("Request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for GifError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[async_trait::async_trait]
pub trait GifSource: Send + Sync {
    /// Searches for `query`, returning the URL of one matching GIF.
    async fn search(&self, query: &str) -> Result<String, GifError>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    media_formats: MediaFormats,
}

#[derive(Deserialize)]
struct MediaFormats {
    gif: MediaObject,
}

#[derive(Deserialize)]
struct MediaObject {
    url: String,
}

pub struct TenorClient {
    reqwest: reqwest::Client,
    api_key: Option<String>,
}

impl TenorClient {
    #[must_use]
    pub fn new(reqwest: reqwest::Client, api_key: Option<String>) -> Self {
        Self {reqwest, api_key: api_key.filter(|k| !k.is_empty())}
    }
}

#[async_trait::async_trait]
impl GifSource for TenorClient {
    async fn search(&self, query: &str) -> Result<String, GifError> {
        let api_key = self.api_key.as_deref().ok_or(GifError::MissingApiKey)?;
        let limit = SEARCH_LIMIT.to_string();

        let response = self.reqwest
            .get(TENOR_SEARCH_URL)
            .query(&[
                ("q", query),
                ("key", api_key),
                ("limit", limit.as_str()),
                ("media_filter", "gif"),
                ("contentfilter", "medium"),
            ])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Tenor search for {query:?} failed with {status}");
            return Err(GifError::Status(status.as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        pick_url(body.results, &mut rand::thread_rng())
    }
}

fn pick_url(results: Vec<SearchResult>, rng: &mut impl rand::Rng) -> Result<String, GifError> {
    results
        .choose(rng)
        .map(|r| r.media_formats.gif.url.clone())
        .ok_or(GifError::NotFound)
}
