use apod_core::config::UPSTREAM_MAX_AGE_SECS;
use apod_core::{Apod, ApodConfig, ApodError, ApodResponse, Fetcher, Result};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

/// Why a single fetch did not produce an [`Apod`].
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("NASA API returned invalid JSON.")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Failed to parse API response.")]
    SchemaMismatch(#[source] serde_json::Error),
}

impl FetchError {
    /// Numeric code reported to callers: the upstream status, or 500.
    pub fn code(&self) -> u16 {
        match self {
            FetchError::Status { status, .. } => *status,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        FetchError::Transport(err.without_url())
    }
}

impl From<FetchError> for ApodError {
    fn from(err: FetchError) -> Self {
        ApodError::new(err.code(), err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ApodClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl ApodClient {
    pub const SOURCE: &'static str = "NASA APOD";

    pub fn new(config: &ApodConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("apod/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(http, config))
    }

    pub fn with_http_client(http: reqwest::Client, config: &ApodConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn request_url(&self, date: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("api_key", &self.api_key)
            .append_pair("date", date);
        url
    }

    /// One GET for `date`, with each failure kind kept apart.
    pub async fn try_fetch(&self, date: &str) -> std::result::Result<Apod, FetchError> {
        let response = self
            .http
            .get(self.request_url(date))
            .header(CACHE_CONTROL, format!("max-age={}", UPSTREAM_MAX_AGE_SECS))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_apod(&text)
    }
}

#[async_trait]
impl Fetcher for ApodClient {
    fn source(&self) -> &str {
        Self::SOURCE
    }

    async fn fetch(&self, date: &str) -> ApodResponse {
        match self.try_fetch(date).await {
            Ok(apod) => {
                debug!(date, title = %apod.title, "Fetched APOD");
                ApodResponse::Record(apod)
            }
            Err(err) => {
                log_failure(date, &err);
                ApodResponse::Error(err.into())
            }
        }
    }
}

/// Parses and validates a response body. An empty body counts as JSON `null`.
pub fn parse_apod(text: &str) -> std::result::Result<Apod, FetchError> {
    let value = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str::<Value>(text).map_err(FetchError::MalformedBody)?
    };
    serde_json::from_value(value).map_err(FetchError::SchemaMismatch)
}

fn log_failure(date: &str, err: &FetchError) {
    match err {
        FetchError::Transport(e) => error!(date, "Error fetching APOD: {}", e),
        FetchError::Status { status, body } => error!(date, status, "NASA API error: {}", body),
        FetchError::MalformedBody(e) => error!(date, "Invalid JSON from NASA API: {}", e),
        FetchError::SchemaMismatch(e) => error!(date, "APOD schema validation failed: {}", e),
    }
}
