use chrono::NaiveDate;
use std::time::Duration;
use url::Url;

use crate::dates;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";
pub const API_KEY_ENV: &str = "NASA_API_KEY";
/// Public key the API accepts with a low rate limit.
pub const DEMO_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(300);
/// How long an upstream response may be reused, in seconds.
pub const UPSTREAM_MAX_AGE_SECS: u64 = 24 * 60 * 60;
/// How long a rendered page may be reused, in seconds.
pub const PAGE_MAX_AGE_SECS: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct ApodConfig {
    pub api_key: String,
    pub base_url: Url,
    /// Pause after every upstream request.
    pub throttle: Duration,
    /// Earliest date requested when walking back through the years.
    pub floor: NaiveDate,
}

impl ApodConfig {
    /// Missing or blank keys fall back to the demo key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key_or_demo(api_key),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn uses_demo_key(&self) -> bool {
        self.api_key == DEMO_API_KEY
    }
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            base_url: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"),
            throttle: DEFAULT_THROTTLE,
            floor: dates::service_inception(),
        }
    }
}

fn api_key_or_demo(api_key: Option<String>) -> String {
    match api_key {
        Some(key) if !key.trim().is_empty() => key.trim().to_string(),
        _ => {
            tracing::debug!("No {} set, using {}", API_KEY_ENV, DEMO_API_KEY);
            DEMO_API_KEY.to_string()
        }
    }
}
