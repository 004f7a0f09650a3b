use async_trait::async_trait;

use crate::types::ApodResponse;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns a short name for the upstream, used in log lines
    fn source(&self) -> &str;

    /// Fetches the entry for one `YYYY-MM-DD` date.
    ///
    /// Never fails: every problem is reported as an [`ApodResponse::Error`].
    async fn fetch(&self, date: &str) -> ApodResponse;
}
