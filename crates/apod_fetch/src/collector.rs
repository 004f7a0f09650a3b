use apod_core::dates::{self, format_date};
use apod_core::{Apod, ApodConfig, ApodResponse, Fetcher, Gallery};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Walks the "on this day" dates one request at a time and gathers the results.
pub struct GalleryCollector {
    fetcher: Arc<dyn Fetcher>,
    throttle: Duration,
    floor: NaiveDate,
}

impl GalleryCollector {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &ApodConfig) -> Self {
        Self {
            fetcher,
            throttle: config.throttle,
            floor: config.floor,
        }
    }

    pub fn dates_for(&self, day: NaiveDate) -> Vec<NaiveDate> {
        dates::dates_on_this_day(day, self.floor)
    }

    pub async fn collect_for(&self, day: NaiveDate) -> Gallery {
        let dates = self.dates_for(day);
        self.collect(day, dates).await
    }

    /// Fetches `dates` in order, pausing for the throttle after every request.
    pub async fn collect(&self, day: NaiveDate, dates: Vec<NaiveDate>) -> Gallery {
        info!(
            "🔭 Fetching {} entries for {} from {}",
            dates.len(),
            dates::month_day_label(day),
            self.fetcher.source()
        );

        let mut entries = Vec::with_capacity(dates.len());
        let mut failed = 0;

        for date in &dates {
            match self.fetcher.fetch(&format_date(*date)).await {
                ApodResponse::Record(apod) => entries.push(apod),
                ApodResponse::Error(_) => failed += 1,
            }
            sleep(self.throttle).await;
        }

        sort_newest_first(&mut entries);
        info!("✨ Collected {} entries, {} failed", entries.len(), failed);

        Gallery {
            day,
            attempted: dates,
            failed,
            entries,
        }
    }
}

/// Orders entries by date, newest first. Entries with an unreadable date go
/// last, in the order they arrived.
pub fn sort_newest_first(entries: &mut [Apod]) {
    entries.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
}
