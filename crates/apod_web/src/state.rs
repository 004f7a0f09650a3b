use apod_fetch::GalleryCollector;
use chrono::{Local, NaiveDate};

pub struct AppState {
    pub collector: GalleryCollector,
    /// Serve this day instead of the server's local date.
    pub fixed_day: Option<NaiveDate>,
}

impl AppState {
    pub fn new(collector: GalleryCollector) -> Self {
        Self {
            collector,
            fixed_day: None,
        }
    }

    pub fn with_fixed_day(mut self, day: NaiveDate) -> Self {
        self.fixed_day = Some(day);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_day.unwrap_or_else(|| Local::now().date_naive())
    }
}
