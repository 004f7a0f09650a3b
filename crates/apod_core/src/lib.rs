pub mod config;
pub mod dates;
pub mod error;
pub mod fetcher;
pub mod types;

pub use config::ApodConfig;
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use types::{Apod, ApodError, ApodResponse, Gallery, MediaType};
