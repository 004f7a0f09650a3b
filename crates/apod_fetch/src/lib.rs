pub mod cli;
pub mod client;
pub mod collector;
pub mod logging;

pub use cli::{handle_command, FetchCommands};
pub use client::{ApodClient, FetchError};
pub use collector::GalleryCollector;

pub mod prelude {
    pub use super::client::ApodClient;
    pub use super::collector::GalleryCollector;
    pub use apod_core::{Apod, ApodConfig, ApodResponse, Error, Fetcher, Gallery, Result};
}
