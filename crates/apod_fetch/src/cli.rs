use apod_core::dates::{self, format_date, parse_date};
use apod_core::{ApodConfig, Fetcher, Result};
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use std::io::Write;

#[derive(Subcommand, Debug, Clone)]
pub enum FetchCommands {
    /// Fetch the entry for a single date and print it as JSON
    Fetch {
        /// Date to fetch, as YYYY-MM-DD
        date: String,
    },
    /// List the dates an "on this day" page requests
    Dates {
        /// Anchor day as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

pub async fn handle_command<W: Write>(
    command: FetchCommands,
    fetcher: &dyn Fetcher,
    config: &ApodConfig,
    out: &mut W,
) -> Result<()> {
    match command {
        FetchCommands::Fetch { date } => {
            let date = parse_date(&date)?;
            let response = fetcher.fetch(&format_date(date)).await;
            writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        }
        FetchCommands::Dates { date } => {
            let day = anchor_day(date.as_deref())?;
            for date in dates::dates_on_this_day(day, config.floor) {
                writeln!(out, "{}", format_date(date))?;
            }
        }
    }
    Ok(())
}

/// The day a page is built for: the given `YYYY-MM-DD`, or today's local date.
pub fn anchor_day(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(date) => parse_date(date),
        None => Ok(Local::now().date_naive()),
    }
}
