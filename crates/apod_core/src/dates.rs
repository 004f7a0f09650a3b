use chrono::{Datelike, NaiveDate};

use crate::{Error, Result};

/// Wire format for dates in requests and in the API's `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest day the remote service is known to have an entry for.
pub fn service_inception() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 6, 20).unwrap_or(NaiveDate::MIN)
}

/// Same month/day as `today` for every earlier year back to `floor`'s year,
/// newest first.
///
/// The floor year is only included when its month/day is not before `floor`.
/// When `today` is Feb 29, years without one use Feb 28.
pub fn dates_on_this_day(today: NaiveDate, floor: NaiveDate) -> Vec<NaiveDate> {
    let (month, day) = (today.month(), today.day());

    (floor.year()..today.year())
        .rev()
        .filter_map(|year| same_day_in(year, month, day))
        .filter(|date| *date >= floor)
        .collect()
}

fn same_day_in(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, day.saturating_sub(1)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("{}: {}", s, e)))
}

/// "October 17th" style label used in the page subtitle.
pub fn month_day_label(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{} {}{}", date.format("%B"), day, suffix)
}
