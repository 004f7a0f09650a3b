use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates;

/// A validated Astronomy Picture of the Day entry.
///
/// Field names follow the remote API's JSON body. Fields the API sends that are
/// not listed here are ignored during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub date: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    pub media_type: MediaType,
    pub service_version: String,
    pub title: String,
    pub url: String,
}

impl Apod {
    /// The entry's date, if the remote sent a well-formed `YYYY-MM-DD` string.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        dates::parse_date(&self.date).ok()
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }

    /// Link target for the card image: the high-res URL when the API has one.
    pub fn full_resolution_url(&self) -> &str {
        self.hdurl.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

/// Failure value returned in place of an [`Apod`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodError {
    pub code: u16,
    pub msg: String,
}

impl ApodError {
    pub fn new(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
        }
    }
}

impl fmt::Display for ApodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.msg)
    }
}

/// Outcome of one fetch. On the wire the error variant is the object carrying a
/// `code` field, so it has to be tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApodResponse {
    Error(ApodError),
    Record(Apod),
}

impl ApodResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, ApodResponse::Error(_))
    }

    pub fn into_result(self) -> std::result::Result<Apod, ApodError> {
        match self {
            ApodResponse::Record(apod) => Ok(apod),
            ApodResponse::Error(err) => Err(err),
        }
    }
}

impl From<Apod> for ApodResponse {
    fn from(apod: Apod) -> Self {
        ApodResponse::Record(apod)
    }
}

impl From<ApodError> for ApodResponse {
    fn from(err: ApodError) -> Self {
        ApodResponse::Error(err)
    }
}

/// Everything the "on this day" page shows for one anchor day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub day: NaiveDate,
    pub attempted: Vec<NaiveDate>,
    pub failed: usize,
    /// Successful entries, newest first.
    pub entries: Vec<Apod>,
}

impl Gallery {
    pub fn attempted_count(&self) -> usize {
        self.attempted.len()
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
