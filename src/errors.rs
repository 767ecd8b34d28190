use chrono::NaiveDate;
use thiserror::Error;

/// Error type shared by the projection engine and its edit/settings boundary.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid range: {end} precedes {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Row not found: {0}")]
    RowNotFound(String),
    #[error("Week not found: {0}")]
    WeekNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
    #[error("Invalid section: {0}")]
    InvalidSection(String),
    #[error("Unknown recurrence kind: {0}")]
    UnknownRecurrence(String),
    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
