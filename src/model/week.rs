use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ForecastError, Result};

pub const DAYS_PER_WEEK: i64 = 7;

/// One column of the projection grid: seven consecutive days starting on a Monday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Week {
    pub id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Week {
    /// Builds the week at zero-based `index` in a grid starting on `start`.
    /// Returns `None` when the week would run past the last representable date.
    pub fn at(index: usize, start: NaiveDate) -> Option<Self> {
        let end = start.checked_add_signed(Duration::days(DAYS_PER_WEEK - 1))?;
        Some(Self {
            id: week_id(index + 1),
            start,
            end,
        })
    }

    /// Every calendar day covered by the week, Monday first.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..DAYS_PER_WEEK)
            .filter_map(move |offset| self.start.checked_add_signed(Duration::days(offset)))
    }

    /// Short label used for week columns and alert hits, e.g. `Mar 03`.
    pub fn label(&self) -> String {
        self.start.format("%b %d").to_string()
    }
}

/// Order-preserving identifier for the `position`-th week (1-based).
pub fn week_id(position: usize) -> String {
    format!("id{position:06}")
}

/// Monday on or before `date`, if the calendar reaches that far back.
pub fn start_of_week(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64))
}

/// Sunday on or after `date`, if the calendar reaches that far forward.
pub fn end_of_week(date: NaiveDate) -> Option<NaiveDate> {
    start_of_week(date)?.checked_add_signed(Duration::days(DAYS_PER_WEEK - 1))
}

/// Parses an ISO calendar date. A trailing time component (`2024-01-10T08:00`) is tolerated.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ForecastError::InvalidDate(raw.to_string()))
}
