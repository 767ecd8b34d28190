//! Builds the ordered weekly columns a projection is laid out on.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::{
    errors::{ForecastError, Result},
    model::week::{end_of_week, parse_date, start_of_week, Week, DAYS_PER_WEEK},
};

pub const DEFAULT_WEEK_COUNT: usize = 26;

/// Lays out `count` weeks starting on the first Monday after the week containing `today`.
pub fn generate_default(today: NaiveDate, count: usize) -> Result<Vec<Week>> {
    let out_of_range = || ForecastError::InvalidDate(today.to_string());
    let first = start_of_week(today)
        .and_then(|monday| monday.checked_add_signed(Duration::days(DAYS_PER_WEEK)))
        .ok_or_else(out_of_range)?;
    // Reject grids running off the calendar before building any of them.
    if let Some(last_index) = count.checked_sub(1) {
        week_at(first, last_index).ok_or_else(out_of_range)?;
    }
    debug!(%today, %first, count, "generating default week grid");
    (0..count)
        .map(|index| week_at(first, index).ok_or_else(out_of_range))
        .collect()
}

fn week_at(first: NaiveDate, index: usize) -> Option<Week> {
    let offset = i64::try_from(index).ok().and_then(Duration::try_weeks)?;
    Week::at(index, first.checked_add_signed(offset)?)
}

/// Parses both bounds and covers them with whole Monday-to-Sunday weeks.
pub fn generate_from_range(start: &str, end: &str) -> Result<Vec<Week>> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    weeks_between(start, end)
}

/// Snaps `start` down to its Monday and `end` up to its Sunday, then emits every week in between.
pub fn weeks_between(start: NaiveDate, end: NaiveDate) -> Result<Vec<Week>> {
    let unsnappable = |date: NaiveDate| ForecastError::InvalidDate(date.to_string());
    let first = start_of_week(start).ok_or_else(|| unsnappable(start))?;
    let last = end_of_week(end).ok_or_else(|| unsnappable(end))?;
    if last < first {
        return Err(ForecastError::InvalidRange { start, end });
    }

    let mut weeks = Vec::new();
    let mut cursor = Some(first);
    // `last` is a Sunday, so every Monday up to it has a representable week end.
    while let Some(monday) = cursor.filter(|monday| *monday <= last) {
        weeks.push(Week::at(weeks.len(), monday).ok_or_else(|| unsnappable(monday))?);
        cursor = monday.checked_add_signed(Duration::weeks(1));
    }
    debug!(%first, %last, weeks = weeks.len(), "generated week grid from range");
    Ok(weeks)
}
