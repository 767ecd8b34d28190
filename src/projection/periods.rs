//! Groups grid weeks into week, month, quarter or year buckets.

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::ledger::WeeklyTotals;
use crate::{
    errors::{ForecastError, Result},
    model::{CashFlowRow, ForecastModel, Week},
};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl FromStr for Granularity {
    type Err = ForecastError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "WEEK" => Ok(Granularity::Week),
            "MONTH" => Ok(Granularity::Month),
            "QUARTER" => Ok(Granularity::Quarter),
            "YEAR" => Ok(Granularity::Year),
            _ => Err(ForecastError::InvalidGranularity(raw.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Week => "Week",
            Granularity::Month => "Month",
            Granularity::Quarter => "Quarter",
            Granularity::Year => "Year",
        };
        f.write_str(label)
    }
}

/// A display bucket and the grid weeks that belong to it, in grid order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    pub id: String,
    pub label: String,
    pub weeks: Vec<String>,
}

/// Partitions the grid into periods keyed by each week's start date.
///
/// Periods come out in the order their key is first seen, which is
/// chronological because the grid is.
pub fn build_periods(model: &ForecastModel, granularity: Granularity) -> Vec<Period> {
    let mut periods: Vec<Period> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for week in &model.weeks {
        let (key, label) = period_key(week, granularity);
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            periods.push(Period {
                id: key,
                label,
                weeks: Vec::new(),
            });
            periods.len() - 1
        });
        periods[position].weeks.push(week.id.clone());
    }

    periods
}

/// Grouping key and display label of the period `week` falls into.
fn period_key(week: &Week, granularity: Granularity) -> (String, String) {
    let start = week.start;
    match granularity {
        Granularity::Week => (week.id.clone(), week.label()),
        Granularity::Month => (
            format!("{}-{:02}", start.year(), start.month()),
            start.format("%b %y").to_string(),
        ),
        Granularity::Quarter => {
            let key = format!("{}-Q{}", start.year(), (start.month() - 1) / 3 + 1);
            (key.clone(), key)
        }
        Granularity::Year => {
            let key = start.year().to_string();
            (key.clone(), key)
        }
    }
}

/// Balance rollup for one period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodBalance {
    pub period_id: String,
    pub label: String,
    /// Opening balance of the period's first week.
    pub bop: f64,
    pub pos: f64,
    pub neg: f64,
    pub net: f64,
    /// Closing balance of the period's last week.
    pub eop: f64,
}

pub fn summarize_periods(periods: &[Period], totals: &WeeklyTotals) -> Vec<PeriodBalance> {
    periods
        .iter()
        .filter_map(|period| {
            let first = period.weeks.first().and_then(|id| totals.get(id))?;
            let last = period.weeks.last().and_then(|id| totals.get(id))?;
            let (pos, neg) = period
                .weeks
                .iter()
                .filter_map(|id| totals.get(id))
                .fold((0.0, 0.0), |(pos, neg), week| (pos + week.pos, neg + week.neg));
            Some(PeriodBalance {
                period_id: period.id.clone(),
                label: period.label.clone(),
                bop: first.bop,
                pos,
                neg,
                net: pos + neg,
                eop: last.eop,
            })
        })
        .collect()
}

/// Sums a row's values inside each period.
pub fn row_period_sums(row: &CashFlowRow, periods: &[Period]) -> Vec<f64> {
    periods
        .iter()
        .map(|period| period.weeks.iter().map(|id| row.value(id)).sum())
        .collect()
}
