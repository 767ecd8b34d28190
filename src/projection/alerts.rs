//! Threshold checks over the balance chain.

use serde::{Deserialize, Serialize};

use super::ledger::WeeklyTotals;
use crate::model::{ForecastModel, Week};

/// Weeks whose closing balance is strictly below `threshold`, in grid order.
pub fn find_breaches<'a>(
    model: &'a ForecastModel,
    totals: &WeeklyTotals,
    threshold: f64,
) -> Vec<&'a Week> {
    model
        .weeks
        .iter()
        .filter(|week| {
            totals
                .get(&week.id)
                .is_some_and(|week_totals| week_totals.eop < threshold)
        })
        .collect()
}

/// Closing balance of the last grid week, or `None` for an empty grid.
pub fn final_balance(model: &ForecastModel, totals: &WeeklyTotals) -> Option<f64> {
    let last = model.weeks.last()?;
    totals.get(&last.id).map(|week_totals| week_totals.eop)
}

/// One breached week, shaped for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertHit {
    pub week_id: String,
    pub label: String,
    pub eop: f64,
}

pub fn alert_hits(model: &ForecastModel, totals: &WeeklyTotals, threshold: f64) -> Vec<AlertHit> {
    find_breaches(model, totals, threshold)
        .into_iter()
        .filter_map(|week| {
            totals.get(&week.id).map(|week_totals| AlertHit {
                week_id: week.id.clone(),
                label: week.label(),
                eop: week_totals.eop,
            })
        })
        .collect()
}
