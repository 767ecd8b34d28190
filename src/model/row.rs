use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{recurrence::Recurrence, week::Week};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowType {
    Inflow,
    Outflow,
}

/// A named income or expense line holding one amount per grid week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlowRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub flow: FlowType,
    #[serde(rename = "isAdjustment", default)]
    pub is_adjustment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recur: Option<Recurrence>,
    #[serde(default)]
    pub values: BTreeMap<String, f64>,
}

impl CashFlowRow {
    /// Creates a row with a zero value for every week of `weeks`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        flow: FlowType,
        weeks: &[Week],
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flow,
            is_adjustment: false,
            recur: None,
            values: zeroed_values(weeks),
        }
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recur = Some(recurrence.signed_for(self.flow));
        self
    }

    pub fn adjustment(mut self) -> Self {
        self.is_adjustment = true;
        self
    }

    /// Whether stored amounts must stay at or below zero.
    pub fn forces_negative(&self) -> bool {
        self.flow == FlowType::Outflow && !self.is_adjustment
    }

    /// Applies the row's sign convention to a manually entered amount.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.forces_negative() && value > 0.0 {
            -value
        } else {
            value
        }
    }

    /// Stored amount for a week; weeks missing from the map count as zero.
    pub fn value(&self, week_id: &str) -> f64 {
        self.values.get(week_id).copied().unwrap_or(0.0)
    }

    pub fn set_value(&mut self, week_id: impl Into<String>, value: f64) {
        self.values.insert(week_id.into(), value);
    }

    /// Replaces the value map with zeros keyed by the new grid.
    pub fn reset_values(&mut self, weeks: &[Week]) {
        self.values = zeroed_values(weeks);
    }

    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }
}

fn zeroed_values(weeks: &[Week]) -> BTreeMap<String, f64> {
    weeks.iter().map(|week| (week.id.clone(), 0.0)).collect()
}
