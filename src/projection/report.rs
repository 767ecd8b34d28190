//! Structured projection view handed to whatever renders it.

use serde::{Deserialize, Serialize};

use super::{
    alerts::{alert_hits, final_balance, AlertHit},
    ledger::{compute_weekly_totals, WeeklyTotals},
    periods::{
        build_periods, row_period_sums, summarize_periods, Granularity, Period, PeriodBalance,
    },
};
use crate::{
    config::Settings,
    model::{CashFlowRow, ForecastModel, Section},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowView {
    pub section: Section,
    pub id: String,
    pub name: String,
    pub is_adjustment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<String>,
    /// One cell per week when expanded, one per period when collapsed.
    pub cells: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionReport {
    pub granularity: Granularity,
    pub collapsed: bool,
    pub alert_threshold: f64,
    pub final_eop: f64,
    pub alerts: Vec<AlertHit>,
    pub periods: Vec<Period>,
    pub balances: Vec<PeriodBalance>,
    pub totals: WeeklyTotals,
    pub rows: Vec<RowView>,
}

impl ProjectionReport {
    /// Whether row cells are per week rather than per period.
    pub fn is_expanded(&self) -> bool {
        !self.collapsed || self.granularity == Granularity::Week
    }
}

/// Runs the full read side of the engine for one snapshot and view settings.
pub fn build_report(model: &ForecastModel, settings: &Settings) -> ProjectionReport {
    let totals = compute_weekly_totals(model);
    let periods = build_periods(model, settings.granularity);
    let balances = summarize_periods(&periods, &totals);
    let alerts = alert_hits(model, &totals, settings.alert_threshold);
    let final_eop = final_balance(model, &totals).unwrap_or(0.0);
    let expanded = !settings.collapsed || settings.granularity == Granularity::Week;

    let rows = [Section::Positives, Section::Negatives]
        .into_iter()
        .flat_map(|section| {
            model
                .rows(section)
                .iter()
                .map(move |row| (section, row))
        })
        .map(|(section, row)| row_view(section, row, &periods, expanded))
        .collect();

    ProjectionReport {
        granularity: settings.granularity,
        collapsed: settings.collapsed,
        alert_threshold: settings.alert_threshold,
        final_eop,
        alerts,
        periods,
        balances,
        totals,
        rows,
    }
}

fn row_view(section: Section, row: &CashFlowRow, periods: &[Period], expanded: bool) -> RowView {
    let cells = if expanded {
        periods
            .iter()
            .flat_map(|period| period.weeks.iter())
            .map(|week_id| row.value(week_id))
            .collect()
    } else {
        row_period_sums(row, periods)
    };
    RowView {
        section,
        id: row.id.clone(),
        name: row.name.clone(),
        is_adjustment: row.is_adjustment,
        recurrence: row.recur.map(|rule| rule.label()),
        cells,
    }
}
