#![allow(dead_code)]

use cashflow_core::{
    model::{CashFlowRow, FlowType, ForecastModel, Recurrence, Week},
    projection::week_grid,
};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Empty model over the weeks covering `start..=end`.
pub fn model_for(bop0: f64, start: &str, end: &str) -> ForecastModel {
    let weeks = week_grid::generate_from_range(start, end).expect("valid range");
    ForecastModel::new(bop0, weeks)
}

/// Empty model with `count` weeks starting Monday 2024-01-01.
pub fn model_with_weeks(bop0: f64, count: usize) -> ForecastModel {
    let weeks: Vec<Week> = (0..count)
        .map(|index| date(2024, 1, 1) + chrono::Duration::weeks(index as i64))
        .enumerate()
        .map(|(index, start)| Week::at(index, start).expect("representable week"))
        .collect();
    ForecastModel::new(bop0, weeks)
}

pub fn inflow(model: &ForecastModel, id: &str, rule: Option<Recurrence>) -> CashFlowRow {
    let row = CashFlowRow::new(id, id, FlowType::Inflow, &model.weeks);
    match rule {
        Some(rule) => row.with_recurrence(rule),
        None => row,
    }
}

pub fn outflow(model: &ForecastModel, id: &str, rule: Option<Recurrence>) -> CashFlowRow {
    let row = CashFlowRow::new(id, id, FlowType::Outflow, &model.weeks);
    match rule {
        Some(rule) => row.with_recurrence(rule),
        None => row,
    }
}

/// Zero-based positions of the weeks where `row` holds a non-zero amount.
pub fn filled_positions(model: &ForecastModel, row: &CashFlowRow) -> Vec<usize> {
    model
        .weeks
        .iter()
        .enumerate()
        .filter(|(_, week)| row.value(&week.id) != 0.0)
        .map(|(index, _)| index)
        .collect()
}
