//! Fills empty weekly cells from each row's recurrence rule.

use chrono::Datelike;
use tracing::debug;

use crate::model::{CashFlowRow, ForecastModel, Recurrence, Week};

/// Writes recurrence amounts into every zero-valued cell the rule hits.
///
/// The model is borrowed exclusively for the whole call and mutated in place.
/// Non-zero cells are never touched, so repeated calls are idempotent and keep
/// manual edits. A cell manually set to zero cannot be told apart from an
/// untouched one and is refilled.
///
/// The monthly anchor is the day-of-month of the first week's start. Returns
/// the number of cells written.
pub fn materialize(model: &mut ForecastModel) -> usize {
    let Some(first) = model.weeks.first() else {
        return 0;
    };
    let anchor_day = first.start.day();
    let weeks = &model.weeks;

    let mut filled = 0;
    for row in model
        .positives
        .iter_mut()
        .chain(model.negatives.iter_mut())
    {
        filled += fill_row(row, weeks, anchor_day);
    }
    debug!(filled, anchor_day, "materialized recurrences");
    filled
}

fn fill_row(row: &mut CashFlowRow, weeks: &[Week], anchor_day: u32) -> usize {
    let Some(rule) = row.recur else {
        return 0;
    };
    let amount = rule.amount();

    let mut filled = 0;
    for (index, week) in weeks.iter().enumerate() {
        if row.value(&week.id) != 0.0 {
            continue;
        }
        if hits_week(&rule, index, week, anchor_day) {
            row.set_value(week.id.clone(), amount);
            if amount != 0.0 {
                filled += 1;
            }
        } else {
            row.set_value(week.id.clone(), 0.0);
        }
    }
    filled
}

/// Whether `rule` places an amount in the week at zero-based position `index`.
pub fn hits_week(rule: &Recurrence, index: usize, week: &Week, anchor_day: u32) -> bool {
    match *rule {
        Recurrence::Weekly { .. } => true,
        Recurrence::Biweekly { .. } => index % 2 == 0,
        Recurrence::Monthly { .. } => is_monthly_hit(week, anchor_day),
        Recurrence::Custom { every, .. } => index % every.max(1) as usize == 0,
    }
}

/// True when any day of the week falls on `anchor_day` of its month.
pub fn is_monthly_hit(week: &Week, anchor_day: u32) -> bool {
    week.days().any(|day| day.day() == anchor_day)
}
