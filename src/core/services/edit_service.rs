//! Structural edits on a forecast model. Every mutation re-materializes
//! recurrences before returning so the snapshot is ready to persist.

use tracing::info;
use uuid::Uuid;

use crate::{
    errors::{ForecastError, Result},
    model::{CashFlowRow, ForecastModel, Recurrence, Section},
    projection::{materialize, week_grid},
};

/// Input for a new row. The row's type follows the section it is added to.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRow {
    pub name: String,
    pub recurrence: Option<Recurrence>,
    pub adjustment: bool,
}

impl NewRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            recurrence: None,
            adjustment: false,
        }
    }

    pub fn recurring(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }

    pub fn adjustment(mut self) -> Self {
        self.adjustment = true;
        self
    }
}

/// Applies user edits while keeping row values aligned with the grid and signs normalized.
pub struct EditService;

impl EditService {
    /// Stores a manual amount for one cell. Non-adjustment outflows are forced negative.
    pub fn edit_cell(
        model: &mut ForecastModel,
        section: Section,
        row_id: &str,
        week_id: &str,
        value: f64,
    ) -> Result<f64> {
        ensure_finite(value)?;
        if model.week(week_id).is_none() {
            return Err(ForecastError::WeekNotFound(week_id.to_string()));
        }
        let row = model
            .row_mut(section, row_id)
            .ok_or_else(|| ForecastError::RowNotFound(row_id.to_string()))?;
        let stored = row.normalize(value);
        row.set_value(week_id, stored);
        info!(%section, row_id, week_id, stored, "cell edited");
        materialize(model);
        Ok(stored)
    }

    /// Appends a row with zeroed values and returns its generated id.
    pub fn add_row(model: &mut ForecastModel, section: Section, new_row: NewRow) -> Result<String> {
        if let Some(rule) = &new_row.recurrence {
            ensure_finite(rule.amount())?;
        }
        let id = format!("row-{}", Uuid::new_v4().simple());
        let mut row = CashFlowRow::new(id.clone(), new_row.name, section.flow(), &model.weeks);
        if let Some(rule) = new_row.recurrence {
            row = row.with_recurrence(rule);
        }
        if new_row.adjustment && section == Section::Negatives {
            row = row.adjustment();
        }
        info!(%section, row_id = %id, name = %row.name, "row added");
        model.rows_mut(section).push(row);
        materialize(model);
        Ok(id)
    }

    /// Removes a row, returning it.
    pub fn delete_row(
        model: &mut ForecastModel,
        section: Section,
        row_id: &str,
    ) -> Result<CashFlowRow> {
        let rows = model.rows_mut(section);
        let position = rows
            .iter()
            .position(|row| row.id == row_id)
            .ok_or_else(|| ForecastError::RowNotFound(row_id.to_string()))?;
        let removed = rows.remove(position);
        info!(%section, row_id, "row deleted");
        materialize(model);
        Ok(removed)
    }

    /// Replaces a row's rule and refills the whole row from it, discarding manual edits.
    pub fn set_recurrence(
        model: &mut ForecastModel,
        section: Section,
        row_id: &str,
        recurrence: Recurrence,
    ) -> Result<()> {
        ensure_finite(recurrence.amount())?;
        let weeks = model.weeks.clone();
        let row = model
            .row_mut(section, row_id)
            .ok_or_else(|| ForecastError::RowNotFound(row_id.to_string()))?;
        row.recur = Some(recurrence.signed_for(row.flow));
        row.reset_values(&weeks);
        info!(%section, row_id, rule = %recurrence.label(), "recurrence set");
        materialize(model);
        Ok(())
    }

    /// Drops a row's rule; already materialized values stay in place.
    pub fn clear_recurrence(
        model: &mut ForecastModel,
        section: Section,
        row_id: &str,
    ) -> Result<bool> {
        let row = model
            .row_mut(section, row_id)
            .ok_or_else(|| ForecastError::RowNotFound(row_id.to_string()))?;
        let had_rule = row.recur.take().is_some();
        if had_rule {
            info!(%section, row_id, "recurrence cleared");
        }
        Ok(had_rule)
    }

    /// Regenerates the grid from a date range, zeroes every row against it and refills.
    pub fn apply_date_range(model: &mut ForecastModel, start: &str, end: &str) -> Result<()> {
        let weeks = week_grid::generate_from_range(start, end)?;
        info!(start, end, weeks = weeks.len(), "date range applied");
        model.remap_weeks(weeks);
        materialize(model);
        Ok(())
    }
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ForecastError::InvalidAmount(value))
    }
}
