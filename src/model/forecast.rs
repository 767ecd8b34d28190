use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    recurrence::Recurrence,
    row::{CashFlowRow, FlowType},
    week::Week,
};
use crate::{
    errors::{ForecastError, Result},
    projection::{materialize, week_grid},
    time::Clock,
};

pub const DEFAULT_OPENING_BALANCE: f64 = 1500.0;

/// Which half of the model a row lives in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Positives,
    Negatives,
}

impl Section {
    pub fn flow(self) -> FlowType {
        match self {
            Section::Positives => FlowType::Inflow,
            Section::Negatives => FlowType::Outflow,
        }
    }
}

impl FromStr for Section {
    type Err = ForecastError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positives" => Ok(Section::Positives),
            "negatives" => Ok(Section::Negatives),
            _ => Err(ForecastError::InvalidSection(raw.to_string())),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Positives => f.write_str("positives"),
            Section::Negatives => f.write_str("negatives"),
        }
    }
}

/// In-memory snapshot the engine projects: opening balance, week grid and rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastModel {
    pub bop0: f64,
    pub weeks: Vec<Week>,
    #[serde(default)]
    pub positives: Vec<CashFlowRow>,
    #[serde(default)]
    pub negatives: Vec<CashFlowRow>,
}

impl ForecastModel {
    pub fn new(bop0: f64, weeks: Vec<Week>) -> Self {
        Self {
            bop0,
            weeks,
            positives: Vec::new(),
            negatives: Vec::new(),
        }
    }

    /// Builds the starter model over `weeks` and materializes its recurrences.
    pub fn seed(weeks: Vec<Week>) -> Self {
        let mut model = Self::new(DEFAULT_OPENING_BALANCE, weeks);
        let grid = model.weeks.clone();
        let inflow = |id: &str, name: &str, rule: Recurrence| {
            CashFlowRow::new(id, name, FlowType::Inflow, &grid).with_recurrence(rule)
        };
        let outflow = |id: &str, name: &str, rule: Recurrence| {
            CashFlowRow::new(id, name, FlowType::Outflow, &grid).with_recurrence(rule)
        };

        model.positives = vec![
            inflow("sal", "Salary", Recurrence::Weekly { amount: 2000.0 }),
            inflow(
                "bon",
                "Bonus",
                Recurrence::Custom {
                    every: 13,
                    amount: 1000.0,
                },
            ),
        ];
        model.negatives = vec![
            outflow("mort", "Mortgage", Recurrence::Monthly { amount: -1200.0 }),
            outflow("kg", "Kindergarten", Recurrence::Weekly { amount: -200.0 }),
            outflow("gro", "Groceries", Recurrence::Weekly { amount: -150.0 }),
            outflow("nfx", "Netflix", Recurrence::Monthly { amount: -15.0 }),
            outflow("sav", "Savings", Recurrence::Weekly { amount: -100.0 }),
            CashFlowRow::new("adj", "Adjustment", FlowType::Outflow, &grid).adjustment(),
        ];
        materialize(&mut model);
        model
    }

    /// Starter model over the default 26-week horizon following `clock`'s today.
    pub fn seed_default(clock: &dyn Clock) -> Result<Self> {
        let weeks = week_grid::generate_default(clock.today(), week_grid::DEFAULT_WEEK_COUNT)?;
        Ok(Self::seed(weeks))
    }

    /// Starter model over the weeks covering `start..=end`.
    pub fn seed_for_range(start: &str, end: &str) -> Result<Self> {
        Ok(Self::seed(week_grid::generate_from_range(start, end)?))
    }

    pub fn rows(&self, section: Section) -> &[CashFlowRow] {
        match section {
            Section::Positives => &self.positives,
            Section::Negatives => &self.negatives,
        }
    }

    pub fn rows_mut(&mut self, section: Section) -> &mut Vec<CashFlowRow> {
        match section {
            Section::Positives => &mut self.positives,
            Section::Negatives => &mut self.negatives,
        }
    }

    pub fn all_rows(&self) -> impl Iterator<Item = &CashFlowRow> {
        self.positives.iter().chain(self.negatives.iter())
    }

    pub fn row(&self, section: Section, row_id: &str) -> Option<&CashFlowRow> {
        self.rows(section).iter().find(|row| row.id == row_id)
    }

    pub fn row_mut(&mut self, section: Section, row_id: &str) -> Option<&mut CashFlowRow> {
        self.rows_mut(section).iter_mut().find(|row| row.id == row_id)
    }

    pub fn week(&self, week_id: &str) -> Option<&Week> {
        self.weeks.iter().find(|week| week.id == week_id)
    }

    /// Swaps in a new grid and zeroes every row against it. Callers re-materialize afterwards.
    pub fn remap_weeks(&mut self, weeks: Vec<Week>) {
        self.weeks = weeks;
        let grid = &self.weeks;
        for row in self.positives.iter_mut().chain(self.negatives.iter_mut()) {
            row.reset_values(grid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_parses_and_maps_flow() {
        assert_eq!("positives".parse::<Section>().unwrap(), Section::Positives);
        assert_eq!(" Negatives ".parse::<Section>().unwrap().flow(), FlowType::Outflow);
        assert!(matches!(
            "sideways".parse::<Section>(),
            Err(ForecastError::InvalidSection(_))
        ));
    }

    #[test]
    fn remap_zeroes_rows_against_new_grid() {
        let mut model = ForecastModel::seed_for_range("2024-01-01", "2024-02-25").unwrap();
        assert!(model.positives[0].total() > 0.0);

        let grid = week_grid::generate_from_range("2024-03-04", "2024-03-17").unwrap();
        model.remap_weeks(grid);

        for row in model.all_rows() {
            assert_eq!(row.values.len(), 2);
            assert!(row.values.values().all(|value| *value == 0.0));
        }
    }
}
