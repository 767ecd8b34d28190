//! Projection snapshot types: the week grid, cash-flow rows and their recurrence rules.

pub mod forecast;
pub mod recurrence;
pub mod row;
pub mod week;

pub use forecast::{ForecastModel, Section};
pub use recurrence::Recurrence;
pub use row::{CashFlowRow, FlowType};
pub use week::Week;
