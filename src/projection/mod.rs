//! The projection engine: week grid, recurrence fill, balance chain, period
//! rollups and threshold alerts. Everything here works on an in-memory
//! [`ForecastModel`](crate::model::ForecastModel) and performs no I/O.

pub mod alerts;
pub mod ledger;
pub mod periods;
pub mod recurrence;
pub mod report;
pub mod week_grid;

pub use alerts::{alert_hits, final_balance, find_breaches, AlertHit};
pub use ledger::{compute_weekly_totals, WeekTotals, WeeklyTotals};
pub use periods::{
    build_periods, row_period_sums, summarize_periods, Granularity, Period, PeriodBalance,
};
pub use recurrence::materialize;
pub use report::{build_report, ProjectionReport, RowView};
pub use week_grid::{generate_default, generate_from_range, weeks_between};
