#![doc(test(attr(deny(warnings))))]

//! Cash-flow projection engine: lays recurring income and expenses onto a
//! weekly grid, rolls balances forward and rolls the result up by week,
//! month, quarter or year with threshold alerts.
//!
//! The engine is synchronous and works on one in-memory [`model::ForecastModel`]
//! at a time. Loading and persisting snapshots is left to the caller, which must
//! serialize load, mutate and persist cycles per model.

pub mod config;
pub mod core;
pub mod errors;
pub mod model;
pub mod projection;
pub mod time;
pub mod utils;

pub use errors::{ForecastError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow core tracing initialized.");
    });
}
