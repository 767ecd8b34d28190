//! Services that mutate a forecast model on behalf of callers.

pub mod services;
