pub mod edit_service;

pub use edit_service::{EditService, NewRow};
