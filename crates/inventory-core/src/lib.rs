//! Domain layer for the pg-inventory dashboard.
//!
//! Holds the record model, the error type, the growth-timeseries aggregator,
//! the free-text classification heuristics and the CLI settings shared by
//! the other crates.

pub mod classify;
pub mod error;
pub mod formatting;
pub mod growth;
pub mod models;
pub mod settings;

pub use error::{InventoryError, Result};
