//! Data layer for the pg-inventory dashboard.
//!
//! Responsible for loading and saving the JSON record store, importing and
//! exporting CSV sheets, filtering record sets and running the dashboard
//! analysis pipeline.

pub mod analysis;
pub mod csv;
pub mod store;

pub use inventory_core as core;
