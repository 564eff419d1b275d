//! Terminal UI layer for the pg-inventory dashboard.
//!
//! Provides themes, the distribution dashboard, the growth table view, and
//! the application event loop built on top of [`ratatui`].

pub mod app;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;

pub use inventory_core as core;
