//! Runtime layer for the sales dashboard.
//!
//! Owns the path-keyed table cache and the month-selection state that turns
//! the loaded table into per-month snapshots for the UI.

pub mod dashboard;
pub mod table_cache;

pub use dashboard_core as core;
pub use dashboard_data as data;
