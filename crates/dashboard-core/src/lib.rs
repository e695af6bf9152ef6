//! Shared building blocks for the sales dashboard.
//!
//! Holds the record and table types, the error taxonomy, the fixed-format
//! date and decimal parsers, number formatting and the CLI settings.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{DashboardError, Result};
