//! Data layer for the sales dashboard.
//!
//! Reads the `;`-separated sales file into a [`SalesTable`], filters it by
//! month and reduces it into the aggregate views the charts render.
//!
//! [`SalesTable`]: dashboard_core::models::SalesTable

pub mod filter;
pub mod reader;
pub mod views;

pub use dashboard_core as core;
