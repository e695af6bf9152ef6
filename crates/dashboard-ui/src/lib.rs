//! Terminal UI layer for the sales dashboard.
//!
//! Provides themes, bar and header components, the chart panels and the
//! main application event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod themes;

pub use dashboard_core as core;
