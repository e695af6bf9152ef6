//! Reusable line-level building blocks for the dashboard screen.

pub mod bars;
pub mod header;
