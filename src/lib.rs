//! salesdash: aggregation and filter-state core for an order analytics dashboard.
//!
//! The crate loads loosely typed order records, keeps a single-dimension
//! filter over them, and recomputes revenue, review, delivery and ranking
//! aggregates for registered view consumers after every change.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod filter;
pub mod telemetry;

pub use api::{DashboardConfig, DashboardEngine, DashboardSnapshot, InitOutcome};
pub use error::{DashboardError, DashboardResult};
