//! GST filing analysis for small businesses.
//!
//! Monthly GST sales and purchase filings are parsed into tables, reduced to
//! monthly summaries and business-level metrics, and then scored against a
//! fixed catalog of government support schemes and a heuristic loan rubric.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
