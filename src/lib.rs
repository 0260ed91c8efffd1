//! Benchplot - benchmark results to line charts
//!
//! Loads a CSV table of benchmark results, plots one or more value columns
//! against a shared category column and saves the chart as PNG.

pub mod charts;
pub mod config;
pub mod data;
