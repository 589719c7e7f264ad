//! Data layer for the token top-up report.
//!
//! Responsible for loading the company and user JSON inputs, running the
//! per-company top-up aggregation and wrapping both in a single pipeline
//! whose outcome is either a report or a list of load errors.

pub mod aggregator;
pub mod loader;
pub mod pipeline;

pub use topup_core as core;
