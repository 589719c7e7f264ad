//! Shared domain types for the token top-up report.
//!
//! Holds the company and user records, the load error type and the
//! command-line settings used by the other crates in the workspace.

pub mod error;
pub mod models;
pub mod settings;
