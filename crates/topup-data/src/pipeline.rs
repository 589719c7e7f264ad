//! Load-then-aggregate pipeline for the top-up report.
//!
//! Turns two input paths into a [`ProcessOutcome`]: either a finished
//! [`ProcessReport`] or the list of messages explaining why nothing was
//! produced.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregator::{Aggregation, TokenAggregator};
use crate::loader::{load_companies, load_users};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessMetadata {
    /// RFC 3339 timestamp when this run finished.
    pub generated_at: String,
    /// Number of companies read from the companies input.
    pub companies_loaded: usize,
    /// Number of users read from the users input.
    pub users_loaded: usize,
    /// Users whose company id matched no company.
    pub unmatched_users: usize,
    /// Wall-clock seconds spent reading and parsing both inputs.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent in the aggregation pass.
    pub aggregate_time_seconds: f64,
}

/// A completed run.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    pub aggregation: Aggregation,
    pub metadata: ProcessMetadata,
}

/// Result of [`process_files`]. The two arms are mutually exclusive: a failed
/// run carries no partial results.
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    Completed(ProcessReport),
    Failed(Vec<String>),
}

impl ProcessOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessOutcome::Completed(_))
    }

    /// The completed report, if any.
    pub fn report(&self) -> Option<&ProcessReport> {
        match self {
            ProcessOutcome::Completed(report) => Some(report),
            ProcessOutcome::Failed(_) => None,
        }
    }

    /// Error messages; empty for a completed run.
    pub fn errors(&self) -> &[String] {
        match self {
            ProcessOutcome::Completed(_) => &[],
            ProcessOutcome::Failed(errors) => errors,
        }
    }
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline.
///
/// 1. Load companies from `companies_path`.
/// 2. Load users from `users_path`.
/// 3. Run the [`TokenAggregator`] pass.
///
/// The first load failure stops the run and becomes the single error message.
pub fn process_files(companies_path: &Path, users_path: &Path) -> ProcessOutcome {
    // ── Step 1 & 2: Load ──────────────────────────────────────────────────────
    let load_start = Instant::now();
    let loaded = load_companies(companies_path)
        .and_then(|companies| load_users(users_path).map(|users| (companies, users)));
    let (companies, users) = match loaded {
        Ok(inputs) => inputs,
        Err(e) => {
            warn!("Aborting run: {}", e);
            return ProcessOutcome::Failed(vec![e.to_string()]);
        }
    };
    let load_time = load_start.elapsed().as_secs_f64();

    let companies_loaded = companies.len();
    let users_loaded = users.len();

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let aggregate_start = Instant::now();
    let aggregation = TokenAggregator::aggregate(companies, users);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    info!(
        "Processed {} companies and {} users; {} tokens topped up",
        companies_loaded,
        users_loaded,
        aggregation.total_top_ups()
    );

    let metadata = ProcessMetadata {
        generated_at: Utc::now().to_rfc3339(),
        companies_loaded,
        users_loaded,
        unmatched_users: aggregation.unmatched_users(),
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    ProcessOutcome::Completed(ProcessReport {
        aggregation,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
