//! JSON input loading for the top-up report.
//!
//! Each input is a single JSON array of flat objects. Loading is
//! all-or-nothing: one malformed record fails the whole file.

use std::path::Path;

use serde::de::DeserializeOwned;
use topup_core::error::{LoadError, Result};
use topup_core::models::{Company, User};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every company from the JSON array at `path`.
pub fn load_companies(path: &Path) -> Result<Vec<Company>> {
    let companies: Vec<Company> = load_records(path)?;
    debug!("Loaded {} companies from {}", companies.len(), path.display());
    Ok(companies)
}

/// Load every user from the JSON array at `path`.
///
/// Each user's `new_token_balance` starts equal to its `tokens`.
pub fn load_users(path: &Path) -> Result<Vec<User>> {
    let users: Vec<User> = load_records(path)?;
    debug!("Loaded {} users from {}", users.len(), path.display());
    Ok(users)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
