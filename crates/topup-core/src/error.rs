use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn an input file into typed records.
///
/// Loading is all-or-nothing, so a single malformed record surfaces as a
/// [`LoadError::JsonParse`] for the whole file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents were not a JSON array of the expected records.
    #[error("Failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Path of the input that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::FileRead { path, .. } | LoadError::JsonParse { path, .. } => path,
        }
    }
}

/// Convenience alias used throughout the top-up crates.
pub type Result<T> = std::result::Result<T, LoadError>;
