//! Tag store error types
//!
//! A tag document that exists but cannot be parsed is reported as
//! **`CorruptState`** and is never overwritten; a missing document is not an
//! error at all (it reads as an empty map).

use std::path::PathBuf;

use thiserror::Error;

use crate::datasets::IndexError;

/// Tag store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Dataset could not be resolved
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Tag document exists but is not a valid tag map
    #[error("Corrupt tag document {}: {source}", path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading or writing a tag document failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tag map could not be serialized
    #[error("Failed to serialize tags: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Legacy tag document to migrate does not exist
    #[error("Legacy tag document not found: {}", .0.display())]
    LegacyNotFound(PathBuf),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
