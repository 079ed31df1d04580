//! Search-specific error types
//!
//! - **`EmptyQuery`**: neither a search term nor a dataset filter was given
//! - **`IndexError`**: a dataset could not be listed (wraps `IndexError`)
//! - **`StoreError`**: a dataset's tag document could not be loaded (wraps `StoreError`)
//!
//! A corrupt tag document surfaces here rather than being read as "no tags".

use thiserror::Error;

/// Search-specific errors
#[derive(Debug, Error)]
pub enum SearchError {
    /// Directory index error while collecting images
    #[error("Index error: {0}")]
    IndexError(#[from] crate::datasets::IndexError),

    /// Tag store error while collecting tags
    #[error("Tag store error: {0}")]
    StoreError(#[from] crate::store::StoreError),

    /// Nothing to search for
    #[error("Search term or dataset filter required")]
    EmptyQuery,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
