//! Microtag - tag store for micrograph datasets
//!
//! A datasets root holds one directory per dataset; each dataset keeps its
//! image tags in a JSON document next to the images. This library lists
//! datasets and images, reads and edits tags, applies tags in bulk across
//! datasets selected by wildcard patterns, imports files into datasets, and
//! searches images by name or tag.
//!
//! [`library::Library`] is the entry point for all of these operations.

use thiserror::Error;

pub mod bulk;
pub mod cli;
pub mod commands;
pub mod config;
pub mod datasets;
pub mod import;
pub mod library;
pub mod output;
pub mod patterns;
pub mod search;
pub mod store;

#[cfg(test)]
pub mod testing;

pub use library::{ImageFile, Library};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum MicrotagError {
    /// Dataset directory error
    #[error("{0}")]
    Index(#[from] datasets::IndexError),
    /// Tag document error
    #[error("{0}")]
    Store(#[from] store::StoreError),
    /// Bulk tagging error
    #[error("{0}")]
    Bulk(#[from] bulk::BulkError),
    /// Import error
    #[error("{0}")]
    Import(#[from] import::ImportError),
    /// Search error
    #[error("{0}")]
    Search(#[from] search::SearchError),
    /// Wildcard pattern error
    #[error("{0}")]
    Pattern(#[from] patterns::PatternError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MicrotagError {
    /// True when the error means "the named dataset or image does not exist"
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Index(datasets::IndexError::DatasetNotFound(_) | datasets::IndexError::ImageNotFound { .. })
                | Self::Store(store::StoreError::Index(
                    datasets::IndexError::DatasetNotFound(_) | datasets::IndexError::ImageNotFound { .. }
                ))
                | Self::Search(search::SearchError::IndexError(datasets::IndexError::DatasetNotFound(_)))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err: MicrotagError = datasets::IndexError::DatasetNotFound("x".into()).into();
        assert!(err.is_not_found());
        let err: MicrotagError = store::StoreError::from(datasets::IndexError::DatasetNotFound("x".into())).into();
        assert!(err.is_not_found());
        let err: MicrotagError = bulk::BulkError::EmptyTagList.into();
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_module_errors_display_unprefixed() {
        let err: MicrotagError = datasets::IndexError::DatasetNotFound("cells".into()).into();
        assert_eq!(err.to_string(), "Dataset not found: cells");
        assert_eq!(
            MicrotagError::InvalidInput("no tags".into()).to_string(),
            "Invalid input: no tags"
        );
    }
}
