//! Bulk tagging error types
//!
//! Structural failures abort a bulk request before anything is written.
//! Failures confined to one dataset are not errors: they are collected in the
//! report's `failures` list while the remaining datasets are still updated.

use thiserror::Error;

use crate::datasets::IndexError;
use crate::patterns::PatternError;

/// Bulk tagging errors
#[derive(Debug, Error)]
pub enum BulkError {
    /// Tag list was empty after parsing
    #[error("No tags provided")]
    EmptyTagList,

    /// No dataset directory matched the dataset pattern(s)
    #[error("No datasets match \"{pattern}\"")]
    NoDatasetMatch { pattern: String },

    /// Datasets matched but none of them contained a matching image
    #[error("Pattern matched datasets but no images: nothing matches \"{image_pattern}\" in datasets \"{dataset_pattern}\"")]
    NoImageMatch {
        dataset_pattern: String,
        image_pattern: String,
    },

    /// A pattern could not be compiled
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The datasets root could not be listed
    #[error(transparent)]
    Index(#[from] IndexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_messages_are_distinct() {
        let datasets = BulkError::NoDatasetMatch { pattern: "ZZZ*".into() };
        let images = BulkError::NoImageMatch {
            dataset_pattern: "cells".into(),
            image_pattern: "*.tiff".into(),
        };
        assert_eq!(datasets.to_string(), "No datasets match \"ZZZ*\"");
        assert!(images.to_string().starts_with("Pattern matched datasets but no images"));
        assert!(images.to_string().contains("*.tiff"));
    }

    #[test]
    fn test_empty_tag_list_display() {
        assert_eq!(BulkError::EmptyTagList.to_string(), "No tags provided");
    }
}
