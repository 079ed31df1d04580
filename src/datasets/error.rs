//! Directory index error types
//!
//! - **`DatasetNotFound`**: the dataset directory does not exist (distinct from an empty dataset)
//! - **`ImageNotFound`**: the image is absent or not an allowed image file
//! - **`InvalidDatasetName`** / **`InvalidFileName`**: names that would escape their directory
//! - **`Io`**: a directory could not be enumerated

use std::path::PathBuf;

use thiserror::Error;

/// Dataset directory index errors
#[derive(Debug, Error)]
pub enum IndexError {
    /// Dataset directory does not exist
    #[error("Dataset not found: {0}")]
    DatasetNotFound(String),

    /// Image does not exist in the dataset
    #[error("Image not found: {dataset}/{filename}")]
    ImageNotFound { dataset: String, filename: String },

    /// Dataset names are single directory names
    #[error("Invalid dataset name '{0}'")]
    InvalidDatasetName(String),

    /// Image names are single file names
    #[error("Invalid file name '{0}'")]
    InvalidFileName(String),

    /// Enumerating a directory failed
    #[error("Failed to read directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
