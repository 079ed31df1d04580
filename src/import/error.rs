use std::path::PathBuf;

use thiserror::Error;

use crate::datasets::IndexError;
use crate::patterns::PatternError;

/// Import errors that abort the whole batch.
///
/// Failures of individual files are counted in the report instead.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Target dataset name is invalid
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Target dataset directory could not be created
    #[error("Failed to create dataset directory {}: {source}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Preview filter selected no files
    #[error("No files match the pattern \"{pattern}\"")]
    NothingToImport { pattern: String },

    /// Preview filter could not be compiled
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
