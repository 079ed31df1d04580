use thiserror::Error;

/// Errors produced while compiling wildcard patterns
#[derive(Debug, Error)]
pub enum PatternError {
    /// Translated pattern failed to compile
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    /// A pattern set needs at least one member
    #[error("No patterns provided")]
    NoPatterns,
    /// Too many patterns were provided
    #[error("Too many patterns provided: {provided} (max {max})")]
    TooManyPatterns { provided: usize, max: usize },
}

impl PatternError {
    #[must_use]
    pub fn invalid(pattern: &str, reason: &str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }
}
