//! Wildcard patterns for dataset and image names.
//!
//! A pattern is literal text plus two wildcards: `*` matches any run of
//! characters (including none) and `?` matches exactly one character. Patterns
//! are anchored at both ends, so `cell?.png` matches `cell1.png` but not
//! `cell12.png`, and a pattern without wildcards only matches the exact name.
//!
//! Dataset and image patterns are case-sensitive. The import preview filter is
//! the one caller that asks for [`MatchCase::Insensitive`].

pub mod error;
mod wildcard;

pub use error::PatternError;
pub use wildcard::{MatchCase, WildcardPattern};

/// Pattern callers substitute when the user leaves a name pattern out
pub const MATCH_ALL: &str = "*";

/// Maximum number of patterns accepted in a single set (subject to tuning)
const MAX_PATTERNS: usize = 1000;

/// Union of wildcard patterns: a name matches if any member matches.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<WildcardPattern>,
}

impl PatternSet {
    /// Compile every pattern in `raw` with the given case sensitivity.
    ///
    /// # Errors
    /// * Returns `PatternError::NoPatterns` if `raw` is empty.
    /// * Returns `PatternError::TooManyPatterns` if `raw` exceeds the configured maximum.
    /// * Returns `PatternError::InvalidPattern` if a pattern cannot be compiled.
    pub fn compile<S: AsRef<str>>(raw: &[S], case: MatchCase) -> Result<Self, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::NoPatterns);
        }
        if raw.len() > MAX_PATTERNS {
            return Err(PatternError::TooManyPatterns {
                provided: raw.len(),
                max: MAX_PATTERNS,
            });
        }
        let patterns = raw
            .iter()
            .map(|p| WildcardPattern::with_case(p.as_ref(), case))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Keep the names matched by the set, preserving their order.
    #[must_use]
    pub fn filter<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        names
            .into_iter()
            .filter(|n| self.matches(n))
            .cloned()
            .collect()
    }

    /// Original pattern strings joined for display
    #[must_use]
    pub fn describe(&self) -> String {
        self.patterns
            .iter()
            .map(WildcardPattern::original)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
