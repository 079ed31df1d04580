//! Output formatting for CLI display
//!
//! Human output is colored and indented; quiet output prints bare results
//! one per line; JSON output prints the same shapes the library serializes.

use colored::Colorize;
use serde::Serialize;

use crate::search::ImageRecord;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Normal,
    /// Results only, no headers or summaries
    Quiet,
    /// Pretty-printed JSON on stdout
    Json,
}

impl OutputMode {
    #[must_use]
    pub const fn new(quiet: bool, json: bool) -> Self {
        if json {
            Self::Json
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// True when headers, hints and summaries should be printed
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Normal)
    }

    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Print a value as pretty JSON
///
/// # Errors
/// Returns an I/O error if the value cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

/// Comma-separated tag list, or a dim placeholder when empty
#[must_use]
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        "(no tags)".dimmed().to_string()
    } else {
        format!("[{}]", tags.join(", ").cyan())
    }
}

/// Format an image with its tags for display
#[must_use]
pub fn image_with_tags(record: &ImageRecord, quiet: bool) -> String {
    let name = format!("{}/{}", record.dataset, record.filename);
    if quiet {
        name
    } else {
        format!("  {} {}", name, tag_list(&record.tags))
    }
}

/// Format a dataset-level failure line
#[must_use]
pub fn failure_line(subject: &str, reason: &str) -> String {
    format!("  {} {}: {}", "✗".red(), subject, reason)
}

/// Print at most `limit` items with a trailing "... and N more"
pub fn print_truncated<T: AsRef<str>>(items: &[T], limit: usize) {
    for (i, item) in items.iter().enumerate().take(limit) {
        println!("  {}. {}", i + 1, item.as_ref());
    }
    if items.len() > limit {
        println!("  ... and {} more", items.len() - limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tags: &[&str]) -> ImageRecord {
        ImageRecord {
            filename: "a.jpg".into(),
            dataset: "cells".into(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn test_output_mode_precedence() {
        assert_eq!(OutputMode::new(false, false), OutputMode::Normal);
        assert_eq!(OutputMode::new(true, false), OutputMode::Quiet);
        assert_eq!(OutputMode::new(true, true), OutputMode::Json);
        assert!(!OutputMode::Json.is_verbose());
    }

    #[test]
    fn test_quiet_image_is_bare_path() {
        assert_eq!(image_with_tags(&record(&["x"]), true), "cells/a.jpg");
    }

    #[test]
    fn test_image_with_tags() {
        colored::control::set_override(false);
        assert_eq!(image_with_tags(&record(&["x", "y"]), false), "  cells/a.jpg [x, y]");
        assert_eq!(image_with_tags(&record(&[]), false), "  cells/a.jpg (no tags)");
    }
}
