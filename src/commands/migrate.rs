//! Migrate command - split a legacy tag document into per-dataset documents

use std::path::Path;

use colored::Colorize;

use crate::{Library, MicrotagError, output::{self, OutputMode}};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Execute the migrate command
///
/// # Errors
/// Returns an error if the legacy file is missing or corrupt, or a dataset
/// document cannot be updated
pub fn execute(library: &Library, legacy_file: &Path, mode: OutputMode) -> Result<()> {
    let report = library.migrate(legacy_file)?;

    match mode {
        OutputMode::Json => output::print_json(&report)?,
        OutputMode::Quiet => {}
        OutputMode::Normal => {
            println!(
                "{} Migrated {} into {} dataset(s), {} tag(s) added",
                "✓".green(),
                entries(report.entries_migrated),
                report.datasets_updated,
                report.tags_added
            );
            if !report.skipped.is_empty() {
                println!("{} {} skipped:", "⊘".yellow(), entries(report.skipped.len()));
                for skipped in &report.skipped {
                    println!("{}", output::failure_line(&skipped.key, &skipped.reason));
                }
            }
        }
    }
    Ok(())
}

fn entries(count: usize) -> String {
    if count == 1 {
        "1 entry".to_string()
    } else {
        format!("{count} entries")
    }
}
