//! Import command - copy files into a dataset

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::debug;

use crate::{
    Library, MicrotagError,
    import::{ImportEntry, ImportPreview, ImportReport},
    output::{self, OutputMode},
};

type Result<T> = std::result::Result<T, MicrotagError>;

/// Execute the import command
///
/// Directories are expanded recursively; their files are named
/// `<dir>/<relative path>` so only the file name ends up in the dataset.
///
/// # Errors
/// Returns an error if a source cannot be read, the pattern selects nothing,
/// or the dataset directory cannot be created
pub fn execute(
    library: &Library,
    dataset: &str,
    sources: &[PathBuf],
    suffix: &str,
    pattern: &str,
    dry_run: bool,
    mode: OutputMode,
) -> Result<()> {
    let entries = collect_entries(sources)?;
    let names: Vec<&str> = entries.iter().map(|e| e.original_name.as_str()).collect();
    let previews = library.plan_import(&names, pattern, suffix)?;

    if dry_run {
        if mode.is_json() {
            output::print_json(&previews)?;
        } else {
            print_preview(dataset, &previews);
        }
        return Ok(());
    }

    let selected: HashSet<&str> = previews.iter().map(|p| p.original.as_str()).collect();
    let entries: Vec<ImportEntry> = entries
        .iter()
        .filter(|e| selected.contains(e.original_name.as_str()))
        .cloned()
        .collect();

    let report = library.import(dataset, suffix, entries)?;
    match mode {
        OutputMode::Json => output::print_json(&report)?,
        OutputMode::Quiet => {
            for file in &report.imported {
                println!("{dataset}/{}", file.destination);
            }
        }
        OutputMode::Normal => print_report(dataset, &report),
    }
    Ok(())
}

/// Turn files and directories into import entries
///
/// # Errors
/// Returns an I/O error if a source does not exist or a directory cannot be read
pub fn collect_entries(sources: &[PathBuf]) -> Result<Vec<ImportEntry>> {
    let mut entries = Vec::new();
    for source in sources {
        let meta = fs::metadata(source).map_err(|e| {
            MicrotagError::InvalidInput(format!("Cannot access path '{}': {e}", source.display()))
        })?;
        let base = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if meta.is_dir() {
            walk(source, &base, &mut entries)?;
        } else {
            entries.push(ImportEntry::from_file(base, source));
        }
    }
    debug!("Collected {} file(s) to import", entries.len());
    Ok(entries)
}

fn walk(dir: &Path, prefix: &str, entries: &mut Vec<ImportEntry>) -> Result<()> {
    let mut children: Vec<_> = fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    children.sort_by_key(fs::DirEntry::file_name);
    for child in children {
        let name = format!("{prefix}/{}", child.file_name().to_string_lossy());
        if child.file_type()?.is_dir() {
            walk(&child.path(), &name, entries)?;
        } else {
            entries.push(ImportEntry::from_file(name, child.path()));
        }
    }
    Ok(())
}

fn print_preview(dataset: &str, previews: &[ImportPreview]) {
    println!("{}", "=== Dry Run Mode ===".yellow().bold());
    println!("Would import {} file(s) into {}", previews.len(), dataset.bold());
    for preview in previews {
        match &preview.destination {
            Some(dest) if preview.is_renamed() => {
                println!("  {} {} {}", preview.original, "→".dimmed(), dest.green());
            }
            Some(dest) => println!("  {dest}"),
            None => println!("  {} {}", preview.original, "(skipped: unusable or reserved name)".red()),
        }
    }
    println!("\n{}", "Run without --dry-run to copy files.".yellow());
}

fn print_report(dataset: &str, report: &ImportReport) {
    println!(
        "{} Imported {} file(s) ({}) into {}",
        "✓".green(),
        report.imported_count,
        report.total_size(),
        dataset.bold()
    );
    if report.failed_count > 0 {
        println!("{} {} file(s) failed:", "✗".red(), report.failed_count);
        for failure in &report.failed {
            println!("{}", output::failure_line(&failure.original, &failure.reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRoot;

    #[test]
    fn test_collect_entries_expands_directories() {
        let root = TestRoot::new();
        let single = root.write_file("single_raw.png", "x");
        root.write_file("batch/b.png", "x");
        root.write_file("batch/a.png", "x");
        root.write_file("batch/sub/c.jpg", "x");

        let entries = collect_entries(&[single, root.path().join("batch")]).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.original_name.as_str()).collect();
        assert_eq!(names, vec!["single_raw.png", "batch/a.png", "batch/b.png", "batch/sub/c.jpg"]);
    }

    #[test]
    fn test_collect_entries_missing_source() {
        let root = TestRoot::new();
        let err = collect_entries(&[root.path().join("absent.png")]).unwrap_err();
        assert!(matches!(err, MicrotagError::InvalidInput(_)));
    }

    #[test]
    fn test_import_respects_pattern() {
        let root = TestRoot::new();
        root.write_file("upload/a_raw.png", "png");
        root.write_file("upload/notes.txt", "txt");
        let library = Library::open(root.path().join("lib"));

        execute(
            &library,
            "fresh",
            &[root.path().join("upload")],
            "_raw",
            "*.png",
            false,
            OutputMode::Quiet,
        )
        .unwrap();

        assert!(root.path().join("lib/fresh/a.png").is_file());
        assert!(!root.path().join("lib/fresh/notes.txt").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let root = TestRoot::new();
        let file = root.write_file("a.png", "png");
        let library = Library::open(root.path().join("lib"));
        execute(&library, "fresh", &[file], "", "", true, OutputMode::Quiet).unwrap();
        assert!(!root.path().join("lib").exists());
    }
}
