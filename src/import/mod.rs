//! Import of externally selected files into a dataset
//!
//! The caller hands over `(original name, byte source)` pairs, typically
//! uploads already spooled to temporary files. Each entry is copied to
//! `<root>/<dataset>/<destination>`, where the destination is the final
//! component of the original name with the first occurrence of a literal
//! suffix removed (`sample_raw.png` minus `_raw` gives `sample.png`).
//!
//! A file that fails to copy is counted and the batch continues. Only failing
//! to create the dataset directory aborts the import.

pub mod error;
mod report;

pub use error::ImportError;
pub use report::{ImportFailure, ImportPreview, ImportReport, ImportedFile};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::datasets::{DatasetIndex, validate_file_name};
use crate::patterns::{MatchCase, PatternSet};
use crate::store::is_reserved_name;

type Result<T> = std::result::Result<T, ImportError>;

/// Where an entry's bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    /// File already on disk, e.g. a spooled upload
    File(PathBuf),
    /// Bytes held in memory
    Bytes(Vec<u8>),
}

/// One file offered for import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// Name as selected by the user; may carry a relative folder path
    pub original_name: String,
    pub source: ImportSource,
}

impl ImportEntry {
    pub fn from_file(original_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            original_name: original_name.into(),
            source: ImportSource::File(path.into()),
        }
    }

    pub fn from_bytes(original_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            original_name: original_name.into(),
            source: ImportSource::Bytes(bytes),
        }
    }
}

/// Remove the first literal occurrence of `suffix` from `name`.
///
/// An empty suffix, or one not present in the name, leaves the name unchanged.
#[must_use]
pub fn normalize_name(name: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        name.to_string()
    } else {
        name.replacen(suffix, "", 1)
    }
}

/// Destination file name for an original name, if it yields a usable one.
///
/// Folder prefixes (`run1/sample_raw.png`) are dropped before the suffix is
/// removed. Names reserved for the tag document never qualify.
#[must_use]
pub fn destination_name(original_name: &str, suffix: &str) -> Option<String> {
    resolve_destination(original_name, suffix).ok()
}

/// Destination name, or the reason an entry has none
fn resolve_destination(original_name: &str, suffix: &str) -> std::result::Result<String, &'static str> {
    let destination = normalize_name(file_base(original_name), suffix);
    if validate_file_name(&destination).is_err() {
        Err("no usable file name")
    } else if is_reserved_name(&destination) {
        Err("reserved name")
    } else {
        Ok(destination)
    }
}

/// Preview which names an import would take and what they become.
///
/// `file_pattern` is a case-insensitive wildcard; empty selects everything.
/// `*.jpg` and `*.jpeg` each select both JPEG spellings. Unlike the browser
/// import filter, which treats other patterns as unanchored regular
/// expressions, a pattern here must match the whole file name: `sample`
/// selects `sample` only, use `sample*` for `sample_raw.png`.
///
/// # Errors
/// * Returns `ImportError::Pattern` if the pattern cannot be compiled.
/// * Returns `ImportError::NothingToImport` if no name is selected.
pub fn plan_import<S: AsRef<str>>(
    names: &[S],
    file_pattern: &str,
    suffix: &str,
) -> Result<Vec<ImportPreview>> {
    let patterns: Vec<&str> = match file_pattern {
        "" => vec!["*"],
        "*.jpg" | "*.jpeg" => vec!["*.jpg", "*.jpeg"],
        other => vec![other],
    };
    let selector = PatternSet::compile(&patterns, MatchCase::Insensitive)?;

    let previews: Vec<ImportPreview> = names
        .iter()
        .map(AsRef::as_ref)
        .filter(|n| !n.is_empty() && selector.matches(file_base(n)))
        .map(|n| ImportPreview {
            original: n.to_string(),
            destination: destination_name(n, suffix),
        })
        .collect();

    if previews.is_empty() {
        return Err(ImportError::NothingToImport {
            pattern: file_pattern.to_string(),
        });
    }
    Ok(previews)
}

/// Copy one entry to `target`. A target created by a failed write is removed.
fn write_entry(source: &ImportSource, target: &Path) -> std::io::Result<u64> {
    let existed = target.exists();
    let written = match source {
        ImportSource::File(path) => fs::copy(path, target),
        ImportSource::Bytes(bytes) => fs::write(target, bytes).map(|()| bytes.len() as u64),
    };
    if written.is_err() && !existed && let Err(e) = fs::remove_file(target) {
        debug!("No partial file to remove at {}: {e}", target.display());
    }
    written
}

/// Both paths resolve to one existing file. Copying a file onto itself truncates it.
fn is_same_file(source: &Path, target: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn file_base(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Copy `entries` into `dataset`, creating the dataset directory if needed.
///
/// Entries are copied in parallel. When two entries normalize to the same
/// destination the first one wins and the later ones are counted as failed.
///
/// # Errors
/// * Returns `ImportError::Index` if `dataset` is not a valid dataset name.
/// * Returns `ImportError::DirectoryCreate` if the dataset directory cannot be created.
pub fn import_files(
    index: &DatasetIndex,
    dataset: &str,
    suffix: &str,
    entries: Vec<ImportEntry>,
) -> Result<ImportReport> {
    let dir = index.dataset_path(dataset)?;
    fs::create_dir_all(&dir).map_err(|source| ImportError::DirectoryCreate {
        path: dir.clone(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    for entry in entries {
        match resolve_destination(&entry.original_name, suffix) {
            Err(reason) => rejected.push(ImportFailure::new(&entry.original_name, reason)),
            Ok(dest) if !seen.insert(dest.clone()) => {
                rejected.push(ImportFailure::new(
                    &entry.original_name,
                    &format!("duplicate destination {dest}"),
                ));
            }
            Ok(dest) => jobs.push((entry, dest)),
        }
    }

    let outcomes: Vec<std::result::Result<ImportedFile, ImportFailure>> = jobs
        .into_par_iter()
        .map(|(entry, dest)| {
            let target = dir.join(&dest);
            if let ImportSource::File(path) = &entry.source
                && is_same_file(path, &target)
            {
                return Err(ImportFailure::new(&entry.original_name, "source is destination"));
            }
            match write_entry(&entry.source, &target) {
                Ok(bytes) => {
                    debug!("Imported {} -> {}", entry.original_name, target.display());
                    Ok(ImportedFile {
                        original: entry.original_name,
                        destination: dest,
                        bytes,
                    })
                }
                Err(e) => Err(ImportFailure::new(&entry.original_name, &e.to_string())),
            }
        })
        .collect();

    let mut report = ImportReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(file) => report.push_imported(file),
            Err(failure) => report.push_failed(failure),
        }
    }
    for failure in rejected {
        report.push_failed(failure);
    }

    for failure in &report.failed {
        warn!("Failed to import {}: {}", failure.original, failure.reason);
    }
    info!(
        "Imported {} file(s) into dataset '{dataset}' ({} failed)",
        report.imported_count, report.failed_count
    );
    Ok(report)
}
