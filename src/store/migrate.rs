//! One-time migration from the single-file tag format.
//!
//! Older installations kept every tag in one document keyed by
//! `"<dataset>/<filename>"`. Migration splits it by dataset and merges each
//! group additively into that dataset's own document, so running it twice is
//! harmless.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::error::StoreError;
use super::{TagStore, atomic};
use crate::datasets::validate_file_name;

/// Outcome of a legacy migration
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    /// Datasets whose document gained at least one tag
    pub datasets_updated: usize,
    /// Legacy entries routed to an existing dataset
    pub entries_migrated: usize,
    /// Tags added across all datasets
    pub tags_added: usize,
    /// Legacy keys that could not be routed, with the reason
    pub skipped: Vec<SkippedEntry>,
}

/// A legacy key that was not migrated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub key: String,
    pub reason: String,
}

/// Merge a legacy full-path-keyed tag document into per-dataset documents.
///
/// # Errors
/// * Returns `StoreError::LegacyNotFound` if `legacy_file` does not exist.
/// * Returns `StoreError::CorruptState` if it is not a valid tag document.
/// * Returns any error from updating a dataset's document; datasets processed
///   before the failure keep their merged tags.
pub fn migrate_legacy(store: &TagStore, legacy_file: &Path) -> Result<MigrationReport, StoreError> {
    let legacy: BTreeMap<String, Vec<String>> = atomic::read_json(legacy_file)?
        .ok_or_else(|| StoreError::LegacyNotFound(legacy_file.to_path_buf()))?;

    let mut report = MigrationReport::default();
    let mut by_dataset: BTreeMap<String, Vec<(String, Vec<String>)>> = BTreeMap::new();

    for (key, tags) in legacy {
        let Some((dataset, filename)) = key.split_once('/') else {
            report.skip(key, "no dataset prefix");
            continue;
        };
        if validate_file_name(filename).is_err() {
            report.skip(key, "invalid file name");
            continue;
        }
        if !store.index().contains(dataset) {
            report.skip(key, "dataset does not exist");
            continue;
        }
        by_dataset
            .entry(dataset.to_string())
            .or_default()
            .push((filename.to_string(), tags));
    }

    for (dataset, entries) in by_dataset {
        report.entries_migrated += entries.len();
        let added = store.update(&dataset, |map| {
            entries
                .iter()
                .map(|(filename, tags)| map.add(filename, tags))
                .sum::<usize>()
        })?;
        if added > 0 {
            report.datasets_updated += 1;
            report.tags_added += added;
        }
    }

    info!(
        "Migrated {} legacy entries ({} tag(s) added, {} skipped)",
        report.entries_migrated,
        report.tags_added,
        report.skipped.len()
    );
    Ok(report)
}

impl MigrationReport {
    fn skip(&mut self, key: String, reason: &str) {
        warn!("Skipping legacy entry '{key}': {reason}");
        self.skipped.push(SkippedEntry {
            key,
            reason: reason.to_string(),
        });
    }
}
