//! Per-dataset tag store
//!
//! Each dataset keeps its tags in one JSON document, `<root>/<dataset>/imageTags.json`,
//! mapping image file names to tag lists. A missing document reads as an empty
//! map; a document that exists but does not parse is an error and is never
//! overwritten.
//!
//! All mutations go through [`TagStore::update`]: take the dataset's lock, load,
//! apply the change in memory, and save only if the map changed. Saves replace
//! the whole document via write-then-rename.

pub mod atomic;
pub mod error;
pub mod locks;
pub mod migrate;
pub mod types;

pub use error::StoreError;
pub use locks::DatasetLocks;
pub use migrate::{MigrationReport, migrate_legacy};
pub use types::{TagMap, normalize_tags, parse_tag_args, parse_tag_list};

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::datasets::{DatasetIndex, validate_file_name};

type Result<T> = std::result::Result<T, StoreError>;

/// File name of the per-dataset tag document
pub const TAGS_FILE_NAME: &str = "imageTags.json";

/// True for the tag document and its in-flight temp files, which only the store may write.
///
/// Compared ignoring ASCII case so case-insensitive filesystems are covered too.
#[must_use]
pub fn is_reserved_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let document = TAGS_FILE_NAME.to_ascii_lowercase();
    lower == document || lower.starts_with(&format!(".{document}."))
}

/// Tag documents for every dataset under an index root.
///
/// Cloning is cheap and clones share the same lock arena.
#[derive(Debug, Clone)]
pub struct TagStore {
    index: DatasetIndex,
    locks: Arc<DatasetLocks>,
}

impl TagStore {
    #[must_use]
    pub fn new(index: DatasetIndex) -> Self {
        Self {
            index,
            locks: Arc::new(DatasetLocks::new()),
        }
    }

    #[must_use]
    pub const fn index(&self) -> &DatasetIndex {
        &self.index
    }

    /// Path of a dataset's tag document
    ///
    /// # Errors
    /// Returns `StoreError::Index` if the dataset name is invalid.
    pub fn tags_path(&self, dataset: &str) -> Result<PathBuf> {
        Ok(self.index.dataset_path(dataset)?.join(TAGS_FILE_NAME))
    }

    /// Load a dataset's tag map; an absent document is an empty map.
    ///
    /// # Errors
    /// * Returns `StoreError::Index` if the dataset name is invalid.
    /// * Returns `StoreError::CorruptState` if the document does not parse.
    /// * Returns `StoreError::Io` if the document cannot be read.
    pub fn load(&self, dataset: &str) -> Result<TagMap> {
        let path = self.tags_path(dataset)?;
        Ok(atomic::read_json(&path)?.unwrap_or_default())
    }

    /// Replace a dataset's tag document with `map`.
    ///
    /// Callers mutating existing tags should use [`TagStore::update`] so the
    /// cycle runs under the dataset lock.
    ///
    /// # Errors
    /// * Returns `StoreError::Index` if the dataset does not exist.
    /// * Returns `StoreError::Io` or `StoreError::Serialize` if writing fails.
    pub fn save(&self, dataset: &str, map: &TagMap) -> Result<()> {
        let path = self.index.require_dataset(dataset)?.join(TAGS_FILE_NAME);
        atomic::write_json(&path, map)?;
        info!("Saved tags for {} image(s) in dataset '{dataset}'", map.len());
        Ok(())
    }

    /// Run one locked load-modify-save cycle on a dataset's tag map.
    ///
    /// The document is only rewritten when `apply` changed the map.
    ///
    /// # Errors
    /// Returns any error from [`TagStore::load`] or [`TagStore::save`]. On error
    /// nothing is written.
    pub fn update<R, F>(&self, dataset: &str, apply: F) -> Result<R>
    where
        F: FnOnce(&mut TagMap) -> R,
    {
        self.index.require_dataset(dataset)?;
        let handle = self.locks.handle(dataset);
        let _guard = locks::acquire(&handle);

        let before = self.load(dataset)?;
        let mut map = before.clone();
        let outcome = apply(&mut map);
        if map == before {
            debug!("Tags for dataset '{dataset}' unchanged; skipping save");
        } else {
            self.save(dataset, &map)?;
        }
        Ok(outcome)
    }

    /// Tags of one image, empty when it has none
    ///
    /// # Errors
    /// Returns `StoreError` if the document cannot be loaded.
    pub fn get_tags(&self, dataset: &str, filename: &str) -> Result<Vec<String>> {
        Ok(self.load(dataset)?.get(filename).to_vec())
    }

    /// Add tags to one image, returning how many were new.
    ///
    /// # Errors
    /// Returns `StoreError` if the dataset is missing or the cycle fails.
    pub fn add_tags(&self, dataset: &str, filename: &str, tags: &[String]) -> Result<usize> {
        validate_file_name(filename)?;
        let tags = normalize_tags(tags);
        self.update(dataset, |map| map.add(filename, &tags))
    }

    /// Replace the tags of one image, returning the stored list.
    ///
    /// # Errors
    /// Returns `StoreError` if the dataset is missing or the cycle fails.
    pub fn set_tags(&self, dataset: &str, filename: &str, tags: Vec<String>) -> Result<Vec<String>> {
        validate_file_name(filename)?;
        let tags = normalize_tags(&tags);
        self.update(dataset, |map| map.set(filename, tags).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::IndexError;
    use crate::testing::{TestRoot, tags};
    use std::fs;
    use std::thread;

    #[test]
    fn test_load_missing_document_is_empty() {
        let root = TestRoot::new();
        root.dataset("freshDataset");
        let map = root.store().load("freshDataset").unwrap();
        assert!(map.is_empty());
        assert!(!root.tags_file("freshDataset").exists());
    }

    #[test]
    fn test_load_corrupt_document_is_error() {
        let root = TestRoot::new();
        root.write_tags("cells", "not json");
        assert!(matches!(root.store().load("cells"), Err(StoreError::CorruptState { .. })));
    }

    #[test]
    fn test_corrupt_document_is_not_overwritten() {
        let root = TestRoot::new();
        root.images("cells", &["a.jpg"]);
        root.write_tags("cells", "{broken");
        let store = root.store();
        assert!(store.add_tags("cells", "a.jpg", &tags(&["x"])).is_err());
        assert_eq!(fs::read_to_string(root.tags_file("cells")).unwrap(), "{broken");
    }

    #[test]
    fn test_add_tags_idempotent_and_skips_rewrite() {
        let root = TestRoot::new();
        root.images("cells", &["a.jpg"]);
        let store = root.store();

        assert_eq!(store.add_tags("cells", "a.jpg", &tags(&["x", "y"])).unwrap(), 2);
        let first = fs::metadata(root.tags_file("cells")).unwrap().modified().unwrap();
        let text = fs::read_to_string(root.tags_file("cells")).unwrap();

        assert_eq!(store.add_tags("cells", "a.jpg", &tags(&["x", "y"])).unwrap(), 0);
        assert_eq!(fs::read_to_string(root.tags_file("cells")).unwrap(), text);
        assert_eq!(fs::metadata(root.tags_file("cells")).unwrap().modified().unwrap(), first);
        assert_eq!(store.get_tags("cells", "a.jpg").unwrap(), tags(&["x", "y"]));
    }

    #[test]
    fn test_add_tags_preserves_existing_order() {
        let root = TestRoot::new();
        root.images("cells", &["a.jpg"]);
        root.write_tags("cells", r#"{"a.jpg": ["a", "b"]}"#);
        let store = root.store();
        assert_eq!(store.add_tags("cells", "a.jpg", &tags(&["b", "c", "a", "d"])).unwrap(), 2);
        assert_eq!(store.get_tags("cells", "a.jpg").unwrap(), tags(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_set_tags_replaces() {
        let root = TestRoot::new();
        root.images("cells", &["a.jpg"]);
        let store = root.store();
        store.add_tags("cells", "a.jpg", &tags(&["x"])).unwrap();
        assert_eq!(store.set_tags("cells", "a.jpg", tags(&["z", "y"])).unwrap(), tags(&["z", "y"]));
        assert_eq!(store.get_tags("cells", "a.jpg").unwrap(), tags(&["z", "y"]));
        store.set_tags("cells", "a.jpg", Vec::new()).unwrap();
        assert_eq!(root.read_tags("cells"), r#"{"a.jpg":[]}"#);
    }

    #[test]
    fn test_get_tags_untagged_image_is_empty() {
        let root = TestRoot::new();
        root.images("cells", &["a.jpg"]);
        assert!(root.store().get_tags("cells", "a.jpg").unwrap().is_empty());
    }

    #[test]
    fn test_update_on_missing_dataset_fails_without_creating_it() {
        let root = TestRoot::new();
        let store = root.store();
        let err = store.add_tags("ghost", "a.jpg", &tags(&["x"])).unwrap_err();
        assert!(matches!(err, StoreError::Index(IndexError::DatasetNotFound(_))));
        assert!(!root.path().join("ghost").exists());
    }

    #[test]
    fn test_invalid_file_name_rejected() {
        let root = TestRoot::new();
        root.dataset("cells");
        let err = root.store().add_tags("cells", "../a.jpg", &tags(&["x"])).unwrap_err();
        assert!(matches!(err, StoreError::Index(IndexError::InvalidFileName(_))));
    }

    #[test]
    fn test_concurrent_adds_are_not_lost() {
        let root = TestRoot::new();
        let names: Vec<String> = (0..16).map(|i| format!("img{i:02}.jpg")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        root.images("cells", &refs);
        let store = root.store();

        let workers: Vec<_> = names
            .iter()
            .cloned()
            .map(|name| {
                let store = store.clone();
                thread::spawn(move || store.add_tags("cells", &name, &[format!("t-{name}")]).unwrap())
            })
            .collect();
        for w in workers {
            assert_eq!(w.join().unwrap(), 1);
        }

        let map = store.load("cells").unwrap();
        assert_eq!(map.len(), 16);
        for name in &names {
            assert_eq!(map.get(name), [format!("t-{name}")].as_slice());
        }
    }

    #[test]
    fn test_tags_are_trimmed_and_blanks_dropped() {
        let root = TestRoot::new();
        root.images("cells", &["a.jpg"]);
        let store = root.store();
        assert_eq!(store.add_tags("cells", "a.jpg", &tags(&["", " x ", "  "])).unwrap(), 1);
        assert_eq!(store.get_tags("cells", "a.jpg").unwrap(), tags(&["x"]));
        assert_eq!(store.set_tags("cells", "a.jpg", tags(&[" y", "\t"])).unwrap(), tags(&["y"]));
        assert_eq!(root.read_tags("cells"), r#"{"a.jpg":["y"]}"#);
    }

    #[test]
    fn test_reserved_names() {
        assert!(is_reserved_name("imageTags.json"));
        assert!(is_reserved_name("IMAGETAGS.JSON"));
        assert!(is_reserved_name(".imageTags.json.41.0.tmp"));
        assert!(!is_reserved_name("imageTags_raw.json"));
        assert!(!is_reserved_name("imageTags.json.png"));
    }
}
