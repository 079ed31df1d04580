//! Testing utilities for microtag
//!
//! Provides `TestRoot`, a temporary library root with helpers for laying out
//! datasets, images and raw tag documents. The directory is removed when the
//! fixture is dropped.
//!
//! Only available when compiled with `cfg(test)`.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::datasets::DatasetIndex;
use crate::library::Library;
use crate::store::{TAGS_FILE_NAME, TagStore};

/// Temporary datasets root
pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp root"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty dataset directory
    pub fn dataset(&self, name: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::create_dir_all(&path).expect("Failed to create dataset");
        path
    }

    /// Create a dataset containing the given (placeholder) files
    pub fn images(&self, dataset: &str, names: &[&str]) -> PathBuf {
        let dir = self.dataset(dataset);
        for name in names {
            fs::write(dir.join(name), b"fake image bytes").expect("Failed to create image");
        }
        dir
    }

    /// Create a regular file directly under the root
    pub fn file_at_root(&self, name: &str) -> PathBuf {
        self.write_file(name, "")
    }

    /// Write an arbitrary file relative to the root
    pub fn write_file(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent");
        }
        fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Write a raw tag document for a dataset, creating the dataset if needed
    pub fn write_tags(&self, dataset: &str, raw: &str) {
        self.dataset(dataset);
        fs::write(self.tags_file(dataset), raw).expect("Failed to write tags");
    }

    #[must_use]
    pub fn tags_file(&self, dataset: &str) -> PathBuf {
        self.path().join(dataset).join(TAGS_FILE_NAME)
    }

    /// Tag document re-serialized as compact JSON
    #[must_use]
    pub fn read_tags(&self, dataset: &str) -> String {
        let raw = fs::read_to_string(self.tags_file(dataset)).expect("Failed to read tags");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("Tags are not JSON");
        value.to_string()
    }

    #[must_use]
    pub fn index(&self) -> DatasetIndex {
        DatasetIndex::new(self.path())
    }

    #[must_use]
    pub fn store(&self) -> TagStore {
        TagStore::new(self.index())
    }

    #[must_use]
    pub fn library(&self) -> Library {
        Library::open(self.path())
    }
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned tag list from string literals
#[must_use]
pub fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_removed_on_drop() {
        let path = {
            let root = TestRoot::new();
            root.images("cells", &["a.jpg"]);
            root.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_layout_helpers() {
        let root = TestRoot::new();
        let dir = root.images("cells", &["a.jpg", "b.png"]);
        assert!(dir.join("a.jpg").is_file());
        root.write_tags("cells", r#"{"a.jpg":["x"]}"#);
        assert_eq!(root.read_tags("cells"), r#"{"a.jpg":["x"]}"#);
    }
}
