//! Dataset directory index
//!
//! A dataset is a directory directly under the library root; its images are the
//! files inside it whose extension is in [`IMAGE_EXTENSIONS`]. Nothing here is
//! cached: every call reads the filesystem. Dataset and image names are returned
//! sorted so listings, search results and bulk reports come out in a stable order.

pub mod error;
mod image;

pub use error::IndexError;
pub use image::{IMAGE_EXTENSIONS, ImageKind, is_image_file};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

type Result<T> = std::result::Result<T, IndexError>;

/// Read-only view of the datasets under a root directory
#[derive(Debug, Clone)]
pub struct DatasetIndex {
    root: PathBuf,
}

impl DatasetIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List dataset names (subdirectories of the root), sorted.
    ///
    /// # Errors
    /// Returns `IndexError::Io` if the root directory cannot be read.
    pub fn list_datasets(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in read_dir(&self.root)? {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!("Skipping dataset with non UTF-8 name: {}", raw.to_string_lossy()),
            }
        }
        names.sort();
        debug!("Found {} dataset(s) under {}", names.len(), self.root.display());
        Ok(names)
    }

    /// List image file names in a dataset, sorted.
    ///
    /// # Errors
    /// * Returns `IndexError::InvalidDatasetName` for names containing path separators.
    /// * Returns `IndexError::DatasetNotFound` if the dataset directory does not exist.
    /// * Returns `IndexError::Io` if the directory cannot be read.
    pub fn list_images(&self, dataset: &str) -> Result<Vec<String>> {
        let dir = self.require_dataset(dataset)?;
        let mut images = Vec::new();
        for entry in read_dir(&dir)? {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(true);
            if is_dir {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_image_file(&name) {
                images.push(name);
            }
        }
        images.sort();
        Ok(images)
    }

    /// Path of a dataset directory; the directory need not exist.
    ///
    /// # Errors
    /// Returns `IndexError::InvalidDatasetName` if `dataset` is not a plain directory name.
    pub fn dataset_path(&self, dataset: &str) -> Result<PathBuf> {
        validate_dataset_name(dataset)?;
        Ok(self.root.join(dataset))
    }

    /// Path of an existing dataset directory.
    ///
    /// # Errors
    /// Returns `IndexError::InvalidDatasetName` or `IndexError::DatasetNotFound`.
    pub fn require_dataset(&self, dataset: &str) -> Result<PathBuf> {
        let dir = self.dataset_path(dataset)?;
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(IndexError::DatasetNotFound(dataset.to_string()))
        }
    }

    /// Whether the dataset directory exists
    #[must_use]
    pub fn contains(&self, dataset: &str) -> bool {
        self.require_dataset(dataset).is_ok()
    }

    /// Resolve an existing image inside a dataset.
    ///
    /// # Errors
    /// * Returns `IndexError::InvalidFileName` if `filename` is not a plain file name.
    /// * Returns `IndexError::DatasetNotFound` if the dataset does not exist.
    /// * Returns `IndexError::ImageNotFound` if the file is missing or not an allowed image.
    pub fn image_path(&self, dataset: &str, filename: &str) -> Result<(PathBuf, ImageKind)> {
        validate_file_name(filename)?;
        let path = self.require_dataset(dataset)?.join(filename);
        match ImageKind::from_name(filename) {
            Some(kind) if path.is_file() => Ok((path, kind)),
            _ => Err(IndexError::ImageNotFound {
                dataset: dataset.to_string(),
                filename: filename.to_string(),
            }),
        }
    }
}

fn read_dir(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let io_err = |source| IndexError::Io {
        path: dir.to_path_buf(),
        source,
    };
    fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_err)
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Check that `name` is usable as a dataset directory name.
///
/// # Errors
/// Returns `IndexError::InvalidDatasetName` for empty names, `.`/`..`, or names with separators.
pub fn validate_dataset_name(name: &str) -> Result<()> {
    if is_plain_name(name) {
        Ok(())
    } else {
        Err(IndexError::InvalidDatasetName(name.to_string()))
    }
}

/// Check that `name` is usable as a file name inside a dataset.
///
/// # Errors
/// Returns `IndexError::InvalidFileName` for empty names, `.`/`..`, or names with separators.
pub fn validate_file_name(name: &str) -> Result<()> {
    if is_plain_name(name) {
        Ok(())
    } else {
        Err(IndexError::InvalidFileName(name.to_string()))
    }
}
