//! Operation surface over one datasets root
//!
//! `Library` bundles the directory index and the tag store so callers (the CLI,
//! or anything serving the datasets over HTTP) work with dataset and file names
//! only. Every method maps onto one component operation.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::bulk::{BulkPlan, BulkTagEngine, BulkTagReport, BulkTagRequest};
use crate::datasets::DatasetIndex;
use crate::import::{self, ImportEntry, ImportPreview, ImportReport};
use crate::search::{self, ImageRecord, SearchQuery};
use crate::store::{self, MigrationReport, TagStore};
use crate::MicrotagError;

type Result<T> = std::result::Result<T, MicrotagError>;

/// An image resolved for serving
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub path: PathBuf,
    pub content_type: &'static str,
}

/// Datasets root with its tag store
#[derive(Debug, Clone)]
pub struct Library {
    store: TagStore,
}

impl Library {
    /// Open the datasets under `root`. Nothing is read until an operation runs.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            store: TagStore::new(DatasetIndex::new(root)),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.index().root()
    }

    #[must_use]
    pub const fn index(&self) -> &DatasetIndex {
        self.store.index()
    }

    #[must_use]
    pub const fn store(&self) -> &TagStore {
        &self.store
    }

    /// Dataset names in sorted order
    ///
    /// # Errors
    /// Returns `MicrotagError::Index` if the root cannot be read.
    pub fn list_datasets(&self) -> Result<Vec<String>> {
        Ok(self.index().list_datasets()?)
    }

    /// Images with their tags, for one dataset or all of them
    ///
    /// # Errors
    /// Returns `MicrotagError::Search` for an unknown dataset or an unreadable tag document.
    pub fn list_images(&self, dataset: Option<&str>) -> Result<Vec<ImageRecord>> {
        Ok(search::list_images(&self.store, dataset)?)
    }

    /// Tags of one image; `[]` when it has none
    ///
    /// # Errors
    /// * Returns `MicrotagError::Index` if the dataset does not exist.
    /// * Returns `MicrotagError::Store` if the dataset's document cannot be loaded.
    pub fn get_tags(&self, dataset: &str, filename: &str) -> Result<Vec<String>> {
        self.index().require_dataset(dataset)?;
        Ok(self.store.get_tags(dataset, filename)?)
    }

    /// Replace the tags of an existing image.
    ///
    /// # Errors
    /// * Returns `MicrotagError::Index` if the dataset or image does not exist.
    /// * Returns `MicrotagError::Store` if the load-save cycle fails.
    pub fn set_tags(&self, dataset: &str, filename: &str, tags: Vec<String>) -> Result<Vec<String>> {
        self.index().image_path(dataset, filename)?;
        Ok(self.store.set_tags(dataset, filename, tags)?)
    }

    /// Add tags to an existing image, returning how many were new.
    ///
    /// # Errors
    /// * Returns `MicrotagError::Index` if the dataset or image does not exist.
    /// * Returns `MicrotagError::Store` if the load-save cycle fails.
    pub fn add_tags(&self, dataset: &str, filename: &str, tags: &[String]) -> Result<usize> {
        self.index().image_path(dataset, filename)?;
        Ok(self.store.add_tags(dataset, filename, tags)?)
    }

    /// Resolve a bulk request without writing anything.
    ///
    /// # Errors
    /// Returns `MicrotagError::Bulk` for structural errors (no tags, no match, bad pattern).
    pub fn plan_bulk_tag(&self, request: &BulkTagRequest) -> Result<BulkPlan> {
        Ok(BulkTagEngine::new(&self.store).plan(request)?)
    }

    /// Apply a previously resolved bulk plan
    #[must_use]
    pub fn apply_bulk_tag(&self, plan: BulkPlan) -> BulkTagReport {
        BulkTagEngine::new(&self.store).apply(plan)
    }

    /// Plan and apply a bulk request.
    ///
    /// # Errors
    /// Returns `MicrotagError::Bulk` for structural errors; per-dataset
    /// failures are reported in the returned report.
    pub fn bulk_tag(&self, request: &BulkTagRequest) -> Result<BulkTagReport> {
        Ok(BulkTagEngine::new(&self.store).run(request)?)
    }

    /// Case-insensitive search over file names, dataset names and tags
    ///
    /// # Errors
    /// Returns `MicrotagError::Search` for an empty query or unreadable state.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<ImageRecord>> {
        Ok(search::search(&self.store, query)?)
    }

    /// Preview which names an import would take and what they would be called.
    ///
    /// # Errors
    /// Returns `MicrotagError::Import` if the pattern is invalid or selects nothing.
    pub fn plan_import<S: AsRef<str>>(
        &self,
        names: &[S],
        file_pattern: &str,
        suffix: &str,
    ) -> Result<Vec<ImportPreview>> {
        Ok(import::plan_import(names, file_pattern, suffix)?)
    }

    /// Copy files into a dataset, creating it if needed.
    ///
    /// # Errors
    /// Returns `MicrotagError::Import` if the dataset name is invalid or its
    /// directory cannot be created.
    pub fn import(&self, dataset: &str, suffix: &str, entries: Vec<ImportEntry>) -> Result<ImportReport> {
        Ok(import::import_files(self.index(), dataset, suffix, entries)?)
    }

    /// Resolve an image for serving.
    ///
    /// # Errors
    /// Returns `MicrotagError::Index` if the dataset or image does not exist.
    pub fn image_file(&self, dataset: &str, filename: &str) -> Result<ImageFile> {
        let (path, kind) = self.index().image_path(dataset, filename)?;
        Ok(ImageFile {
            path,
            content_type: kind.content_type(),
        })
    }

    /// Merge a legacy single-file tag document into per-dataset documents.
    ///
    /// # Errors
    /// Returns `MicrotagError::Store` if the legacy file is missing or corrupt,
    /// or a dataset document cannot be updated.
    pub fn migrate(&self, legacy_file: &Path) -> Result<MigrationReport> {
        Ok(store::migrate_legacy(&self.store, legacy_file)?)
    }
}
