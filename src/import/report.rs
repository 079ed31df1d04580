use byte_unit::{Byte, UnitType};
use serde::Serialize;

/// A file placed in the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedFile {
    pub original: String,
    pub destination: String,
    pub bytes: u64,
}

/// A file that could not be imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    pub original: String,
    pub reason: String,
}

impl ImportFailure {
    #[must_use]
    pub fn new(original: &str, reason: &str) -> Self {
        Self {
            original: original.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Preview row: an original name and the destination it would get
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPreview {
    pub original: String,
    /// `None` when the name yields no usable file name
    pub destination: Option<String>,
}

impl ImportPreview {
    /// True when the destination differs from the original's file name
    #[must_use]
    pub fn is_renamed(&self) -> bool {
        let base = self.original.rsplit(['/', '\\']).next().unwrap_or(&self.original);
        self.destination.as_deref().is_some_and(|d| d != base)
    }
}

/// Counts and details of an import batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported_count: usize,
    pub failed_count: usize,
    pub imported: Vec<ImportedFile>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    pub(crate) fn push_imported(&mut self, file: ImportedFile) {
        self.imported_count += 1;
        self.imported.push(file);
    }

    pub(crate) fn push_failed(&mut self, failure: ImportFailure) {
        self.failed_count += 1;
        self.failed.push(failure);
    }

    /// Bytes written across all imported files
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.imported.iter().map(|f| f.bytes).sum()
    }

    /// Total size for display, e.g. `1.5 MiB`
    #[must_use]
    pub fn total_size(&self) -> String {
        Byte::from_u64(self.total_bytes())
            .get_appropriate_unit(UnitType::Binary)
            .to_string()
    }

    /// True when some files failed while others were imported
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.imported_count > 0 && self.failed_count > 0
    }
}
