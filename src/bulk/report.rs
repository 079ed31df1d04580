use std::fmt::Display;

use serde::{Serialize, Serializer};

/// Per-dataset result of a bulk tag request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetTagSummary {
    #[serde(skip)]
    pub dataset: String,
    /// Images selected by the image patterns
    pub images_matched: usize,
    /// Images that gained at least one tag
    pub images_updated: usize,
    pub tags_added: usize,
}

impl DatasetTagSummary {
    #[must_use]
    pub fn new(dataset: &str, images_matched: usize) -> Self {
        Self {
            dataset: dataset.to_string(),
            images_matched,
            ..Self::default()
        }
    }
}

/// A dataset the bulk request could not update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetFailure {
    pub dataset: String,
    pub error: String,
}

impl DatasetFailure {
    pub fn new(dataset: String, error: &impl Display) -> Self {
        Self {
            dataset,
            error: error.to_string(),
        }
    }
}

/// Aggregated result of a bulk tag request.
///
/// `per_dataset` keeps processing order and serializes as an object keyed by
/// dataset name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTagReport {
    #[serde(serialize_with = "summaries_by_dataset")]
    pub per_dataset: Vec<DatasetTagSummary>,
    pub failures: Vec<DatasetFailure>,
    /// Sum of `images_updated`
    pub total_images: usize,
    pub total_tags_added: usize,
}

impl BulkTagReport {
    pub(crate) fn record(&mut self, summary: DatasetTagSummary) {
        self.total_images += summary.images_updated;
        self.total_tags_added += summary.tags_added;
        self.per_dataset.push(summary);
    }

    /// Summary for one dataset, if it was updated
    #[must_use]
    pub fn dataset(&self, name: &str) -> Option<&DatasetTagSummary> {
        self.per_dataset.iter().find(|s| s.dataset == name)
    }

    /// True when some datasets could not be updated
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

fn summaries_by_dataset<S: Serializer>(
    summaries: &[DatasetTagSummary],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(summaries.iter().map(|s| (&s.dataset, s)))
}
