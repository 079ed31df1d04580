//! Bulk tag engine
//!
//! Applies one tag list to every image matched by a pair of wildcard patterns:
//! dataset patterns select dataset directories, image patterns select image
//! files inside each of them. Work happens in two steps so callers can preview:
//!
//! 1. [`BulkTagEngine::plan`] resolves the patterns against the directory index.
//! 2. [`BulkTagEngine::apply`] runs one locked load-merge-save cycle per dataset.
//!
//! Tags are only ever appended (add-if-absent); existing tags keep their order.
//! A dataset that cannot be listed, loaded or saved is recorded as a failure
//! and the rest of the batch carries on.

pub mod error;
mod report;

pub use error::BulkError;
pub use report::{BulkTagReport, DatasetFailure, DatasetTagSummary};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::patterns::{MATCH_ALL, MatchCase, PatternSet};
use crate::store::{TagStore, normalize_tags};

type Result<T> = std::result::Result<T, BulkError>;

/// What to tag: dataset patterns, image patterns and the tags to add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkTagRequest {
    /// A dataset is selected if any of these match its name
    pub dataset_patterns: Vec<String>,
    /// An image is selected if any of these match its file name; none (or only empty strings) means `*`
    pub image_patterns: Vec<String>,
    /// Tags appended to each selected image, in order
    pub tags: Vec<String>,
}

impl BulkTagRequest {
    /// Request tagging every image of the datasets matching `dataset_pattern`
    #[must_use]
    pub fn new(dataset_pattern: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            dataset_patterns: vec![dataset_pattern.into()],
            image_patterns: Vec::new(),
            tags,
        }
    }

    /// Restrict the request to images matching `pattern` (may be called repeatedly)
    #[must_use]
    pub fn image_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.image_patterns.push(pattern.into());
        self
    }

    fn image_patterns_or_default(&self) -> Vec<String> {
        let given: Vec<String> = self
            .image_patterns
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();
        if given.is_empty() {
            vec![MATCH_ALL.to_string()]
        } else {
            given
        }
    }
}

/// Images selected in one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetTarget {
    pub dataset: String,
    pub images: Vec<String>,
}

/// Resolved bulk request, ready to apply
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPlan {
    pub targets: Vec<DatasetTarget>,
    /// Candidate datasets whose images could not be listed
    pub failures: Vec<DatasetFailure>,
    pub tags: Vec<String>,
}

impl BulkPlan {
    /// Number of images that will be visited
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.targets.iter().map(|t| t.images.len()).sum()
    }
}

/// Resolves and applies bulk tag requests against a tag store
pub struct BulkTagEngine<'a> {
    store: &'a TagStore,
}

impl<'a> BulkTagEngine<'a> {
    #[must_use]
    pub const fn new(store: &'a TagStore) -> Self {
        Self { store }
    }

    /// Resolve a request into per-dataset image lists without writing anything.
    ///
    /// Datasets and images appear in directory index order. Datasets with no
    /// matching image are left out.
    ///
    /// # Errors
    /// * Returns `BulkError::EmptyTagList` if no tag is left after trimming.
    /// * Returns `BulkError::Pattern` if a pattern cannot be compiled.
    /// * Returns `BulkError::Index` if the datasets root cannot be listed.
    /// * Returns `BulkError::NoDatasetMatch` if no dataset matches.
    /// * Returns `BulkError::NoImageMatch` if datasets matched but none had a
    ///   matching image (and none failed to list).
    pub fn plan(&self, request: &BulkTagRequest) -> Result<BulkPlan> {
        let tags = normalize_tags(&request.tags);
        if tags.is_empty() {
            return Err(BulkError::EmptyTagList);
        }
        let dataset_set = PatternSet::compile(&request.dataset_patterns, MatchCase::Sensitive)?;
        let image_set = PatternSet::compile(&request.image_patterns_or_default(), MatchCase::Sensitive)?;

        let index = self.store.index();
        let candidates = dataset_set.filter(&index.list_datasets()?);
        if candidates.is_empty() {
            return Err(BulkError::NoDatasetMatch {
                pattern: dataset_set.describe(),
            });
        }

        let mut targets = Vec::new();
        let mut failures = Vec::new();
        for dataset in candidates {
            match index.list_images(&dataset) {
                Ok(images) => {
                    let images = image_set.filter(&images);
                    if images.is_empty() {
                        debug!("No images match '{}' in dataset '{dataset}'", image_set.describe());
                    } else {
                        targets.push(DatasetTarget { dataset, images });
                    }
                }
                Err(e) => {
                    warn!("Skipping dataset '{dataset}': {e}");
                    failures.push(DatasetFailure::new(dataset, &e));
                }
            }
        }

        if targets.is_empty() && failures.is_empty() {
            return Err(BulkError::NoImageMatch {
                dataset_pattern: dataset_set.describe(),
                image_pattern: image_set.describe(),
            });
        }

        Ok(BulkPlan {
            targets,
            failures,
            tags,
        })
    }

    /// Apply a plan: one load-merge-save cycle per dataset.
    ///
    /// Never fails as a whole; per-dataset errors land in the report.
    #[must_use]
    pub fn apply(&self, plan: BulkPlan) -> BulkTagReport {
        let mut report = BulkTagReport {
            failures: plan.failures,
            ..BulkTagReport::default()
        };

        for target in plan.targets {
            let outcome = self.store.update(&target.dataset, |map| {
                let mut summary = DatasetTagSummary::new(&target.dataset, target.images.len());
                for image in &target.images {
                    let added = map.add(image, &plan.tags);
                    if added > 0 {
                        summary.images_updated += 1;
                        summary.tags_added += added;
                    }
                }
                summary
            });
            match outcome {
                Ok(summary) => {
                    info!(
                        "Added {} tag(s) to {} image(s) in dataset '{}'",
                        summary.tags_added, summary.images_updated, summary.dataset
                    );
                    report.record(summary);
                }
                Err(e) => {
                    warn!("Failed to tag dataset '{}': {e}", target.dataset);
                    report.failures.push(DatasetFailure::new(target.dataset, &e));
                }
            }
        }
        report
    }

    /// Plan and apply in one call.
    ///
    /// # Errors
    /// Returns the structural errors of [`BulkTagEngine::plan`].
    pub fn run(&self, request: &BulkTagRequest) -> Result<BulkTagReport> {
        let plan = self.plan(request)?;
        Ok(self.apply(plan))
    }
}

/// Apply `tags` to images matching `image_pattern` in datasets matching `dataset_pattern`.
///
/// # Errors
/// See [`BulkTagEngine::plan`].
pub fn apply_bulk_tags(
    store: &TagStore,
    dataset_pattern: &str,
    image_pattern: &str,
    tags: &[String],
) -> Result<BulkTagReport> {
    let request = BulkTagRequest::new(dataset_pattern, tags.to_vec()).image_pattern(image_pattern);
    BulkTagEngine::new(store).run(&request)
}
