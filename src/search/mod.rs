//! Image listing and free-text search
//!
//! Flattens datasets into `{filename, dataset, tags}` records and filters them
//! by a case-insensitive substring that may hit the file name, the dataset
//! name, or any tag.

pub mod error;

pub use error::SearchError;

use serde::Serialize;

use crate::store::TagStore;

type Result<T> = std::result::Result<T, SearchError>;

/// An image together with its dataset and tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub filename: String,
    pub dataset: String,
    pub tags: Vec<String>,
}

impl ImageRecord {
    /// Substring match against an already lower-cased term
    fn matches(&self, term: &str) -> bool {
        self.filename.to_lowercase().contains(term)
            || self.dataset.to_lowercase().contains(term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(term))
    }
}

/// Search criteria; at least one field must be set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: Option<String>,
    pub dataset: Option<String>,
}

impl SearchQuery {
    #[must_use]
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            dataset: None,
        }
    }

    #[must_use]
    pub fn in_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = Some(dataset.into());
        self
    }
}

/// List images with their tags, for one dataset or all of them.
///
/// # Errors
/// * Returns `SearchError::IndexError` if `dataset` does not exist or a directory cannot be read.
/// * Returns `SearchError::StoreError` if a tag document is corrupt or unreadable.
pub fn list_images(store: &TagStore, dataset: Option<&str>) -> Result<Vec<ImageRecord>> {
    let datasets = match dataset {
        Some(name) => vec![name.to_string()],
        None => store.index().list_datasets()?,
    };
    let mut records = Vec::new();
    for name in &datasets {
        collect_dataset(store, name, &mut records)?;
    }
    Ok(records)
}

/// Find images whose file name, dataset name or tags contain the term.
///
/// The term is compared case-insensitively. A dataset filter naming an
/// unknown dataset gives an empty result. Without a term, every image of the
/// filtered dataset is returned.
///
/// # Errors
/// * Returns `SearchError::EmptyQuery` if neither term nor dataset is given.
/// * Returns index or store errors from collecting records.
pub fn search(store: &TagStore, query: &SearchQuery) -> Result<Vec<ImageRecord>> {
    let term = query
        .term
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);
    let dataset = query.dataset.as_deref().filter(|d| !d.is_empty());
    if term.is_none() && dataset.is_none() {
        return Err(SearchError::EmptyQuery);
    }

    let known = store.index().list_datasets()?;
    let mut records = Vec::new();
    for name in known.iter().filter(|n| dataset.is_none_or(|d| d == n.as_str())) {
        collect_dataset(store, name, &mut records)?;
    }

    if let Some(term) = term {
        records.retain(|r| r.matches(&term));
    }
    Ok(records)
}

fn collect_dataset(store: &TagStore, dataset: &str, out: &mut Vec<ImageRecord>) -> Result<()> {
    let images = store.index().list_images(dataset)?;
    let tags = store.load(dataset)?;
    out.extend(images.into_iter().map(|filename| ImageRecord {
        tags: tags.get(&filename).to_vec(),
        dataset: dataset.to_string(),
        filename,
    }));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::IndexError;
    use crate::testing::{TestRoot, tags};

    fn fixture() -> TestRoot {
        let root = TestRoot::new();
        root.images("cells", &["a.jpg", "b.png"]);
        root.write_tags("cells", r#"{"a.jpg": ["Nucleus", "biology"]}"#);
        root.images("tissue", &["slide.bmp", "cellwall.gif", "notes.txt"]);
        root
    }

    fn names(records: &[ImageRecord]) -> Vec<String> {
        records.iter().map(|r| format!("{}/{}", r.dataset, r.filename)).collect()
    }

    #[test]
    fn test_list_all_images() {
        let root = fixture();
        let records = list_images(&root.store(), None).unwrap();
        assert_eq!(
            names(&records),
            vec!["cells/a.jpg", "cells/b.png", "tissue/cellwall.gif", "tissue/slide.bmp"]
        );
        assert_eq!(records[0].tags, tags(&["Nucleus", "biology"]));
        assert!(records[1].tags.is_empty());
    }

    #[test]
    fn test_list_one_dataset() {
        let root = fixture();
        let records = list_images(&root.store(), Some("tissue")).unwrap();
        assert_eq!(names(&records), vec!["tissue/cellwall.gif", "tissue/slide.bmp"]);
    }

    #[test]
    fn test_list_unknown_dataset_is_not_found() {
        let root = fixture();
        let err = list_images(&root.store(), Some("nope")).unwrap_err();
        assert!(matches!(err, SearchError::IndexError(IndexError::DatasetNotFound(_))));
    }

    #[test]
    fn test_search_matches_tags_case_insensitively() {
        let root = fixture();
        let records = search(&root.store(), &SearchQuery::term("NUCLEUS")).unwrap();
        assert_eq!(names(&records), vec!["cells/a.jpg"]);
    }

    #[test]
    fn test_search_matches_dataset_and_filename() {
        let root = fixture();
        // "cell" hits the whole "cells" dataset by name and tissue/cellwall.gif by file name
        let records = search(&root.store(), &SearchQuery::term("cell")).unwrap();
        assert_eq!(names(&records), vec!["cells/a.jpg", "cells/b.png", "tissue/cellwall.gif"]);
    }

    #[test]
    fn test_search_with_dataset_filter() {
        let root = fixture();
        let query = SearchQuery::term("cell").in_dataset("tissue");
        assert_eq!(names(&search(&root.store(), &query).unwrap()), vec!["tissue/cellwall.gif"]);

        let only_filter = SearchQuery::default().in_dataset("cells");
        assert_eq!(search(&root.store(), &only_filter).unwrap().len(), 2);
    }

    #[test]
    fn test_search_unknown_dataset_filter_is_empty() {
        let root = fixture();
        let query = SearchQuery::term("a").in_dataset("nope");
        assert!(search(&root.store(), &query).unwrap().is_empty());
    }

    #[test]
    fn test_search_requires_term_or_dataset() {
        let root = fixture();
        let err = search(&root.store(), &SearchQuery::default()).unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
        let err = search(&root.store(), &SearchQuery::term("")).unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
    }

    #[test]
    fn test_corrupt_tags_surface_as_error() {
        let root = fixture();
        root.write_tags("tissue", "[oops");
        let err = search(&root.store(), &SearchQuery::term("x")).unwrap_err();
        assert!(matches!(err, SearchError::StoreError(_)));
    }

    #[test]
    fn test_record_json_shape() {
        let root = fixture();
        let records = list_images(&root.store(), Some("cells")).unwrap();
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"filename": "a.jpg", "dataset": "cells", "tags": ["Nucleus", "biology"]})
        );
    }
}
