//! Unit tests for search error types

#[cfg(test)]
mod tests {
    use crate::datasets::IndexError;
    use crate::search::error::SearchError;
    use crate::store::StoreError;
    use std::error::Error;
    use std::path::PathBuf;

    #[test]
    fn test_empty_query() {
        let error = SearchError::EmptyQuery;
        assert_eq!(error.to_string(), "Search term or dataset filter required");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_index_error_conversion() {
        let error: SearchError = IndexError::DatasetNotFound("cells".into()).into();
        assert_eq!(error.to_string(), "Index error: Dataset not found: cells");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_store_error_conversion() {
        let error: SearchError = StoreError::LegacyNotFound(PathBuf::from("x.json")).into();
        assert!(error.to_string().starts_with("Tag store error:"));
    }

    #[test]
    fn test_error_debug() {
        let debug = format!("{:?}", SearchError::EmptyQuery);
        assert!(debug.contains("EmptyQuery"));
    }
}
