//! Tag map type and tag list parsing

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One dataset's tags: image file name to an ordered, duplicate-free tag list.
///
/// Serializes as a plain JSON object (`{"cell1.jpg": ["biology", "nucleus"]}`)
/// with keys in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagMap {
    entries: BTreeMap<String, Vec<String>>,
}

impl TagMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags for `filename`, empty when the image has none
    #[must_use]
    pub fn get(&self, filename: &str) -> &[String] {
        self.entries.get(filename).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn contains(&self, filename: &str) -> bool {
        self.entries.contains_key(filename)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }

    /// Append each tag not already present for `filename`, in input order.
    ///
    /// Existing tags keep their order. No entry is created unless at least one
    /// tag is added. Returns the number of tags added.
    pub fn add(&mut self, filename: &str, tags: &[String]) -> usize {
        let existing = self.get(filename);
        let mut fresh: Vec<String> = Vec::new();
        for tag in tags {
            if !existing.contains(tag) && !fresh.contains(tag) {
                fresh.push(tag.clone());
            }
        }
        if fresh.is_empty() {
            return 0;
        }
        let added = fresh.len();
        self.entries
            .entry(filename.to_string())
            .or_default()
            .extend(fresh);
        added
    }

    /// Replace the tags for `filename` (duplicates dropped, first occurrence kept).
    ///
    /// An empty list leaves an explicit empty entry. Returns the stored list.
    pub fn set(&mut self, filename: &str, tags: Vec<String>) -> &[String] {
        let mut unique: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        let slot = self.entries.entry(filename.to_string()).or_default();
        *slot = unique;
        slot.as_slice()
    }
}

impl From<BTreeMap<String, Vec<String>>> for TagMap {
    fn from(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }
}

/// Split a comma-separated tag list, trimming tokens and dropping empty ones.
///
/// # Examples
/// ```
/// use microtag::store::parse_tag_list;
/// assert_eq!(parse_tag_list("biology, nucleus ,,"), vec!["biology", "nucleus"]);
/// ```
#[must_use]
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim each tag and drop the ones left empty; order and duplicates are kept.
#[must_use]
pub fn normalize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|t| t.as_ref().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse several comma-separated arguments into one tag list, keeping first occurrences.
#[must_use]
pub fn parse_tag_args<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in args.iter().flat_map(|a| parse_tag_list(a.as_ref())) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
