//! Body annotation store.
//!
//! Regression fixtures pair a page's raw HTML with the cleaned body a human
//! approved. The store is a sorted map from item id to annotation, saved as
//! pretty-printed JSON so diffs stay reviewable.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One annotated page: source and expected cleaned body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyAnnotation {
    pub url: String,
    pub raw_html: String,
    pub expected_html: String,
}

/// Map-like store of [`BodyAnnotation`] values keyed by item id, persisted
/// to disk as JSON with sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyAnnotations(BTreeMap<String, BodyAnnotation>);

impl BodyAnnotations {
    /// Load annotations from `path`. A missing file yields an empty store
    /// rather than an error; malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "body annotations file does not exist at {}; loading empty annotations",
                path.display()
            );
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(Self(serde_json::from_str(&content)?))
    }

    /// Write the store to `path` as pretty-printed JSON, keys sorted.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.0)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn insert(&mut self, id: impl Into<String>, annotation: BodyAnnotation) {
        self.0.insert(id.into(), annotation);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BodyAnnotation> {
        self.0.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BodyAnnotation> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a BodyAnnotations {
    type Item = (&'a String, &'a BodyAnnotation);
    type IntoIter = btree_map::Iter<'a, String, BodyAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BodyAnnotation {
        BodyAnnotation {
            url: "https://example.com/a".to_string(),
            raw_html: "<div><p>x</p></div>".to_string(),
            expected_html: "<article><p>x</p></article>".to_string(),
        }
    }

    #[test]
    fn insert_and_get() {
        let mut store = BodyAnnotations::default();
        assert!(store.is_empty());
        store.insert("item-1", sample());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("item-1"), Some(&sample()));
        assert_eq!(store.get("item-2"), None);
    }

    #[test]
    fn missing_file_loads_empty() {
        let store =
            BodyAnnotations::load(Path::new("/nonexistent/annotations.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn iteration_is_key_sorted() {
        let mut store = BodyAnnotations::default();
        store.insert("b", sample());
        store.insert("a", sample());
        let keys: Vec<&String> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
