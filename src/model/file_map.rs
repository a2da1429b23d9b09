// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ordered map from relative output path to file content.
//!
//! Insertion order is generation order and is preserved through
//! serialization, archive layout and disk materialization.

use std::collections::HashMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// Ordered, key-unique file map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    entries: Vec<(String, String)>,
    index:   HashMap<String, usize>
}

impl FileMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new file.
    ///
    /// Returns `false` and leaves the map untouched when `path` already
    /// exists.
    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) -> bool {
        let path = path.into();
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, content.into()));
        true
    }

    /// Replace the content of an existing file, or append it.
    pub fn upsert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        match self.index.get(&path) {
            Some(&pos) => self.entries[pos].1 = content.into(),
            None => {
                self.insert(path, content);
            }
        }
    }

    /// Content of a file.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// Check whether a file exists.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(path, content)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Iterate paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(p, _)| p.as_str())
    }
}

impl Serialize for FileMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, content) in &self.entries {
            map.serialize_entry(path, content)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a FileMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut files = FileMap::new();
        assert!(files.insert("b.txt", "b"));
        assert!(files.insert("a.txt", "a"));
        assert!(files.insert("c.txt", "c"));

        let paths: Vec<&str> = files.paths().collect();
        assert_eq!(paths, ["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn rejects_duplicate_paths() {
        let mut files = FileMap::new();
        assert!(files.insert("a.txt", "first"));
        assert!(!files.insert("a.txt", "second"));
        assert_eq!(files.get("a.txt"), Some("first"));
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn upsert_keeps_position() {
        let mut files = FileMap::new();
        files.insert("a.txt", "a");
        files.insert("b.txt", "b");
        files.upsert("a.txt", "changed");
        files.upsert("c.txt", "c");

        let all: Vec<(&str, &str)> = files.iter().collect();
        assert_eq!(all, [("a.txt", "changed"), ("b.txt", "b"), ("c.txt", "c")]);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let mut files = FileMap::new();
        files.insert("z.txt", "1");
        files.insert("a.txt", "2");
        let json = serde_json::to_string(&files).unwrap();
        assert_eq!(json, r#"{"z.txt":"1","a.txt":"2"}"#);
    }
}
