use crate::document::Document;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};

/// Case-folded key used by the frequency table and by facet search.
pub fn fold_tag(tag: &str) -> String {
    tag.to_lowercase()
}

/// One row of the frequency table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TagCount {
    /// Spelling of the first occurrence seen while building the table.
    pub tag: String,
    /// Number of documents carrying the tag (case-folded).
    pub count: usize,
}

/// Case-folded tag -> document count, in first-seen order.
///
/// A document contributes at most once per folded tag, so `["A", "a"]` on one
/// document counts as a single occurrence of `a`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFrequency {
    entries: Vec<TagCount>,
    by_key: HashMap<String, usize>,
}

impl TagFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a Document>,
    {
        let mut table = Self::new();
        for doc in documents {
            let mut seen = HashSet::new();
            for tag in doc.tags() {
                let key = fold_tag(tag);
                if seen.insert(key.clone()) {
                    table.bump(key, tag, 1);
                }
            }
        }
        table
    }

    /// Build a table from precomputed counts. Entries whose folded keys
    /// collide are merged, keeping the first spelling.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (tag, count) in counts {
            let tag = tag.as_ref();
            table.bump(fold_tag(tag), tag, count);
        }
        table
    }

    fn bump(&mut self, key: String, spelling: &str, by: usize) {
        match self.by_key.get(&key) {
            Some(&idx) => self.entries[idx].count += by,
            None => {
                self.by_key.insert(key, self.entries.len());
                self.entries.push(TagCount {
                    tag: spelling.to_string(),
                    count: by,
                });
            }
        }
    }

    /// Count for `tag`, compared case-insensitively. Unknown tags count 0.
    pub fn count(&self, tag: &str) -> usize {
        self.by_key
            .get(&fold_tag(tag))
            .map(|&idx| self.entries[idx].count)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[TagCount] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TagFrequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.tag, &entry.count)?;
        }
        map.end()
    }
}
