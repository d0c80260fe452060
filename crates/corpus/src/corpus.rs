use crate::document::{value_kind, Document};
use crate::error::{CorpusError, Result};
use crate::frequency::TagFrequency;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Immutable, indexed document collection.
///
/// Built once from the raw document list; every navigation and search
/// operation reads it without mutation.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    frequency: TagFrequency,

    /// Exact tag -> ascending document positions
    postings: HashMap<String, Vec<usize>>,

    /// Distinct exact tags in first-seen order
    vocabulary: Vec<String>,

    /// Identifier -> position of the first document carrying it
    by_id: HashMap<String, usize>,
}

impl Corpus {
    /// Load a corpus from an already-fetched JSON document list.
    ///
    /// Fails with [`CorpusError::MalformedCorpus`] when `raw` is not a list of
    /// objects; records without a usable `tags` field load with no tags.
    pub fn load(raw: &Value) -> Result<Self> {
        let Value::Array(records) = raw else {
            return Err(CorpusError::malformed(format!(
                "expected a list of documents, found {}",
                value_kind(raw)
            )));
        };

        let documents = records
            .iter()
            .enumerate()
            .map(|(position, record)| Document::from_record(position, record))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_documents(documents))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Self::load(&raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let corpus = Self::from_json_str(&text)?;
        log::info!(
            "Loaded {} documents ({} distinct tags) from {}",
            corpus.len(),
            corpus.vocabulary.len(),
            path.display()
        );
        Ok(corpus)
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        let frequency = TagFrequency::from_documents(&documents);

        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        let mut vocabulary = Vec::new();
        let mut by_id = HashMap::new();

        for (position, doc) in documents.iter().enumerate() {
            for tag in doc.tags() {
                let list = postings.entry(tag.clone()).or_insert_with(|| {
                    vocabulary.push(tag.clone());
                    Vec::new()
                });
                list.push(position);
            }

            if doc.id().is_empty() {
                continue;
            }
            if by_id.contains_key(doc.id()) {
                log::warn!("Duplicate document id {}, keeping the first", doc.id());
            } else {
                by_id.insert(doc.id().to_string(), position);
            }
        }

        log::debug!(
            "Indexed {} documents, {} exact tags, {} folded tags",
            documents.len(),
            vocabulary.len(),
            frequency.len()
        );

        Self {
            documents,
            frequency,
            postings,
            vocabulary,
            by_id,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Document> {
        self.documents.get(position)
    }

    /// Document detail lookup for a leaf identifier.
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&position| &self.documents[position])
    }

    pub fn frequency(&self) -> &TagFrequency {
        &self.frequency
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Ascending positions of the documents carrying exactly `tag`.
    pub fn postings(&self, tag: &str) -> &[usize] {
        self.postings.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }
}
