//! # Tagtrail Corpus
//!
//! Loads and indexes a collection of tagged documents.
//!
//! ## Pipeline
//!
//! ```text
//! JSON document list
//!     │
//!     ├──> Record parser
//!     │      └─> Documents (trimmed, distinct tags + inert payload)
//!     │
//!     ├──> Tag index
//!     │      ├─ exact tag -> document positions
//!     │      └─ identifier -> document
//!     │
//!     └──> Tag frequency table
//!            └─> case-folded tag -> document count
//! ```
//!
//! ## Example
//!
//! ```
//! use tagtrail_corpus::Corpus;
//!
//! let raw = serde_json::json!([
//!     {"pmc_id": "PMC1", "title": "Bone loss", "tags": ["bone", "Spaceflight"]},
//!     {"pmc_id": "PMC2", "title": "Plant growth", "tags": ["spaceflight"]},
//! ]);
//! let corpus = Corpus::load(&raw)?;
//!
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(corpus.frequency().count("spaceflight"), 2);
//! # Ok::<(), tagtrail_corpus::CorpusError>(())
//! ```

mod corpus;
mod document;
mod error;
mod frequency;

pub use corpus::Corpus;
pub use document::{Document, UNTITLED_LABEL};
pub use error::{CorpusError, Result};
pub use frequency::{fold_tag, TagCount, TagFrequency};
