//! # Tagtrail Navigator
//!
//! Faceted narrowing over a [`tagtrail_corpus::Corpus`].
//!
//! ## Architecture
//!
//! ```text
//! Corpus + selection path
//!     │
//!     ├──> Narrowing engine
//!     │      ├─ matching documents (posting-list intersection)
//!     │      └─ available facets (empty once <= 1 document matches)
//!     │
//!     └──> Chain builder
//!            ├─ one facet level per selected tag, in selection order
//!            └─ leaves (matching documents) at the deepest level only
//! ```
//!
//! Selection state is owned by the caller; every operation here is a pure
//! function of the corpus and the path it is given.

mod chain;
mod narrowing;
mod navigator;

#[cfg(test)]
mod fixtures;

pub use chain::{build_chain, ChainNode, FacetNode, LeafNode, EMPTY_CHAIN_LABEL};
pub use narrowing::{available_facets, filter_matching, matching_documents};
pub use navigator::{Exploration, FacetNavigator};
