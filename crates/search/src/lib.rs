//! Direct facet lookup over the tag-frequency table: prefix search ranked by
//! frequency, most-used tags, and random starting suggestions.

mod prefix;
mod suggest;

pub use prefix::{search, top_tags};
pub use suggest::{suggest, suggest_random, DEFAULT_SUGGESTIONS};
