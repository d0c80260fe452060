use serde::{Deserialize, Serialize};

pub mod services;

pub use services::{
    Answer, AskReply, AskRequest, QuestionAnswering, TranslateReply, TranslateRequest,
    Translation, TranslationService,
};

pub const PROTOCOL_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
}

/// Navigation chain as handed to the presentation layer.
///
/// `name` is the display label: the tag for facet nodes, the document label
/// for leaves.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainView {
    Empty {
        name: String,
    },
    Facet {
        name: String,
        accumulated_path: Vec<String>,
        children: Vec<ChainView>,
    },
    Leaf {
        name: String,
        document_id: String,
        accumulated_path: Vec<String>,
    },
}

impl ChainView {
    pub fn name(&self) -> &str {
        match self {
            Self::Empty { name } | Self::Facet { name, .. } | Self::Leaf { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[ChainView] {
        match self {
            Self::Facet { children, .. } => children,
            Self::Empty { .. } | Self::Leaf { .. } => &[],
        }
    }
}

/// One exploration step: what matches the path and where it can go next.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ExploreView {
    pub path: Vec<String>,
    pub matching: Vec<DocumentSummary>,
    pub available_facets: Vec<String>,
    pub chain: ChainView,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TagCountView {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub tags: Vec<TagCountView>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub documents: usize,
    pub distinct_tags: usize,
    pub top_tags: Vec<TagCountView>,
}
