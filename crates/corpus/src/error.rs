use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorpusError>;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Malformed corpus: {reason}")]
    MalformedCorpus { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CorpusError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCorpus {
            reason: reason.into(),
        }
    }
}
