//! Boundaries of the external collaborators: translation and question answering.
//!
//! The core never calls these; front ends do, with a document taken from the
//! corpus. Request and reply shapes match the service's JSON endpoints
//! (`POST /translate`, `POST /ask`).

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TranslateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

impl TranslateRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() && self.summary.trim().is_empty() {
            return Err(anyhow!("missing text"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub pmc_id: String,
    pub question: String,
    #[serde(default)]
    pub is_translated: bool,
}

impl AskRequest {
    pub fn validate(&self) -> Result<()> {
        if self.pmc_id.trim().is_empty() || self.question.trim().is_empty() {
            return Err(anyhow!("missing parameters"));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
}

/// Raw `/translate` reply: either `{"translation": {...}}` or `{"error": "..."}`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TranslateReply {
    #[serde(default)]
    pub translation: Option<Translation>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TranslateReply {
    pub fn into_result(self) -> Result<Translation> {
        match (self.translation, self.error) {
            (_, Some(error)) => Err(anyhow!("translation service error: {error}")),
            (Some(translation), None) => Ok(translation),
            (None, None) => Err(anyhow!("translation service returned an empty reply")),
        }
    }
}

/// Raw `/ask` reply: either `{"answer": "..."}` or `{"error": "..."}`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AskReply {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AskReply {
    pub fn into_result(self) -> Result<Answer> {
        match (self.answer, self.error) {
            (_, Some(error)) => Err(anyhow!("question answering error: {error}")),
            (Some(answer), None) => Ok(Answer { answer }),
            (None, None) => Err(anyhow!("question answering returned an empty reply")),
        }
    }
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, request: TranslateRequest) -> Result<Translation>;
}

/// Stateless per call; any conversation history lives in the caller.
#[async_trait]
pub trait QuestionAnswering: Send + Sync {
    async fn ask(&self, request: AskRequest) -> Result<Answer>;
}
