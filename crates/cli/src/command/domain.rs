use serde::{Deserialize, Serialize};
use serde_json::Value;
use tagtrail_corpus::CorpusError;
use tagtrail_protocol::{ErrorEnvelope, PROTOCOL_SCHEMA_VERSION};

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandAction {
    Stats,
    Suggest,
    Explore,
    Chain,
    Search,
    Show,
    Translate,
    Ask,
}

impl CommandAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Suggest => "suggest",
            Self::Explore => "explore",
            Self::Chain => "chain",
            Self::Search => "search",
            Self::Show => "show",
            Self::Translate => "translate",
            Self::Ask => "ask",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct StatsPayload {
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SuggestPayload {
    #[serde(default)]
    pub count: Option<usize>,
}

/// Used by both `explore` and `chain`.
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PathPayload {
    #[serde(default)]
    pub path: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPayload {
    pub query: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShowPayload {
    pub id: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AskPayload {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub translated: bool,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
    pub data: Value,
    pub meta: ResponseMeta,
}

impl CommandResponse {
    pub fn ok(data: Value, meta: ResponseMeta) -> Self {
        Self {
            status: CommandStatus::Ok,
            error: None,
            data,
            meta,
        }
    }

    pub fn from_error(err: &anyhow::Error, meta: ResponseMeta) -> Self {
        Self {
            status: CommandStatus::Error,
            error: Some(classify_error(err)),
            data: Value::Null,
            meta,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Clone)]
pub struct ResponseMeta {
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Default for ResponseMeta {
    fn default() -> Self {
        Self {
            schema_version: PROTOCOL_SCHEMA_VERSION,
            action: None,
            documents: None,
            duration_ms: None,
        }
    }
}

/// Prefix of "unknown document" errors, matched by [`classify_error`].
pub const DOCUMENT_NOT_FOUND: &str = "Document not found";
/// Prefix of payload validation errors, matched by [`classify_error`].
pub const INVALID_PAYLOAD: &str = "Invalid payload";

pub fn classify_error(err: &anyhow::Error) -> ErrorEnvelope {
    let message = format!("{err:#}");

    let corpus_error = err.chain().find_map(|cause| cause.downcast_ref::<CorpusError>());
    let (code, hint) = match corpus_error {
        Some(CorpusError::MalformedCorpus { .. }) | Some(CorpusError::Json(_)) => (
            "malformed_corpus",
            Some("The corpus file must hold a JSON list of document objects."),
        ),
        Some(CorpusError::Io(_)) => (
            "corpus_unavailable",
            Some("Point --corpus (or TAGTRAIL_CORPUS) at an existing JSON file."),
        ),
        None if message.starts_with(DOCUMENT_NOT_FOUND) => ("not_found", None),
        None if message.starts_with(INVALID_PAYLOAD)
            || message.contains("missing text")
            || message.contains("missing parameters") =>
        {
            ("invalid_request", None)
        }
        None if message.contains("Service") || message.contains("service") => (
            "service_error",
            Some("Check that the translation/QA service is running (--service-url)."),
        ),
        None => ("internal", None),
    };

    ErrorEnvelope {
        code: code.to_string(),
        message,
        hint: hint.map(str::to_string),
    }
}
