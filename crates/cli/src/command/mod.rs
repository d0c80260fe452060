pub mod domain;

pub use domain::{
    AskPayload, CommandAction, CommandRequest, CommandResponse, PathPayload, ResponseMeta,
    SearchPayload, ShowPayload, StatsPayload, SuggestPayload,
};

use crate::config::ExplorerConfig;
use crate::services::HttpServices;
use anyhow::{anyhow, Context, Result};
use domain::{DOCUMENT_NOT_FOUND, INVALID_PAYLOAD};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Instant;
use tagtrail_corpus::{Corpus, Document, TagCount};
use tagtrail_navigator::FacetNavigator;
use tagtrail_protocol::{
    AskRequest, QuestionAnswering, SearchView, StatsView, TagCountView, TranslateRequest,
    TranslationService,
};

/// Executes command requests against a corpus loaded once at startup.
pub struct CommandHandler {
    corpus: Corpus,
    config: ExplorerConfig,
}

impl CommandHandler {
    pub fn new(corpus: Corpus, config: ExplorerConfig) -> Self {
        Self { corpus, config }
    }

    pub fn open(config: ExplorerConfig) -> Result<Self> {
        let corpus = Corpus::from_path(&config.corpus)
            .with_context(|| format!("Failed to load corpus {}", config.corpus.display()))?;
        Ok(Self::new(corpus, config))
    }

    pub async fn execute(&self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let action = request.action;
        let result = self.dispatch(action, request.payload).await;

        let meta = ResponseMeta {
            action: Some(action.as_str()),
            documents: Some(self.corpus.len()),
            duration_ms: Some(started.elapsed().as_millis() as u64),
            ..Default::default()
        };
        match result {
            Ok(data) => CommandResponse::ok(data, meta),
            Err(err) => {
                log::debug!("Action {} failed: {err:#}", action.as_str());
                CommandResponse::from_error(&err, meta)
            }
        }
    }

    async fn dispatch(&self, action: CommandAction, payload: Value) -> Result<Value> {
        let navigator = FacetNavigator::new(&self.corpus);
        match action {
            CommandAction::Stats => {
                let payload: StatsPayload = parse_payload(payload)?;
                let top = payload.top.unwrap_or(self.config.top_tags);
                let view = StatsView {
                    documents: self.corpus.len(),
                    distinct_tags: self.corpus.frequency().len(),
                    top_tags: counts_view(tagtrail_search::top_tags(self.corpus.frequency(), top)),
                };
                Ok(serde_json::to_value(view)?)
            }
            CommandAction::Suggest => {
                let payload: SuggestPayload = parse_payload(payload)?;
                let count = payload.count.unwrap_or(self.config.suggestions);
                let tags = tagtrail_search::suggest_random(self.corpus.vocabulary(), count);
                Ok(json!({ "tags": tags }))
            }
            CommandAction::Explore => {
                let payload: PathPayload = parse_payload(payload)?;
                Ok(serde_json::to_value(navigator.explore(&payload.path).to_view())?)
            }
            CommandAction::Chain => {
                let payload: PathPayload = parse_payload(payload)?;
                Ok(serde_json::to_value(navigator.chain(&payload.path).to_view())?)
            }
            CommandAction::Search => {
                let payload: SearchPayload = parse_payload(payload)?;
                let mut hits = tagtrail_search::search(self.corpus.frequency(), &payload.query);
                if let Some(limit) = payload.limit {
                    hits.truncate(limit);
                }
                let view = SearchView {
                    query: payload.query,
                    tags: counts_view(hits),
                };
                Ok(serde_json::to_value(view)?)
            }
            CommandAction::Show => {
                let payload: ShowPayload = parse_payload(payload)?;
                let doc = self.document(&payload.id)?;
                Ok(serde_json::to_value(doc)?)
            }
            CommandAction::Translate => {
                let payload: ShowPayload = parse_payload(payload)?;
                let doc = self.document(&payload.id)?;
                let request = TranslateRequest {
                    title: doc.title().to_string(),
                    summary: doc
                        .detail("summary")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                };
                let translation = self.services()?.translate(request).await?;
                Ok(serde_json::to_value(translation)?)
            }
            CommandAction::Ask => {
                let payload: AskPayload = parse_payload(payload)?;
                let doc = self.document(&payload.id)?;
                let request = AskRequest {
                    pmc_id: doc.id().to_string(),
                    question: payload.question,
                    is_translated: payload.translated,
                };
                let answer = self.services()?.ask(request).await?;
                Ok(serde_json::to_value(answer)?)
            }
        }
    }

    fn document(&self, id: &str) -> Result<&Document> {
        self.corpus
            .document(id)
            .ok_or_else(|| anyhow!("{DOCUMENT_NOT_FOUND}: {id}"))
    }

    fn services(&self) -> Result<HttpServices> {
        HttpServices::new(&self.config.service_url, self.config.timeout())
    }
}

fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).context(INVALID_PAYLOAD)
}

fn counts_view(counts: Vec<&TagCount>) -> Vec<TagCountView> {
    counts
        .into_iter()
        .map(|entry| TagCountView {
            tag: entry.tag.clone(),
            count: entry.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn handler() -> CommandHandler {
        let corpus = Corpus::from_documents(vec![
            Document::new("D1", "First", ["X", "Y"])
                .with_detail("summary", json!("About X and Y")),
            Document::new("D2", "Second", ["X"]),
            Document::new("D3", "Third", ["Y", "Z"]),
        ]);
        CommandHandler::new(corpus, ExplorerConfig::default())
    }

    fn request(action: CommandAction, payload: Value) -> CommandRequest {
        CommandRequest { action, payload }
    }

    #[tokio::test]
    async fn explore_returns_matching_facets_and_chain() {
        let response = handler()
            .execute(request(CommandAction::Explore, json!({"path": ["X"]})))
            .await;
        assert!(!response.is_error());
        assert_eq!(response.data["available_facets"], json!(["Y"]));
        assert_eq!(response.data["matching"][1]["id"], "D2");
        assert_eq!(response.data["chain"]["kind"], "facet");
        assert_eq!(response.meta.action, Some("explore"));
        assert_eq!(
            response.meta.schema_version,
            tagtrail_protocol::PROTOCOL_SCHEMA_VERSION
        );
    }

    #[tokio::test]
    async fn chain_with_empty_path_is_placeholder() {
        let response = handler()
            .execute(request(CommandAction::Chain, json!({})))
            .await;
        assert_eq!(
            response.data,
            json!({"kind": "empty", "name": tagtrail_navigator::EMPTY_CHAIN_LABEL})
        );
    }

    #[tokio::test]
    async fn search_honours_limit() {
        let handler = handler();
        let response = handler
            .execute(request(CommandAction::Search, json!({"query": "x"})))
            .await;
        assert_eq!(response.data["tags"], json!([{"tag": "X", "count": 2}]));

        let response = handler
            .execute(request(
                CommandAction::Search,
                json!({"query": "", "limit": 3}),
            ))
            .await;
        assert_eq!(response.data["tags"], json!([]));
    }

    #[tokio::test]
    async fn stats_and_suggest_use_config_defaults() {
        let handler = handler();
        let response = handler
            .execute(request(CommandAction::Stats, json!({"top": 1})))
            .await;
        assert_eq!(response.data["documents"], 3);
        assert_eq!(response.data["top_tags"], json!([{"tag": "X", "count": 2}]));

        let response = handler
            .execute(request(CommandAction::Suggest, json!({})))
            .await;
        assert_eq!(response.data["tags"].as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn unknown_document_and_bad_payload_are_classified() {
        let handler = handler();
        let response = handler
            .execute(request(CommandAction::Show, json!({"id": "D9"})))
            .await;
        assert!(response.is_error());
        assert_eq!(response.error.map(|e| e.code).as_deref(), Some("not_found"));

        let response = handler
            .execute(request(CommandAction::Search, json!({"limit": 2})))
            .await;
        assert_eq!(
            response.error.map(|e| e.code).as_deref(),
            Some("invalid_request")
        );
    }

    #[tokio::test]
    async fn show_returns_payload_fields() {
        let response = handler()
            .execute(request(CommandAction::Show, json!({"id": "D1"})))
            .await;
        assert_eq!(response.data["summary"], "About X and Y");
        assert_eq!(response.data["tags"], json!(["X", "Y"]));
    }
}
