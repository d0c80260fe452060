use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tagtrail_protocol::{
    Answer, AskReply, AskRequest, QuestionAnswering, TranslateReply, TranslateRequest,
    Translation, TranslationService,
};

/// JSON-over-HTTP client for the translation and question-answering service.
#[derive(Debug, Clone)]
pub struct HttpServices {
    client: reqwest::Client,
    base_url: String,
}

impl HttpServices {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R> {
        let url = format!("{}/{endpoint}", self.base_url);
        log::debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Service request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("Service returned an error status: {url}"))?;
        response
            .json::<R>()
            .await
            .with_context(|| format!("Invalid service reply from {url}"))
    }
}

#[async_trait]
impl TranslationService for HttpServices {
    async fn translate(&self, request: TranslateRequest) -> Result<Translation> {
        request.validate()?;
        let reply: TranslateReply = self.post("translate", &request).await?;
        reply.into_result()
    }
}

#[async_trait]
impl QuestionAnswering for HttpServices {
    async fn ask(&self, request: AskRequest) -> Result<Answer> {
        request.validate()?;
        let reply: AskReply = self.post("ask", &request).await?;
        reply.into_result()
    }
}
