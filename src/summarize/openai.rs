//! OpenAI (Chat Completions API) summarization client.

use std::future::Future;

use reqwest::Client;
use tracing::debug;

use super::{Summarizer, build_prompt, extract_text};
use crate::error::DigestError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiSummarizer {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiSummarizer {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Summarizer for OpenAiSummarizer {
    fn summarize(
        &self,
        comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send {
        async move {
            let body = serde_json::json!({
                "model": self.model,
                "messages": [{"role": "user", "content": build_prompt(comments)}],
            });

            debug!(model = %self.model, comments = comments.len(), "openai summarize request");
            let response = self
                .http
                .post(format!("{}/v1/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| DigestError::External(format!("openai request failed: {e}")))?;

            let status_ok = response.status().is_success();
            let payload: serde_json::Value = response
                .json()
                .await
                .map_err(|e| DigestError::External(format!("openai response unreadable: {e}")))?;

            extract_text(&payload, status_ok, "/choices/0/message/content", "openai")
        }
    }
}
