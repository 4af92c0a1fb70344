//! Claude (Anthropic Messages API) summarization client.

use std::future::Future;

use reqwest::Client;
use tracing::debug;

use super::{Summarizer, build_prompt, extract_text};
use crate::error::DigestError;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

pub struct ClaudeSummarizer {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeSummarizer {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Summarizer for ClaudeSummarizer {
    fn summarize(
        &self,
        comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send {
        async move {
            let body = serde_json::json!({
                "model": self.model,
                "max_tokens": MAX_TOKENS,
                "messages": [{"role": "user", "content": build_prompt(comments)}],
            });

            debug!(model = %self.model, comments = comments.len(), "claude summarize request");
            let response = self
                .http
                .post(format!("{}/v1/messages", self.base_url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| DigestError::External(format!("claude request failed: {e}")))?;

            let status_ok = response.status().is_success();
            let payload: serde_json::Value = response
                .json()
                .await
                .map_err(|e| DigestError::External(format!("claude response unreadable: {e}")))?;

            extract_text(&payload, status_ok, "/content/0/text", "claude")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments() -> Vec<String> {
        vec!["great video".to_string(), "terrible audio".to_string()]
    }

    #[tokio::test]
    async fn parses_message_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/messages")
            .match_header("x-api-key", "test-key")
            .match_header("anthropic-version", ANTHROPIC_VERSION)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content": [{"type": "text", "text": "mixed reception"}]}"#)
            .create_async()
            .await;

        let client = ClaudeSummarizer::new("test-key", None).with_base_url(server.url());
        let summary = client.summarize(&comments()).await.expect("summary");
        assert_eq!(summary, "mixed reception");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn relays_api_error_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/messages")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"type": "authentication_error", "message": "invalid x-api-key"}}"#)
            .create_async()
            .await;

        let client = ClaudeSummarizer::new("bad-key", None).with_base_url(server.url());
        let err = client.summarize(&comments()).await.unwrap_err();
        assert!(matches!(err, DigestError::External(m) if m == "invalid x-api-key"));
    }
}
