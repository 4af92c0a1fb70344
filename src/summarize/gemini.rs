//! Gemini (Generative Language API) summarization client.

use std::future::Future;

use reqwest::Client;
use tracing::debug;

use super::{Summarizer, build_prompt, extract_text};
use crate::error::DigestError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiSummarizer {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiSummarizer {
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

impl Summarizer for GeminiSummarizer {
    fn summarize(
        &self,
        comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send {
        async move {
            let body = serde_json::json!({
                "contents": [{"parts": [{"text": build_prompt(comments)}]}],
            });

            let url = format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.base_url, self.model, self.api_key
            );

            debug!(model = %self.model, comments = comments.len(), "gemini summarize request");
            let response = self
                .http
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(|e| DigestError::External(format!("gemini request failed: {e}")))?;

            let status_ok = response.status().is_success();
            let payload: serde_json::Value = response
                .json()
                .await
                .map_err(|e| DigestError::External(format!("gemini response unreadable: {e}")))?;

            extract_text(
                &payload,
                status_ok,
                "/candidates/0/content/parts/0/text",
                "gemini",
            )
        }
    }
}
