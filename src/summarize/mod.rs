//! Summarization capability.
//!
//! The engine treats summarization as an opaque async call that either
//! returns text or fails; everything provider-specific lives in the three
//! client modules. Deadlines are imposed by the coordinator, not here.

pub mod claude;
pub mod gemini;
pub mod openai;

pub use claude::ClaudeSummarizer;
pub use gemini::GeminiSummarizer;
pub use openai::OpenAiSummarizer;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::DigestError;

/// The capability the coordinator consumes.
pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send;
}

/// Which provider the user configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Claude,
    OpenAi,
    Gemini,
}

/// Runtime-selected provider. Enum dispatch keeps the coordinator
/// monomorphic over one summarizer type.
pub enum Provider {
    Claude(ClaudeSummarizer),
    OpenAi(OpenAiSummarizer),
    Gemini(GeminiSummarizer),
}

impl Provider {
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Claude(_) => ProviderKind::Claude,
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }
}

impl Summarizer for Provider {
    fn summarize(
        &self,
        comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send {
        async move {
            match self {
                Self::Claude(client) => client.summarize(comments).await,
                Self::OpenAi(client) => client.summarize(comments).await,
                Self::Gemini(client) => client.summarize(comments).await,
            }
        }
    }
}

/// Shared prompt shape for all providers.
pub(crate) fn build_prompt(comments: &[String]) -> String {
    let mut prompt = String::from(
        "Summarize the following YouTube comments. Cover the main themes, \
         points of agreement and disagreement, and the overall sentiment. \
         Keep it short.\n\nComments:\n",
    );
    for (i, comment) in comments.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, comment));
    }
    prompt
}

/// Pull a text pointer out of a provider response, or map its error
/// payload to [`DigestError::External`]. Providers sometimes return an
/// error body with a 2xx status, so the error shape is checked first.
pub(crate) fn extract_text(
    payload: &serde_json::Value,
    status_ok: bool,
    text_pointer: &str,
    provider: &str,
) -> Result<String, DigestError> {
    if let Some(message) = payload
        .pointer("/error/message")
        .and_then(serde_json::Value::as_str)
    {
        return Err(DigestError::External(message.to_string()));
    }
    if !status_ok {
        return Err(DigestError::External(format!(
            "{provider} request failed with an unrecognized error body"
        )));
    }
    payload
        .pointer(text_pointer)
        .and_then(serde_json::Value::as_str)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| DigestError::External(format!("{provider} response had no text content")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_numbers_every_comment() {
        let prompt = build_prompt(&["first one".to_string(), "second one".to_string()]);
        assert!(prompt.contains("1. first one"));
        assert!(prompt.contains("2. second one"));
    }

    #[test]
    fn extract_text_prefers_error_payload_even_on_2xx() {
        let payload = serde_json::json!({"error": {"message": "quota exhausted"}});
        let err = extract_text(&payload, true, "/text", "test").unwrap_err();
        assert!(matches!(err, DigestError::External(m) if m == "quota exhausted"));
    }

    #[test]
    fn extract_text_reads_pointer() {
        let payload = serde_json::json!({"content": [{"text": "  a summary  "}]});
        let text = extract_text(&payload, true, "/content/0/text", "test").unwrap();
        assert_eq!(text, "a summary");
    }
}
