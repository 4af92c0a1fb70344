//! Collection session types.
//!
//! A session is the bounded unit of work behind one entry-point trigger:
//! created when the user asks for a summary, destroyed when the result or
//! error is rendered. Never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How comments are gathered for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectMode {
    /// Only currently-rendered comments; no scrolling or pagination.
    Quick,
    /// Actively provoke more content to load before collecting.
    Deep,
}

impl std::fmt::Display for CollectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quick => write!(f, "quick"),
            Self::Deep => write!(f, "deep"),
        }
    }
}

/// One in-flight collection run. Internal to the coordinator; the id is
/// for log correlation only.
#[derive(Debug, Clone)]
pub struct CollectionSession {
    pub id: Uuid,
    pub mode: CollectMode,
    pub started_at: DateTime<Utc>,
    pub max_comments: usize,
}

impl CollectionSession {
    #[must_use]
    pub fn begin(mode: CollectMode, max_comments: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            started_at: Utc::now(),
            max_comments,
        }
    }
}

/// The outcome of a successful run, also emitted as JSON by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub session_id: Uuid,
    pub video_url: String,
    pub mode: CollectMode,
    pub started_at: DateTime<Utc>,
    pub comment_count: usize,
    pub summary: String,
}
