//! Error taxonomy for comment collection and summarization.
//!
//! The taxonomy mirrors how failures are presented to the user: a missing
//! comment section, an elapsed deadline, data that failed validation, and
//! an upstream provider failure are all rendered differently, so they are
//! distinct variants rather than strings.

use std::time::Duration;
use thiserror::Error;

/// Terminal failures surfaced by the coordinator and the deep loader.
///
/// Lower layers (locator, expander) swallow their own non-fatal errors;
/// anything that reaches this type is rendered to the user.
#[derive(Debug, Error)]
pub enum DigestError {
    /// No comments could be found on the page. Often transient while the
    /// host page is still loading; the caller decides whether to retry.
    #[error("no comments found")]
    NoComments,

    /// An expected structural element is absent.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// An operation exceeded its allotted time. Kept distinct from other
    /// failures so retry guidance stays clear.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Collected data failed shape or length constraints and filtering
    /// left nothing usable.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The summarization provider returned an error payload or rejected
    /// the request. The message is relayed largely verbatim (length-capped
    /// at render time).
    #[error("{0}")]
    External(String),

    /// A collection run is already in flight.
    #[error("a summarization is already running")]
    Busy,

    /// The driven page stopped responding to surface operations.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Anything else, caught at the coordinator boundary and rendered as
    /// a generic error.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Failures of the page-surface abstraction (browser communication,
/// bad selectors, script evaluation).
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("browser communication failed: {0}")]
    Browser(String),

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("script evaluation failed: {0}")]
    Eval(String),
}

impl SurfaceError {
    /// Wrap a chromiumoxide/CDP error. Accepts anything displayable so the
    /// surface layer does not leak driver error types upward.
    pub fn browser(err: impl std::fmt::Display) -> Self {
        Self::Browser(err.to_string())
    }
}

/// Convenience alias used throughout the engine modules.
pub type DigestResult<T> = Result<T, DigestError>;
