//! The live-page abstraction the collection engine runs against.
//!
//! Every engine component (locator, expander, loader, monitor,
//! coordinator) is generic over [`CommentSurface`] and never touches the
//! browser driver directly. Production uses [`CdpSurface`] over a
//! chromiumoxide page; `--snapshot` mode and unit tests use
//! [`SnapshotSurface`] over a parsed HTML string; integration tests script
//! their own fixture implementation.

pub mod cdp;
mod js_scripts;
pub mod snapshot;

pub use cdp::CdpSurface;
pub use snapshot::SnapshotSurface;

use std::future::Future;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

/// A lookup for clickable page controls: a CSS selector narrowed by
/// accessible-name keywords.
///
/// The keyword list is matched case-insensitively against the control's
/// aria-label and text content; an empty list accepts every selector
/// match. Keywords are localized data, not law; they ship as defaults in
/// `DigestConfig` and are overridable like every other selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlQuery {
    pub selector: String,
    pub name_keywords: Vec<String>,
    #[serde(skip)]
    compiled: OnceCell<Regex>,
}

impl ControlQuery {
    pub fn new(selector: impl Into<String>, name_keywords: Vec<String>) -> Self {
        Self {
            selector: selector.into(),
            name_keywords,
            compiled: OnceCell::new(),
        }
    }

    /// Whether an accessible name matches this query's keyword list.
    ///
    /// Used by surface implementations that filter in Rust; the CDP
    /// surface applies the same semantics in page-side script.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        if self.name_keywords.is_empty() {
            return true;
        }
        self.keyword_regex().is_match(name)
    }

    fn keyword_regex(&self) -> &Regex {
        self.compiled.get_or_init(|| {
            let alternation = self
                .name_keywords
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            // Keywords are escaped literals, so this can only fail on an
            // empty list, which matches_name short-circuits.
            Regex::new(&format!("(?i){alternation}"))
                .unwrap_or_else(|_| Regex::new("$^").expect("fallback regex"))
        })
    }
}

/// Capability contract between the engine and the host page.
///
/// All operations are single round-trips; none of them triggers loading
/// or expansion on its own. Implementations must be cheap to call
/// repeatedly; the engine polls.
pub trait CommentSurface: Send + Sync {
    /// Text content of every node matching `selector`, in document order.
    fn texts(&self, selector: &str)
    -> impl Future<Output = Result<Vec<String>, SurfaceError>> + Send;

    /// Number of nodes matching `selector`.
    fn count(&self, selector: &str) -> impl Future<Output = Result<usize, SurfaceError>> + Send;

    /// Whether at least one node matches `selector`.
    fn exists(&self, selector: &str) -> impl Future<Output = Result<bool, SurfaceError>> + Send;

    /// Number of controls matching `query` that are currently visible and
    /// not disabled.
    fn actionable_controls(
        &self,
        query: &ControlQuery,
    ) -> impl Future<Output = Result<usize, SurfaceError>> + Send;

    /// Click the `index`-th actionable control matching `query`. Returns
    /// `false` when the control has disappeared or stopped being
    /// actionable since it was counted; the DOM mutates underneath us.
    fn trigger_control(
        &self,
        query: &ControlQuery,
        index: usize,
    ) -> impl Future<Output = Result<bool, SurfaceError>> + Send;

    /// Current vertical scroll offset of the viewport.
    fn scroll_offset(&self) -> impl Future<Output = Result<f64, SurfaceError>> + Send;

    /// Scroll the viewport to an absolute vertical offset.
    fn scroll_to(&self, offset: f64) -> impl Future<Output = Result<(), SurfaceError>> + Send;

    /// Document-coordinate bottom edge of the first region matching
    /// `selector`, or None when the region is absent.
    fn region_bottom(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Option<f64>, SurfaceError>> + Send;

    /// Current page URL. Never fails; implementations fall back to
    /// `"about:blank"` when the page has no URL or cannot be reached.
    fn current_url(&self) -> impl Future<Output = String> + Send;

    /// Run a page-side script for its side effects (panel rendering,
    /// hook installation).
    fn eval(&self, script: &str) -> impl Future<Output = Result<(), SurfaceError>> + Send;
}

/// Shared handles are surfaces too, so collaborators can hold
/// `Arc<impl CommentSurface>` without caring.
impl<S: CommentSurface> CommentSurface for std::sync::Arc<S> {
    fn texts(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Vec<String>, SurfaceError>> + Send {
        S::texts(self, selector)
    }

    fn count(&self, selector: &str) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        S::count(self, selector)
    }

    fn exists(&self, selector: &str) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        S::exists(self, selector)
    }

    fn actionable_controls(
        &self,
        query: &ControlQuery,
    ) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        S::actionable_controls(self, query)
    }

    fn trigger_control(
        &self,
        query: &ControlQuery,
        index: usize,
    ) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        S::trigger_control(self, query, index)
    }

    fn scroll_offset(&self) -> impl Future<Output = Result<f64, SurfaceError>> + Send {
        S::scroll_offset(self)
    }

    fn scroll_to(&self, offset: f64) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        S::scroll_to(self, offset)
    }

    fn region_bottom(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Option<f64>, SurfaceError>> + Send {
        S::region_bottom(self, selector)
    }

    fn current_url(&self) -> impl Future<Output = String> + Send {
        S::current_url(self)
    }

    fn eval(&self, script: &str) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        S::eval(self, script)
    }
}
