//! Static-HTML implementation of [`CommentSurface`].
//!
//! Backs `--snapshot` mode (summarize a saved watch page without a
//! browser) and doubles as the in-tree test surface. Read operations
//! query a parsed document; interactions are accepted no-ops, so quick
//! collection works normally and deep collection converges on its first
//! pass (the DOM never grows).
//!
//! The raw HTML is re-parsed per operation instead of holding a parsed
//! tree: `scraper::Html` is not `Send`, and snapshot queries are
//! one-shot CLI work where parse cost is irrelevant.

use std::future::Future;

use parking_lot::Mutex;
use scraper::{Html, Selector};
use tracing::trace;

use super::{CommentSurface, ControlQuery};
use crate::error::SurfaceError;

/// [`CommentSurface`] over an HTML snapshot.
pub struct SnapshotSurface {
    html: String,
    url: String,
    scroll: Mutex<f64>,
}

impl SnapshotSurface {
    #[must_use]
    pub fn new(html: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            url: url.into(),
            scroll: Mutex::new(0.0),
        }
    }

    fn parse_selector(selector: &str) -> Result<Selector, SurfaceError> {
        Selector::parse(selector).map_err(|_| SurfaceError::Selector(selector.to_string()))
    }

    fn with_document<T>(&self, f: impl FnOnce(&Html) -> T) -> T {
        let document = Html::parse_document(&self.html);
        f(&document)
    }

    fn accessible_name(element: &scraper::ElementRef<'_>) -> String {
        let label = element.value().attr("aria-label").unwrap_or_default();
        let text: String = element.text().collect();
        format!("{label} {text}")
    }

    fn is_actionable(element: &scraper::ElementRef<'_>, query: &ControlQuery) -> bool {
        if element.value().attr("disabled").is_some()
            || element.value().attr("aria-disabled") == Some("true")
        {
            return false;
        }
        query.matches_name(&Self::accessible_name(element))
    }

    fn actionable_count(&self, query: &ControlQuery) -> Result<usize, SurfaceError> {
        let selector = Self::parse_selector(&query.selector)?;
        Ok(self.with_document(|doc| {
            doc.select(&selector)
                .filter(|el| Self::is_actionable(el, query))
                .count()
        }))
    }
}

impl CommentSurface for SnapshotSurface {
    fn texts(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Vec<String>, SurfaceError>> + Send {
        async move {
            let selector = Self::parse_selector(selector)?;
            Ok(self.with_document(|doc| {
                doc.select(&selector)
                    .map(|el| el.text().collect::<String>())
                    .collect()
            }))
        }
    }

    fn count(&self, selector: &str) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        async move {
            let selector = Self::parse_selector(selector)?;
            Ok(self.with_document(|doc| doc.select(&selector).count()))
        }
    }

    fn exists(&self, selector: &str) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        async move {
            let selector = Self::parse_selector(selector)?;
            Ok(self.with_document(|doc| doc.select(&selector).next().is_some()))
        }
    }

    fn actionable_controls(
        &self,
        query: &ControlQuery,
    ) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        async move { self.actionable_count(query) }
    }

    /// Accepted no-op: reports success for controls that exist, but the
    /// snapshot never changes in response.
    fn trigger_control(
        &self,
        query: &ControlQuery,
        index: usize,
    ) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        async move {
            let present = index < self.actionable_count(query)?;
            trace!(index, present, "snapshot click ignored");
            Ok(present)
        }
    }

    fn scroll_offset(&self) -> impl Future<Output = Result<f64, SurfaceError>> + Send {
        async move { Ok(*self.scroll.lock()) }
    }

    fn scroll_to(&self, offset: f64) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        async move {
            *self.scroll.lock() = offset;
            Ok(())
        }
    }

    /// A static document has no layout, so the bottom edge is reported as
    /// the current scroll position whenever the region exists; the deep
    /// loader only needs a finite number to aim past.
    fn region_bottom(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Option<f64>, SurfaceError>> + Send {
        async move {
            let selector = Self::parse_selector(selector)?;
            let present = self.with_document(|doc| doc.select(&selector).next().is_some());
            Ok(present.then(|| *self.scroll.lock()))
        }
    }

    fn current_url(&self) -> impl Future<Output = String> + Send {
        async move {
            if self.url.is_empty() {
                "about:blank".to_string()
            } else {
                self.url.clone()
            }
        }
    }

    fn eval(&self, _script: &str) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        async move { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div id="comments">
            <div class="comment">First comment body</div>
            <div class="comment">Second comment body</div>
          </div>
          <button aria-label="Show 3 replies">expand</button>
          <button aria-label="Show 2 replies" disabled>expand</button>
          <button aria-label="Share">share</button>
        </body></html>
    "#;

    fn surface() -> SnapshotSurface {
        SnapshotSurface::new(PAGE, "https://www.youtube.com/watch?v=abc")
    }

    #[tokio::test]
    async fn texts_returns_matches_in_order() {
        let texts = surface().texts(".comment").await.unwrap();
        assert_eq!(texts, vec!["First comment body", "Second comment body"]);
    }

    #[tokio::test]
    async fn missing_selector_matches_nothing() {
        let s = surface();
        assert!(!s.exists("#absent").await.unwrap());
        assert_eq!(s.count("#absent").await.unwrap(), 0);
        assert!(s.region_bottom("#absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_selector_is_a_selector_error() {
        let err = surface().texts(":::nope").await.unwrap_err();
        assert!(matches!(err, SurfaceError::Selector(_)));
    }

    #[tokio::test]
    async fn keyword_filter_excludes_disabled_and_unrelated_controls() {
        let s = surface();
        let query = ControlQuery::new("button", vec!["replies".to_string()]);
        assert_eq!(s.actionable_controls(&query).await.unwrap(), 1);
        assert!(s.trigger_control(&query, 0).await.unwrap());
        assert!(!s.trigger_control(&query, 1).await.unwrap());
    }

    #[tokio::test]
    async fn scroll_state_round_trips() {
        let s = surface();
        s.scroll_to(420.0).await.unwrap();
        assert_eq!(s.scroll_offset().await.unwrap(), 420.0);
    }
}
