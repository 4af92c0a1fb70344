//! Chromiumoxide-backed implementation of [`CommentSurface`].
//!
//! Every operation evaluates one page-side script and deserializes the
//! JSON result. The page object stays owned by the caller (browser
//! lifecycle lives in `crate::browser`); this type is a cheap clone of
//! the page handle.

use std::future::Future;

use chromiumoxide::page::Page;
use tracing::trace;

use super::js_scripts;
use super::{CommentSurface, ControlQuery};
use crate::error::SurfaceError;

/// [`CommentSurface`] over a live CDP page.
#[derive(Clone)]
pub struct CdpSurface {
    page: Page,
}

impl CdpSurface {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// The underlying CDP page, for collaborators that need event streams
    /// (navigation hooks) rather than surface operations.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    async fn eval_into<T: serde::de::DeserializeOwned>(
        &self,
        script: &str,
    ) -> Result<T, SurfaceError> {
        let result = self
            .page
            .evaluate(script)
            .await
            .map_err(SurfaceError::browser)?;
        result
            .into_value::<T>()
            .map_err(|e| SurfaceError::Eval(e.to_string()))
    }
}

impl CommentSurface for CdpSurface {
    fn texts(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Vec<String>, SurfaceError>> + Send {
        async move {
            self.eval_into::<Vec<String>>(js_scripts::texts_script(selector).as_str())
                .await
        }
    }

    fn count(&self, selector: &str) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        async move {
            self.eval_into::<usize>(js_scripts::count_script(selector).as_str())
                .await
        }
    }

    fn exists(&self, selector: &str) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        async move {
            self.eval_into::<bool>(js_scripts::exists_script(selector).as_str())
                .await
        }
    }

    fn actionable_controls(
        &self,
        query: &ControlQuery,
    ) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        async move {
            let script =
                js_scripts::actionable_controls_script(&query.selector, &query.name_keywords);
            self.eval_into::<usize>(script.as_str()).await
        }
    }

    fn trigger_control(
        &self,
        query: &ControlQuery,
        index: usize,
    ) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        async move {
            let script =
                js_scripts::trigger_control_script(&query.selector, &query.name_keywords, index);
            self.eval_into::<bool>(script.as_str()).await
        }
    }

    fn scroll_offset(&self) -> impl Future<Output = Result<f64, SurfaceError>> + Send {
        async move {
            self.eval_into::<f64>(js_scripts::SCROLL_OFFSET_SCRIPT)
                .await
        }
    }

    fn scroll_to(&self, offset: f64) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        async move {
            self.eval_into::<bool>(js_scripts::scroll_to_script(offset).as_str())
                .await?;
            Ok(())
        }
    }

    fn region_bottom(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Option<f64>, SurfaceError>> + Send {
        async move {
            self.eval_into::<Option<f64>>(js_scripts::region_bottom_script(selector).as_str())
                .await
        }
    }

    /// Handles two failure modes the same way the rest of the engine
    /// expects: `Ok(None)` (page not yet navigated) and `Err` (browser
    /// communication failure) both fall back to `"about:blank"`.
    fn current_url(&self) -> impl Future<Output = String> + Send {
        async move {
            match self.page.url().await {
                Ok(Some(url)) => url,
                Ok(None) => {
                    trace!("page URL is None (page not yet navigated)");
                    "about:blank".to_string()
                }
                Err(e) => {
                    trace!("failed to get page URL (browser communication error): {e}");
                    "about:blank".to_string()
                }
            }
        }
    }

    fn eval(&self, script: &str) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        async move {
            self.page
                .evaluate(script)
                .await
                .map_err(SurfaceError::browser)?;
            Ok(())
        }
    }
}
