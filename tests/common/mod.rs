//! Shared test doubles: a scriptable page surface, a recording panel,
//! and canned summarizers.

#![allow(dead_code)]

use std::future::Future;

use parking_lot::Mutex;

use tubedigest::error::{DigestError, SurfaceError};
use tubedigest::panel::StatusPanel;
use tubedigest::summarize::Summarizer;
use tubedigest::surface::{CommentSurface, ControlQuery};

/// Mutable script for a [`FixtureSurface`].
#[derive(Debug, Default)]
pub struct FixtureState {
    pub url: String,
    pub container_present: bool,
    /// Comment texts returned by every comment lookup.
    pub comments: Vec<String>,
    /// When > 0, every text lookup appends this many fresh synthetic
    /// comments first: a DOM that never stops growing.
    pub grow_per_locate: usize,
    pub synthetic_counter: usize,
    pub scroll: f64,
    /// Every `scroll_to` target, in order.
    pub scroll_history: Vec<f64>,
    pub reply_controls: usize,
    pub pagination_controls: usize,
    /// Indexes passed to `trigger_control`, in order.
    pub clicks: Vec<usize>,
    /// Selector substrings whose text lookup fails with an eval error.
    pub fail_texts_for: Vec<String>,
    /// Make `region_bottom` fail, a mid-iteration structural error.
    pub fail_region_bottom: bool,
    pub texts_calls: usize,
}

/// Scriptable [`CommentSurface`] for integration tests.
#[derive(Debug, Default)]
pub struct FixtureSurface {
    pub state: Mutex<FixtureState>,
}

impl FixtureSurface {
    pub fn with(configure: impl FnOnce(&mut FixtureState)) -> Self {
        let surface = Self::default();
        configure(&mut surface.state.lock());
        surface
    }

    fn grow(state: &mut FixtureState) {
        for _ in 0..state.grow_per_locate {
            state.synthetic_counter += 1;
            state
                .comments
                .push(format!("synthetic comment number {}", state.synthetic_counter));
        }
    }
}

impl CommentSurface for FixtureSurface {
    fn texts(
        &self,
        selector: &str,
    ) -> impl Future<Output = Result<Vec<String>, SurfaceError>> + Send {
        let result = {
            let mut state = self.state.lock();
            if state
                .fail_texts_for
                .iter()
                .any(|needle| selector.contains(needle.as_str()))
            {
                Err(SurfaceError::Eval(format!("scripted failure for {selector}")))
            } else if !state.container_present {
                Ok(Vec::new())
            } else {
                state.texts_calls += 1;
                Self::grow(&mut state);
                Ok(state.comments.clone())
            }
        };
        async move { result }
    }

    fn count(&self, _selector: &str) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        let count = usize::from(self.state.lock().container_present);
        async move { Ok(count) }
    }

    fn exists(&self, _selector: &str) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        let present = self.state.lock().container_present;
        async move { Ok(present) }
    }

    fn actionable_controls(
        &self,
        query: &ControlQuery,
    ) -> impl Future<Output = Result<usize, SurfaceError>> + Send {
        let state = self.state.lock();
        let count = if query.selector.contains("replies") {
            state.reply_controls
        } else {
            state.pagination_controls
        };
        async move { Ok(count) }
    }

    fn trigger_control(
        &self,
        _query: &ControlQuery,
        index: usize,
    ) -> impl Future<Output = Result<bool, SurfaceError>> + Send {
        self.state.lock().clicks.push(index);
        async move { Ok(true) }
    }

    fn scroll_offset(&self) -> impl Future<Output = Result<f64, SurfaceError>> + Send {
        let offset = self.state.lock().scroll;
        async move { Ok(offset) }
    }

    fn scroll_to(&self, offset: f64) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        let mut state = self.state.lock();
        state.scroll = offset;
        state.scroll_history.push(offset);
        async move { Ok(()) }
    }

    fn region_bottom(
        &self,
        _selector: &str,
    ) -> impl Future<Output = Result<Option<f64>, SurfaceError>> + Send {
        let result = {
            let state = self.state.lock();
            if state.fail_region_bottom {
                Err(SurfaceError::Eval("scripted region failure".to_string()))
            } else if state.container_present {
                Ok(Some(1000.0))
            } else {
                Ok(None)
            }
        };
        async move { result }
    }

    fn current_url(&self) -> impl Future<Output = String> + Send {
        let url = self.state.lock().url.clone();
        async move {
            if url.is_empty() {
                "about:blank".to_string()
            } else {
                url
            }
        }
    }

    fn eval(&self, _script: &str) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        async move { Ok(()) }
    }
}

/// Everything the engine rendered, in order.
#[derive(Debug, Default)]
pub struct PanelLog {
    pub mounts: usize,
    pub busy: Vec<bool>,
    pub loading: Vec<usize>,
    pub summaries: Vec<String>,
    pub errors: Vec<String>,
    pub clears: usize,
}

/// Recording [`StatusPanel`].
#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub log: Mutex<PanelLog>,
}

impl StatusPanel for RecordingPanel {
    fn mount(&self) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        self.log.lock().mounts += 1;
        async move { Ok(()) }
    }

    fn set_busy(&self, busy: bool) -> impl Future<Output = ()> + Send {
        self.log.lock().busy.push(busy);
        async move {}
    }

    fn show_loading(&self, comment_count: usize) -> impl Future<Output = ()> + Send {
        self.log.lock().loading.push(comment_count);
        async move {}
    }

    fn show_summary(&self, text: &str) -> impl Future<Output = ()> + Send {
        self.log.lock().summaries.push(text.to_string());
        async move {}
    }

    fn show_error(&self, text: &str) -> impl Future<Output = ()> + Send {
        self.log.lock().errors.push(text.to_string());
        async move {}
    }

    fn clear_transient(&self) -> impl Future<Output = ()> + Send {
        self.log.lock().clears += 1;
        async move {}
    }
}

/// Always succeeds with a fixed summary.
pub struct StaticSummarizer(pub &'static str);

impl Summarizer for StaticSummarizer {
    fn summarize(
        &self,
        _comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send {
        let summary = self.0.to_string();
        async move { Ok(summary) }
    }
}

/// Never resolves; exercises the coordinator deadline.
pub struct NeverSummarizer;

impl Summarizer for NeverSummarizer {
    fn summarize(
        &self,
        _comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send {
        async move { std::future::pending().await }
    }
}

/// Fails with an upstream error payload.
pub struct ErrorSummarizer(pub &'static str);

impl Summarizer for ErrorSummarizer {
    fn summarize(
        &self,
        _comments: &[String],
    ) -> impl Future<Output = Result<String, DigestError>> + Send {
        let message = self.0.to_string();
        async move { Err(DigestError::External(message)) }
    }
}
