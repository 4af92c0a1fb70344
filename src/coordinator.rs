//! The user-facing pipeline: collect, validate, summarize, render.
//!
//! This is the only component with user-visible side effects. Both entry
//! points run the same linear pipeline and differ only in the collection
//! strategy and deadline. The busy flag is the sole re-entrancy guard:
//! within one tab there is no parallelism, only interleaved async
//! callbacks, so a compare-exchange on entry is sufficient.
//!
//! The busy state is scoped acquire/release: whatever happens inside the
//! fallible stretch (including errors at any step), the entry points are
//! re-enabled before the outcome is returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::config::DigestConfig;
use crate::error::{DigestError, DigestResult};
use crate::expander::ReplyExpander;
use crate::loader;
use crate::locator::{self, ContainerCache};
use crate::panel::StatusPanel;
use crate::session::{CollectMode, CollectionSession, RunReport};
use crate::summarize::Summarizer;
use crate::surface::CommentSurface;
use crate::utils::string_utils::safe_truncate_chars;

/// Orchestrates collection and summarization for one page.
pub struct Coordinator<S, P, M> {
    surface: Arc<S>,
    panel: Arc<P>,
    summarizer: M,
    cache: Arc<ContainerCache>,
    expander: ReplyExpander,
    config: DigestConfig,
    busy: AtomicBool,
}

impl<S, P, M> Coordinator<S, P, M>
where
    S: CommentSurface,
    P: StatusPanel,
    M: Summarizer,
{
    pub fn new(
        surface: Arc<S>,
        panel: Arc<P>,
        summarizer: M,
        cache: Arc<ContainerCache>,
        config: DigestConfig,
    ) -> Self {
        Self {
            surface,
            panel,
            summarizer,
            cache,
            expander: ReplyExpander::new(),
            config,
            busy: AtomicBool::new(false),
        }
    }

    /// Summarize the comments currently rendered on the page.
    pub async fn summarize_quick(&self) -> DigestResult<RunReport> {
        self.run(CollectMode::Quick).await
    }

    /// Provoke more comments to load, then summarize.
    pub async fn summarize_deep(&self) -> DigestResult<RunReport> {
        self.run(CollectMode::Deep).await
    }

    async fn run(&self, mode: CollectMode) -> DigestResult<RunReport> {
        // Re-entrancy guard. Must fail before any panel mutation: a
        // rejected second click may not touch the first run's busy UI.
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("collection already in flight, ignoring trigger");
            return Err(DigestError::Busy);
        }

        self.panel.set_busy(true).await;

        let outcome = self.drive(mode).await;

        match &outcome {
            Ok(report) => self.panel.show_summary(&report.summary).await,
            Err(err) => {
                let message = err.to_string();
                self.panel
                    .show_error(safe_truncate_chars(
                        &message,
                        self.config.error_message_max_chars,
                    ))
                    .await;
            }
        }

        // Release on every exit path, success and failure alike.
        self.panel.set_busy(false).await;
        self.busy.store(false, Ordering::SeqCst);

        outcome
    }

    async fn drive(&self, mode: CollectMode) -> DigestResult<RunReport> {
        let max_comments = match mode {
            CollectMode::Quick => self.config.quick_max_comments(),
            CollectMode::Deep => self.config.deep_max_comments(),
        };
        let session = CollectionSession::begin(mode, max_comments);
        info!(session = %session.id, %mode, "collection session started");

        let collected = match mode {
            CollectMode::Quick => {
                locator::locate(self.surface.as_ref(), &self.cache, &self.config).await
            }
            CollectMode::Deep => {
                loader::load_deep(
                    self.surface.as_ref(),
                    &self.cache,
                    &self.expander,
                    &self.config,
                )
                .await?
            }
        };

        if collected.is_empty() {
            return Err(DigestError::NoComments);
        }

        let valid = self.validate(collected, max_comments)?;
        self.panel.show_loading(valid.len()).await;

        let deadline = match mode {
            CollectMode::Quick => self.config.quick_summary_timeout(),
            CollectMode::Deep => self.config.deep_summary_timeout(),
        };

        // Race the request against the deadline; a late result is simply
        // dropped with the losing future.
        let summary = tokio::time::timeout(deadline, self.summarizer.summarize(&valid))
            .await
            .map_err(|_| DigestError::Timeout(deadline))??;

        info!(
            session = %session.id,
            comments = valid.len(),
            "summary received"
        );

        Ok(RunReport {
            session_id: session.id,
            video_url: self.surface.current_url().await,
            mode,
            started_at: session.started_at,
            comment_count: valid.len(),
            summary,
        })
    }

    /// Length-gate the collected comments and cap the list at the mode
    /// maximum. Out-of-range entries are filtered, not fatal, unless
    /// nothing survives.
    fn validate(&self, comments: Vec<String>, max_comments: usize) -> DigestResult<Vec<String>> {
        let before = comments.len();
        let mut valid: Vec<String> = comments
            .into_iter()
            .filter(|comment| {
                let chars = comment.chars().count();
                chars >= self.config.min_comment_chars && chars <= self.config.max_comment_chars
            })
            .collect();

        if valid.is_empty() {
            return Err(DigestError::Validation(format!(
                "all {before} collected comments failed length validation"
            )));
        }

        let dropped = before - valid.len();
        if dropped > 0 {
            info!(dropped, "comments outside length bounds were filtered");
        }

        valid.truncate(max_comments);
        Ok(valid)
    }
}
