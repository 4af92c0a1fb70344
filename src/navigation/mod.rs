//! Route-change detection and teardown/rebuild.
//!
//! The monitor consumes navigation signals from any number of producers
//! (see `hooks`), throttles bursts into a single check, and on a real URL
//! change tears down everything the old page generation owned before
//! re-initializing against the new one.
//!
//! State machine: Idle -> (signal) -> Throttled, where repeated signals
//! inside the window reset the timer. On fire, compare the recorded URL
//! with the live one. Unchanged: back to Idle. Changed: Teardown, then a
//! scheduled re-Initialize, then Idle.

pub mod hooks;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::cleanup::CleanupRegistry;
use crate::config::DigestConfig;
use crate::locator::{self, ContainerCache};
use crate::panel::StatusPanel;
use crate::surface::CommentSurface;
use crate::utils::url_utils::video_id;

/// One detection event. All variants are treated identically; they exist
/// so logs show which mechanism fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSignal {
    /// Full-frame navigation reported by the browser.
    FrameNavigated,
    /// Same-document history mutation (push/replace navigation).
    HistoryMutation,
    /// The injected page hook fired: wrapped history call, back/forward,
    /// or a subtree mutation in the comments region.
    PageHook,
}

/// Create the signal channel shared by producers and the monitor.
#[must_use]
pub fn signal_channel() -> (mpsc::Sender<NavSignal>, mpsc::Receiver<NavSignal>) {
    mpsc::channel(64)
}

/// Whether two URLs address the same logical page.
///
/// Watch URLs compare by video identity so query-parameter churn
/// (playlist index, timestamps) does not count as navigation.
fn same_page(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (video_id(a), video_id(b)) {
        (Some(va), Some(vb)) => va == vb,
        _ => false,
    }
}

/// Watches for route changes and drives teardown/reinitialization.
pub struct NavigationMonitor<S, P> {
    surface: Arc<S>,
    panel: Arc<P>,
    cleanup: Arc<CleanupRegistry>,
    cache: Arc<ContainerCache>,
    config: DigestConfig,
    signals: mpsc::Receiver<NavSignal>,
    current_url: String,
    reinit_failures: u32,
    initialized: bool,
}

impl<S: CommentSurface, P: StatusPanel> NavigationMonitor<S, P> {
    pub fn new(
        surface: Arc<S>,
        panel: Arc<P>,
        cleanup: Arc<CleanupRegistry>,
        cache: Arc<ContainerCache>,
        config: DigestConfig,
        signals: mpsc::Receiver<NavSignal>,
        initial_url: impl Into<String>,
    ) -> Self {
        Self {
            surface,
            panel,
            cleanup,
            cache,
            config,
            signals,
            current_url: initial_url.into(),
            reinit_failures: 0,
            initialized: true,
        }
    }

    /// Run until every signal producer is gone. A pending throttle window
    /// is settled before shutdown so trailing signals are not lost.
    pub async fn run(mut self) {
        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                signal = self.signals.recv() => {
                    match signal {
                        Some(signal) => {
                            trace!(?signal, "navigation signal");
                            // Each signal resets the window; a burst
                            // collapses into one check.
                            deadline = Some(Instant::now() + self.config.nav_throttle);
                        }
                        None => {
                            if deadline.take().is_some() {
                                self.check_navigation().await;
                            }
                            break;
                        }
                    }
                }
                () = sleep_until_opt(deadline), if deadline.is_some() => {
                    deadline = None;
                    self.check_navigation().await;
                }
            }
        }

        debug!(
            initialized = self.initialized,
            "navigation monitor stopped"
        );
    }

    async fn check_navigation(&mut self) {
        let url = self.surface.current_url().await;
        if same_page(&self.current_url, &url) {
            trace!(url = %url, "url unchanged, no teardown");
            return;
        }

        info!(from = %self.current_url, to = %url, "route change detected");
        self.current_url = url;
        self.teardown().await;
        self.reinitialize().await;
    }

    /// Undo everything the previous page generation owned. Safe to run
    /// when nothing is mounted; every step tolerates absence.
    async fn teardown(&mut self) {
        self.cleanup.run_all();
        self.panel.clear_transient().await;
        self.cache.invalidate();
        self.initialized = false;
        debug!("teardown complete");
    }

    async fn reinitialize(&mut self) {
        if self.reinit_failures >= self.config.max_reinit_attempts {
            warn!(
                failures = self.reinit_failures,
                "skipping reinitialization: page state appears permanently broken"
            );
            return;
        }

        tokio::time::sleep(self.config.reinit_delay).await;

        // Wait for the new page's comments container. Navigation races
        // rendering, so absence here is usually just "not yet".
        let wait_deadline = Instant::now() + self.config.reinit_timeout;
        loop {
            if locator::resolve_container(self.surface.as_ref(), &self.cache, &self.config)
                .await
                .is_some()
            {
                break;
            }
            if Instant::now() >= wait_deadline {
                self.reinit_failures += 1;
                warn!(
                    failures = self.reinit_failures,
                    "comments container did not reappear after navigation"
                );
                return;
            }
            tokio::time::sleep(self.config.reinit_poll).await;
        }

        match self.panel.mount().await {
            Ok(()) => {
                self.initialized = true;
                self.reinit_failures = 0;
                info!("reinitialized after navigation");
            }
            Err(e) => {
                self.reinit_failures += 1;
                warn!(error = %e, "panel re-mount failed");
            }
        }
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        // Guarded out by `if deadline.is_some()`; never completes.
        None => std::future::pending().await,
    }
}
