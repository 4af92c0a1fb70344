//! Progressive disclosure of hidden reply threads.
//!
//! Reply threads hide behind per-comment disclosure buttons. Clicking
//! them all at once trips the host page's anti-automation heuristics and
//! floods its renderer, so clicks run in small sequential batches with
//! human-ish pacing: a jittered delay inside a batch, a longer pause
//! between batches, and a final settle wait for asynchronously-rendered
//! replies to materialize.
//!
//! Concurrency contract: overlapping invocations must not interleave
//! batches. Enforcement is a generation counter: every call bumps it,
//! and a run that notices a newer generation abandons its remaining
//! clicks. The newest caller always does the full pass.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rand::Rng;
use tracing::{debug, trace, warn};

use crate::config::DigestConfig;
use crate::surface::CommentSurface;

/// Debounced reply-thread expander. One instance per page generation;
/// cheap to share by reference.
#[derive(Debug, Default)]
pub struct ReplyExpander {
    generation: AtomicU64,
}

impl ReplyExpander {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn superseded(&self, my_generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != my_generation
    }

    /// Expand currently-visible reply threads.
    ///
    /// Never fails: every internal error (a vanished button, a browser
    /// hiccup) is logged and swallowed, and the pass simply does less.
    pub async fn expand<S: CommentSurface>(&self, surface: &S, config: &DigestConfig) {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = config.reply_control();

        let total = match surface.actionable_controls(query).await {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "could not enumerate reply controls");
                return;
            }
        };
        if total == 0 {
            trace!("no actionable reply controls");
            return;
        }
        debug!(total, "expanding reply threads");

        let mut clicked = 0usize;
        let batch_size = config.expand_batch_size.max(1);
        let mut index = 0usize;

        while index < total {
            let batch_end = (index + batch_size).min(total);
            while index < batch_end {
                if self.superseded(my_generation) {
                    debug!("reply expansion superseded by a newer invocation");
                    return;
                }
                match surface.trigger_control(query, index).await {
                    Ok(true) => clicked += 1,
                    // The DOM mutates underneath us; a control that
                    // disappeared since counting is not an error.
                    Ok(false) => trace!(index, "reply control vanished before click"),
                    Err(e) => warn!(index, error = %e, "reply control click failed"),
                }
                index += 1;
                tokio::time::sleep(jittered(config.inter_click_delay, config.click_jitter)).await;
            }
            if index < total {
                tokio::time::sleep(config.batch_pause).await;
            }
        }

        if self.superseded(my_generation) {
            debug!("reply expansion superseded during settle");
            return;
        }
        tokio::time::sleep(config.expand_settle).await;
        debug!(clicked, "reply expansion settled");
    }
}

fn jittered(base: Duration, jitter: Duration) -> Duration {
    let jitter_ms = jitter.as_millis() as u64;
    if jitter_ms == 0 {
        return base;
    }
    base + Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
}
