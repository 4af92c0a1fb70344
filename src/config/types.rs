//! Core configuration types for comment collection.
//!
//! The upstream extension hardcoded these thresholds inline, with several
//! mutually-inconsistent revisions in flight at once. Here every numeric
//! threshold and every selector is a named field with a documented
//! default. Nothing in the engine reads a magic number.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::locator::strategies;
use crate::surface::ControlQuery;
use crate::utils::constants::*;

/// Tuning for the whole collection engine.
///
/// Construct with [`DigestConfig::default`] and adjust via the fluent
/// methods in this module's `methods` sibling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Candidate comments-root container selectors, tried in order.
    pub(crate) container_selectors: Vec<String>,

    /// Comment lookup strategies in priority order. Each entry is scoped
    /// under the resolved container; the first that yields anything wins
    /// exclusively (precision over recall).
    pub(crate) comment_selectors: Vec<String>,

    /// Disclosure controls that reveal hidden reply threads.
    pub(crate) reply_control: ControlQuery,

    /// "Load more" pagination controls at the end of the comment list.
    pub(crate) pagination_control: ControlQuery,

    pub(crate) min_comment_chars: usize,
    pub(crate) max_comment_chars: usize,
    pub(crate) sanitize_max_chars: usize,
    pub(crate) locate_max_comments: usize,
    pub(crate) quick_max_comments: usize,
    pub(crate) deep_max_comments: usize,

    pub(crate) container_cache_ttl: Duration,

    pub(crate) expand_batch_size: usize,
    pub(crate) inter_click_delay: Duration,
    pub(crate) click_jitter: Duration,
    pub(crate) batch_pause: Duration,
    pub(crate) expand_settle: Duration,

    pub(crate) max_load_passes: usize,
    pub(crate) scroll_step_px: f64,
    pub(crate) load_settle: Duration,

    pub(crate) nav_throttle: Duration,
    pub(crate) nav_poll_interval: Duration,
    pub(crate) reinit_delay: Duration,
    pub(crate) reinit_poll: Duration,
    pub(crate) reinit_timeout: Duration,
    pub(crate) max_reinit_attempts: u32,

    pub(crate) quick_summary_timeout: Duration,
    pub(crate) deep_summary_timeout: Duration,
    pub(crate) settings_io_timeout: Duration,

    pub(crate) error_message_max_chars: usize,
    pub(crate) cleanup_registry_cap: usize,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            container_selectors: strategies::default_container_selectors(),
            comment_selectors: strategies::default_comment_selectors(),
            reply_control: strategies::default_reply_control(),
            pagination_control: strategies::default_pagination_control(),
            min_comment_chars: MIN_COMMENT_CHARS,
            max_comment_chars: MAX_COMMENT_CHARS,
            sanitize_max_chars: SANITIZE_MAX_CHARS,
            locate_max_comments: LOCATE_MAX_COMMENTS,
            quick_max_comments: QUICK_MAX_COMMENTS,
            deep_max_comments: DEEP_MAX_COMMENTS,
            container_cache_ttl: CONTAINER_CACHE_TTL,
            expand_batch_size: EXPAND_BATCH_SIZE,
            inter_click_delay: INTER_CLICK_DELAY,
            click_jitter: CLICK_JITTER,
            batch_pause: BATCH_PAUSE,
            expand_settle: EXPAND_SETTLE,
            max_load_passes: MAX_LOAD_PASSES,
            scroll_step_px: SCROLL_STEP_PX,
            load_settle: LOAD_SETTLE,
            nav_throttle: NAV_THROTTLE,
            nav_poll_interval: NAV_POLL_INTERVAL,
            reinit_delay: REINIT_DELAY,
            reinit_poll: REINIT_POLL,
            reinit_timeout: REINIT_TIMEOUT,
            max_reinit_attempts: MAX_REINIT_ATTEMPTS,
            quick_summary_timeout: QUICK_SUMMARY_TIMEOUT,
            deep_summary_timeout: DEEP_SUMMARY_TIMEOUT,
            settings_io_timeout: SETTINGS_IO_TIMEOUT,
            error_message_max_chars: ERROR_MESSAGE_MAX_CHARS,
            cleanup_registry_cap: CLEANUP_REGISTRY_CAP,
        }
    }
}

impl DigestConfig {
    #[must_use]
    pub fn container_selectors(&self) -> &[String] {
        &self.container_selectors
    }

    #[must_use]
    pub fn comment_selectors(&self) -> &[String] {
        &self.comment_selectors
    }

    #[must_use]
    pub fn reply_control(&self) -> &ControlQuery {
        &self.reply_control
    }

    #[must_use]
    pub fn pagination_control(&self) -> &ControlQuery {
        &self.pagination_control
    }

    #[must_use]
    pub fn quick_summary_timeout(&self) -> Duration {
        self.quick_summary_timeout
    }

    #[must_use]
    pub fn deep_summary_timeout(&self) -> Duration {
        self.deep_summary_timeout
    }

    #[must_use]
    pub fn settings_io_timeout(&self) -> Duration {
        self.settings_io_timeout
    }

    #[must_use]
    pub fn quick_max_comments(&self) -> usize {
        self.quick_max_comments
    }

    #[must_use]
    pub fn deep_max_comments(&self) -> usize {
        self.deep_max_comments
    }

    #[must_use]
    pub fn nav_poll_interval(&self) -> Duration {
        self.nav_poll_interval
    }

    #[must_use]
    pub fn cleanup_registry_cap(&self) -> usize {
        self.cleanup_registry_cap
    }
}
