//! Fluent override methods for [`DigestConfig`].
//!
//! Defaults come from `utils::constants`; each method replaces exactly
//! one threshold or selector set.

use std::time::Duration;

use super::types::DigestConfig;
use crate::surface::ControlQuery;

impl DigestConfig {
    #[must_use]
    pub fn with_container_selectors(mut self, selectors: Vec<String>) -> Self {
        self.container_selectors = selectors;
        self
    }

    #[must_use]
    pub fn with_comment_selectors(mut self, selectors: Vec<String>) -> Self {
        self.comment_selectors = selectors;
        self
    }

    #[must_use]
    pub fn with_reply_control(mut self, query: ControlQuery) -> Self {
        self.reply_control = query;
        self
    }

    #[must_use]
    pub fn with_pagination_control(mut self, query: ControlQuery) -> Self {
        self.pagination_control = query;
        self
    }

    /// Comment length window accepted during coordinator validation.
    #[must_use]
    pub fn with_comment_length(mut self, min_chars: usize, max_chars: usize) -> Self {
        self.min_comment_chars = min_chars;
        self.max_comment_chars = max_chars;
        self
    }

    #[must_use]
    pub fn with_quick_max_comments(mut self, max: usize) -> Self {
        self.quick_max_comments = max;
        self
    }

    #[must_use]
    pub fn with_deep_max_comments(mut self, max: usize) -> Self {
        self.deep_max_comments = max;
        self
    }

    #[must_use]
    pub fn with_locate_max_comments(mut self, max: usize) -> Self {
        self.locate_max_comments = max;
        self
    }

    #[must_use]
    pub fn with_container_cache_ttl(mut self, ttl: Duration) -> Self {
        self.container_cache_ttl = ttl;
        self
    }

    /// Pacing for reply expansion: batch size, delay between clicks in a
    /// batch, pause between batches, and the final settle wait.
    #[must_use]
    pub fn with_expand_pacing(
        mut self,
        batch_size: usize,
        inter_click: Duration,
        batch_pause: Duration,
        settle: Duration,
    ) -> Self {
        self.expand_batch_size = batch_size.max(1);
        self.inter_click_delay = inter_click;
        self.batch_pause = batch_pause;
        self.expand_settle = settle;
        self
    }

    #[must_use]
    pub fn with_max_load_passes(mut self, passes: usize) -> Self {
        self.max_load_passes = passes;
        self
    }

    #[must_use]
    pub fn with_load_settle(mut self, settle: Duration) -> Self {
        self.load_settle = settle;
        self
    }

    #[must_use]
    pub fn with_nav_throttle(mut self, throttle: Duration) -> Self {
        self.nav_throttle = throttle;
        self
    }

    /// Re-initialization behavior after a navigation: delay before the
    /// first probe, polling interval, overall deadline, and the cap on
    /// consecutive failed attempts.
    #[must_use]
    pub fn with_reinit(
        mut self,
        delay: Duration,
        poll: Duration,
        timeout: Duration,
        max_attempts: u32,
    ) -> Self {
        self.reinit_delay = delay;
        self.reinit_poll = poll;
        self.reinit_timeout = timeout;
        self.max_reinit_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_summary_timeouts(mut self, quick: Duration, deep: Duration) -> Self {
        self.quick_summary_timeout = quick;
        self.deep_summary_timeout = deep;
        self
    }
}
