//! Shared configuration constants for tubedigest
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.
//!
//! The upstream extension this tool replaces shipped several revisions of
//! these thresholds; the values here are the adopted defaults and every one
//! of them is overridable through `DigestConfig`.

use std::time::Duration;

/// Minimum accepted comment length in characters
///
/// Shorter fragments are almost always UI chrome ("Reply", timestamps)
/// rather than actual comment text.
pub const MIN_COMMENT_CHARS: usize = 5;

/// Maximum accepted comment length for summarization, in characters
///
/// Longer comments are dropped during coordinator validation rather than
/// truncated, since a wall of text usually adds little to a summary.
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Hard cap applied by the sanitizer, in characters
pub const SANITIZE_MAX_CHARS: usize = 2000;

/// Upper bound on comments a single locate pass will return
pub const LOCATE_MAX_COMMENTS: usize = 200;

/// Comment cap for quick (no-loading) collection
pub const QUICK_MAX_COMMENTS: usize = 100;

/// Comment cap for deep (scroll + paginate) collection
pub const DEEP_MAX_COMMENTS: usize = 150;

/// How long a resolved comments-root container may be reused before
/// the locator probes the page again
pub const CONTAINER_CACHE_TTL: Duration = Duration::from_secs(5);

/// Disclosure controls clicked per batch during reply expansion
pub const EXPAND_BATCH_SIZE: usize = 3;

/// Base delay between two clicks inside a batch
pub const INTER_CLICK_DELAY: Duration = Duration::from_millis(100);

/// Random jitter added on top of `INTER_CLICK_DELAY`
///
/// Uniform clicking cadence is a bot signal on the host page.
pub const CLICK_JITTER: Duration = Duration::from_millis(40);

/// Pause between click batches
pub const BATCH_PAUSE: Duration = Duration::from_millis(200);

/// Final wait after all batches so asynchronously-rendered replies
/// have a chance to materialize
pub const EXPAND_SETTLE: Duration = Duration::from_secs(1);

/// Maximum scroll/paginate iterations for deep collection
pub const MAX_LOAD_PASSES: usize = 4;

/// Pixels scrolled past the bottom edge of the comments region per pass
pub const SCROLL_STEP_PX: f64 = 1200.0;

/// Settle delay after each scroll or pagination trigger
pub const LOAD_SETTLE: Duration = Duration::from_millis(800);

/// Window in which repeated navigation signals collapse into one cycle
pub const NAV_THROTTLE: Duration = Duration::from_millis(100);

/// Interval at which the in-page navigation hook counter is polled
pub const NAV_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Delay between teardown and the scheduled re-initialization
pub const REINIT_DELAY: Duration = Duration::from_secs(1);

/// Polling interval while waiting for the comments container to reappear
pub const REINIT_POLL: Duration = Duration::from_millis(500);

/// Upper bound on a single re-initialization's container wait
pub const REINIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Consecutive failed re-initializations before the monitor gives up
/// on a permanently-broken page state
pub const MAX_REINIT_ATTEMPTS: u32 = 5;

/// Summarization deadline for quick collection
pub const QUICK_SUMMARY_TIMEOUT: Duration = Duration::from_secs(60);

/// Summarization deadline for deep collection
pub const DEEP_SUMMARY_TIMEOUT: Duration = Duration::from_secs(90);

/// Deadline for settings file reads and writes
pub const SETTINGS_IO_TIMEOUT: Duration = Duration::from_secs(3);

/// Character cap applied to upstream error messages before rendering
pub const ERROR_MESSAGE_MAX_CHARS: usize = 300;

/// Maximum teardown callbacks held by the cleanup registry; the oldest
/// entry is evicted once the bound is reached
pub const CLEANUP_REGISTRY_CAP: usize = 32;

/// Chrome user agent string presented by the driven browser
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
/// Next update: 2025-04-29 (quarterly schedule)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
