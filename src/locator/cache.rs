//! Time-boxed cache of the resolved comments-root container.
//!
//! This is a lookup cache, never an ownership relation: the cached value
//! is the *selector* that last matched, and the node it matches is owned
//! by the host page. Entries expire after a TTL and are explicitly
//! invalidated on navigation teardown, because a route change replaces
//! the entire comments subtree.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CachedContainer {
    selector: String,
    cached_at: Instant,
}

/// Shared, single-tab cache of the comments container resolution.
#[derive(Debug, Default)]
pub struct ContainerCache {
    inner: Mutex<Option<CachedContainer>>,
}

impl ContainerCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached container selector, unless the entry is older than
    /// `ttl` (stale entries are dropped on read).
    #[must_use]
    pub fn get(&self, ttl: Duration) -> Option<String> {
        let mut slot = self.inner.lock();
        match slot.as_ref() {
            Some(entry) if entry.cached_at.elapsed() <= ttl => Some(entry.selector.clone()),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    pub fn put(&self, selector: impl Into<String>) {
        *self.inner.lock() = Some(CachedContainer {
            selector: selector.into(),
            cached_at: Instant::now(),
        });
    }

    /// Explicit invalidation, used by navigation teardown.
    pub fn invalidate(&self) {
        *self.inner.lock() = None;
    }
}
