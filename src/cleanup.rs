//! Teardown callback registry.
//!
//! Navigation teardown has to undo whatever the current page generation
//! accumulated: injected panel nodes, page-side hooks, pending timers.
//! Each of those registers an idempotent callback here; a route change
//! drains the registry in registration order.
//!
//! The registry is bounded: once the cap is reached the oldest callback
//! is evicted (dropped, not run) so a leaky caller cannot grow memory
//! without bound. Callbacks must therefore remain safe to skip as well
//! as safe to run twice.

use std::collections::VecDeque;

use log::{debug, warn};
use parking_lot::Mutex;

type CleanupFn = Box<dyn FnOnce() + Send>;

/// Ordered, bounded set of idempotent teardown callbacks.
pub struct CleanupRegistry {
    slots: Mutex<VecDeque<CleanupFn>>,
    cap: usize,
}

impl CleanupRegistry {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            slots: Mutex::new(VecDeque::new()),
            cap: cap.max(1),
        }
    }

    /// Register a teardown callback. Evicts the oldest entry when full.
    pub fn register(&self, callback: impl FnOnce() + Send + 'static) {
        let mut slots = self.slots.lock();
        if slots.len() >= self.cap {
            warn!("cleanup registry full ({}), evicting oldest entry", self.cap);
            slots.pop_front();
        }
        slots.push_back(Box::new(callback));
    }

    /// Drain and run every registered callback, oldest first.
    ///
    /// Always safe to call: an empty registry is a no-op, and callbacks
    /// are expected to tolerate their target already being gone.
    pub fn run_all(&self) {
        // Take the whole queue under the lock, run outside it; a
        // callback may re-register.
        let drained: Vec<CleanupFn> = {
            let mut slots = self.slots.lock();
            slots.drain(..).collect()
        };
        if !drained.is_empty() {
            debug!("running {} cleanup callbacks", drained.len());
        }
        for callback in drained {
            callback();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn runs_callbacks_in_registration_order() {
        let registry = CleanupRegistry::new(8);
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = Arc::clone(&order);
            registry.register(move || order.lock().push(i));
        }
        registry.run_all();
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        assert!(registry.is_empty());
    }

    #[test]
    fn run_all_on_empty_registry_is_safe() {
        let registry = CleanupRegistry::new(4);
        registry.run_all();
        registry.run_all();
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let registry = CleanupRegistry::new(2);
        let hits = Arc::new(AtomicUsize::new(0));

        let first = Arc::clone(&hits);
        registry.register(move || {
            first.fetch_add(100, Ordering::SeqCst);
        });
        for _ in 0..2 {
            let hit = Arc::clone(&hits);
            registry.register(move || {
                hit.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(registry.len(), 2);
        registry.run_all();
        // The first callback was evicted without running.
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn callbacks_may_reregister_during_run() {
        let registry = Arc::new(CleanupRegistry::new(4));
        let inner = Arc::clone(&registry);
        registry.register(move || {
            inner.register(|| {});
        });
        registry.run_all();
        assert_eq!(registry.len(), 1);
    }
}
