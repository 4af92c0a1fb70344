//! DOM comment location.
//!
//! Produces the deduplicated, ordered sequence of comment texts currently
//! present on the page without triggering any loading or expansion. The
//! selector chain is tried in priority order and the first strategy that
//! matches any node is used exclusively; merging strategies would trade
//! precision for recall and start picking up non-comment UI text.

pub mod cache;
pub mod strategies;

pub use cache::ContainerCache;

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::DigestConfig;
use crate::sanitize::sanitize;
use crate::surface::CommentSurface;

/// Resolve the comments-root container selector, consulting the cache
/// first. Returns None when no candidate container exists in the DOM.
///
/// Probe failures (a selector the surface rejects, a transient browser
/// error) count as "this candidate is absent", never as a locate failure.
pub async fn resolve_container<S: CommentSurface>(
    surface: &S,
    cache: &ContainerCache,
    config: &DigestConfig,
) -> Option<String> {
    if let Some(selector) = cache.get(config.container_cache_ttl) {
        trace!(selector, "comments container from cache");
        return Some(selector);
    }

    for candidate in &config.container_selectors {
        match surface.exists(candidate).await {
            Ok(true) => {
                cache.put(candidate.clone());
                debug!(selector = %candidate, "comments container resolved");
                return Some(candidate.clone());
            }
            Ok(false) => {}
            Err(e) => {
                debug!(selector = %candidate, error = %e, "container probe failed");
            }
        }
    }

    None
}

/// Collect the comment texts currently in the DOM: resolved container,
/// first matching strategy, sanitized, length-gated, exactly-deduplicated,
/// capped at `locate_max_comments`.
///
/// A missing container yields an empty vector, not an error. Callers
/// decide whether "zero comments" is a failure.
pub async fn locate<S: CommentSurface>(
    surface: &S,
    cache: &ContainerCache,
    config: &DigestConfig,
) -> Vec<String> {
    let Some(container) = resolve_container(surface, cache, config).await else {
        debug!("no comments container present");
        return Vec::new();
    };

    for strategy in &config.comment_selectors {
        let scoped = strategies::scoped_selector(&container, strategy);
        let raw = match surface.texts(&scoped).await {
            Ok(texts) => texts,
            Err(e) => {
                // A failing strategy is "zero results for that strategy",
                // never a propagated error.
                debug!(selector = %scoped, error = %e, "lookup strategy failed");
                continue;
            }
        };

        if raw.is_empty() {
            continue;
        }

        // This strategy matched nodes, so it is used exclusively, even
        // if filtering rejects every candidate.
        let accepted = accept_candidates(raw, config);
        debug!(
            strategy = %strategy,
            accepted = accepted.len(),
            "locate pass complete"
        );
        return accepted;
    }

    Vec::new()
}

fn accept_candidates(raw: Vec<String>, config: &DigestConfig) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut accepted = Vec::new();

    for candidate in raw {
        let clean = sanitize(&candidate, config.sanitize_max_chars);
        if clean.chars().count() < config.min_comment_chars {
            continue;
        }
        if !seen.insert(clean.clone()) {
            continue;
        }
        accepted.push(clean);
        if accepted.len() >= config.locate_max_comments {
            break;
        }
    }

    accepted
}
