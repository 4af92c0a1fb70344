//! Default lookup strategies for YouTube's comment DOM.
//!
//! Selectors against the host page are inherently version-fragile, so
//! they live here as data (an ordered list from most specific to most
//! desperate) and flow into `DigestConfig` where callers can replace
//! them wholesale. Nothing else in the crate names a YouTube element.

use crate::surface::ControlQuery;

/// Candidate comments-root containers, most common layout first.
const CONTAINER_SELECTORS: &[&str] = &[
    "ytd-comments#comments",
    "#comments",
    "ytd-item-section-renderer#sections",
];

/// Comment-text strategies in priority order. Scoped under the resolved
/// container at query time; the first strategy that matches any node at
/// all is used exclusively.
const COMMENT_SELECTORS: &[&str] = &[
    "ytd-comment-thread-renderer #content-text",
    "ytd-comment-renderer #content-text",
    "#content-text",
    "yt-attributed-string",
];

/// Reply-thread disclosure buttons. Accessible-name keywords cover the
/// locales the upstream extension shipped for.
const REPLY_CONTROL_SELECTOR: &str = "#replies button, ytd-comment-replies-renderer button";
const REPLY_KEYWORDS: &[&str] = &["repl", "répon", "antwort", "respuesta", "返信", "답글"];

/// End-of-list pagination ("load more") buttons.
const PAGINATION_CONTROL_SELECTOR: &str =
    "ytd-continuation-item-renderer button, #continuations button";
const PAGINATION_KEYWORDS: &[&str] = &["more", "mehr", "plus", "más", "もっと", "더보기"];

pub fn default_container_selectors() -> Vec<String> {
    CONTAINER_SELECTORS.iter().map(ToString::to_string).collect()
}

pub fn default_comment_selectors() -> Vec<String> {
    COMMENT_SELECTORS.iter().map(ToString::to_string).collect()
}

pub fn default_reply_control() -> ControlQuery {
    ControlQuery::new(
        REPLY_CONTROL_SELECTOR,
        REPLY_KEYWORDS.iter().map(ToString::to_string).collect(),
    )
}

pub fn default_pagination_control() -> ControlQuery {
    ControlQuery::new(
        PAGINATION_CONTROL_SELECTOR,
        PAGINATION_KEYWORDS.iter().map(ToString::to_string).collect(),
    )
}

/// Scope a comment selector under a container selector, distributing the
/// container over comma-separated selector lists.
#[must_use]
pub fn scoped_selector(container: &str, selector: &str) -> String {
    selector
        .split(',')
        .map(|part| format!("{container} {}", part.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
