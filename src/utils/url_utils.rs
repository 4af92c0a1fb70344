//! Watch-page URL helpers
//!
//! YouTube addresses the same logical video through several URL shapes
//! (`/watch?v=`, `youtu.be/`, `/shorts/`). Navigation detection compares
//! video identity, not raw URLs, so query-parameter churn (playlist index,
//! timestamps) does not count as a page change.

use url::Url;

/// Whether a URL plausibly points at a page with a comment section
pub fn is_watch_url(raw: &str) -> bool {
    video_id(raw).is_some()
}

/// Extract the video identifier from a YouTube URL, if any.
///
/// Accepts `youtube.com/watch?v=ID`, `youtu.be/ID` and
/// `youtube.com/shorts/ID`. Returns None for anything else, including
/// non-http schemes.
#[must_use]
pub fn video_id(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let parsed = Url::parse(raw).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?.trim_start_matches("www.").to_lowercase();

    match host.as_str() {
        "youtube.com" | "m.youtube.com" => {
            if parsed.path() == "/watch" {
                return parsed
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned());
            }
            if let Some(rest) = parsed.path().strip_prefix("/shorts/") {
                let id = rest.split('/').next().unwrap_or_default();
                return (!id.is_empty()).then(|| id.to_string());
            }
            None
        }
        "youtu.be" => {
            let id = parsed.path().trim_start_matches('/');
            (!id.is_empty()).then(|| id.to_string())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_watch_urls() {
        assert_eq!(
            video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id("https://youtube.com/watch?list=PL123&v=abc123DEF45").as_deref(),
            Some("abc123DEF45")
        );
    }

    #[test]
    fn extracts_id_from_short_forms() {
        assert_eq!(
            video_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id("https://www.youtube.com/shorts/xyz987").as_deref(),
            Some("xyz987")
        );
    }

    #[test]
    fn rejects_non_watch_urls() {
        assert!(video_id("https://www.youtube.com/feed/subscriptions").is_none());
        assert!(video_id("https://example.com/watch?v=abc").is_none());
        assert!(video_id("javascript:alert(1)").is_none());
        assert!(video_id("").is_none());
    }

    #[test]
    fn is_watch_url_follows_video_id() {
        assert!(is_watch_url("https://youtu.be/abc"));
        assert!(!is_watch_url("https://www.youtube.com/"));
    }
}
