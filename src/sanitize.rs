//! Comment text sanitization.
//!
//! Raw text scraped out of a live DOM arrives with embedded control
//! characters (virtualized renderers leave NULs and form feeds behind),
//! decorative whitespace, and occasionally pathological length. Everything
//! downstream (deduplication, validation, the provider prompt) assumes
//! text that has passed through [`sanitize`].

use crate::utils::string_utils::safe_truncate_chars;

/// Whether a character is in the stripped ASCII control set:
/// 0x00–0x08, 0x0B, 0x0C, 0x0E–0x1F, 0x7F.
///
/// Tab (0x09) and newline (0x0A) survive; carriage return (0x0D) also
/// survives so CRLF comment bodies keep their line structure.
#[inline]
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

/// Normalize one scraped comment: strip control characters, trim
/// surrounding whitespace, and hard-cap the length at `max_chars`
/// characters (not word-aware).
///
/// Pure, never panics, and idempotent: `sanitize(sanitize(x, n), n)`
/// equals `sanitize(x, n)` for every input.
#[must_use]
pub fn sanitize(raw: &str, max_chars: usize) -> String {
    let stripped: String = raw.chars().filter(|c| !is_stripped_control(*c)).collect();
    // Trim again after the cap: truncation can expose trailing whitespace,
    // which would break idempotence.
    safe_truncate_chars(stripped.trim(), max_chars)
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MAX: usize = 2000;

    #[test]
    fn strips_control_characters() {
        assert_eq!(sanitize("a\u{0}b\u{7f}c\u{1f}d", MAX), "abcd");
        assert_eq!(sanitize("\u{0b}\u{0c}only\u{0e}", MAX), "only");
    }

    #[test]
    fn keeps_tabs_and_newlines() {
        assert_eq!(sanitize("line one\nline\ttwo", MAX), "line one\nline\ttwo");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize("  padded comment \n", MAX), "padded comment");
    }

    #[test]
    fn empty_input_maps_to_empty_output() {
        assert_eq!(sanitize("", MAX), "");
        assert_eq!(sanitize("   \n\t  ", MAX), "");
    }

    #[test]
    fn caps_at_exactly_max_chars() {
        let over: String = "x".repeat(MAX + 1);
        assert_eq!(sanitize(&over, MAX).chars().count(), MAX);

        let exact: String = "y".repeat(MAX);
        assert_eq!(sanitize(&exact, MAX), exact);
    }

    #[test]
    fn cap_counts_characters_not_bytes() {
        let s = "é".repeat(10);
        assert_eq!(sanitize(&s, 4), "éééé");
    }

    proptest! {
        #[test]
        fn output_never_exceeds_cap(raw in ".*", cap in 0usize..256) {
            prop_assert!(sanitize(&raw, cap).chars().count() <= cap);
        }

        #[test]
        fn output_has_no_stripped_controls(raw in ".*") {
            let out = sanitize(&raw, MAX);
            prop_assert!(!out.chars().any(is_stripped_control));
        }

        #[test]
        fn output_is_trimmed(raw in ".*") {
            let out = sanitize(&raw, MAX);
            prop_assert_eq!(out.trim(), out.as_str());
        }

        #[test]
        fn idempotent(raw in ".*", cap in 0usize..256) {
            let once = sanitize(&raw, cap);
            prop_assert_eq!(sanitize(&once, cap), once.clone());
        }
    }
}
