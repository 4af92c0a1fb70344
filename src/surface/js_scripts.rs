//! JavaScript evaluation scripts for the CDP surface.
//!
//! Every surface operation is one page-side IIFE returning a
//! JSON-serializable value. Selectors and keyword lists are embedded as
//! JSON string literals so arbitrary selector text cannot break out of
//! the script.

/// Quote a Rust string as a JS string literal.
fn js_str(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Quote a keyword list as a lowercase JS array literal.
fn js_keywords(keywords: &[String]) -> String {
    let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    serde_json::to_string(&lowered).unwrap_or_else(|_| "[]".to_string())
}

/// Texts of all nodes matching a selector, document order.
pub fn texts_script(selector: &str) -> String {
    format!(
        r#"
        (() => {{
            const nodes = document.querySelectorAll({sel});
            return Array.from(nodes).map(n => n.innerText || n.textContent || "");
        }})()
        "#,
        sel = js_str(selector)
    )
}

/// Number of nodes matching a selector.
pub fn count_script(selector: &str) -> String {
    format!(
        "(() => document.querySelectorAll({sel}).length)()",
        sel = js_str(selector)
    )
}

/// Whether the selector matches anything at all.
pub fn exists_script(selector: &str) -> String {
    format!(
        "(() => document.querySelector({sel}) !== null)()",
        sel = js_str(selector)
    )
}

/// Shared prelude computing the array of actionable controls for a
/// selector + keyword query: attached, visible, not disabled, and with an
/// accessible name containing one of the keywords (any name if the list
/// is empty).
fn actionable_prelude(selector: &str, keywords: &[String]) -> String {
    format!(
        r#"
            const kws = {kws};
            const named = (el) => {{
                if (kws.length === 0) return true;
                const name = ((el.getAttribute('aria-label') || '') + ' ' +
                              (el.textContent || '')).toLowerCase();
                return kws.some(k => name.includes(k));
            }};
            const actionable = Array.from(document.querySelectorAll({sel})).filter(el => {{
                if (el.disabled || el.getAttribute('aria-disabled') === 'true') return false;
                const r = el.getBoundingClientRect();
                if (r.width === 0 && r.height === 0) return false;
                return named(el);
            }});
        "#,
        sel = js_str(selector),
        kws = js_keywords(keywords),
    )
}

/// Count of actionable controls for a query.
pub fn actionable_controls_script(selector: &str, keywords: &[String]) -> String {
    format!(
        "(() => {{ {prelude} return actionable.length; }})()",
        prelude = actionable_prelude(selector, keywords)
    )
}

/// Click the index-th actionable control; false when it is gone.
pub fn trigger_control_script(selector: &str, keywords: &[String], index: usize) -> String {
    format!(
        r#"
        (() => {{
            {prelude}
            const el = actionable[{index}];
            if (!el) return false;
            el.click();
            return true;
        }})()
        "#,
        prelude = actionable_prelude(selector, keywords),
    )
}

/// Current vertical scroll offset.
pub const SCROLL_OFFSET_SCRIPT: &str = "(() => window.pageYOffset || window.scrollY || 0)()";

/// Scroll to an absolute offset. Returns true so the result is a value,
/// not undefined.
pub fn scroll_to_script(offset: f64) -> String {
    format!("(() => {{ window.scrollTo(0, {offset}); return true; }})()")
}

/// Document-coordinate bottom edge of the first matching region.
pub fn region_bottom_script(selector: &str) -> String {
    format!(
        r#"
        (() => {{
            const el = document.querySelector({sel});
            if (!el) return null;
            const r = el.getBoundingClientRect();
            return r.bottom + (window.pageYOffset || window.scrollY || 0);
        }})()
        "#,
        sel = js_str(selector)
    )
}
