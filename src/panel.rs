//! In-page status panel and collection entry points.
//!
//! The panel is the only user-visible output: two entry buttons
//! ("Summarize" / "Deep summarize"), a status box that cycles through
//! loading, summary, and error states, and a hidden request slot the
//! buttons write into so the driving process can observe clicks.
//!
//! Rendering goes through [`StatusPanel`] so the engine never knows
//! whether it is talking to a real overlay or a test recorder. Display
//! failures are logged and swallowed; a broken overlay must never abort
//! a collection run that already has a result.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::SurfaceError;
use crate::session::CollectMode;
use crate::surface::CommentSurface;

/// Rendering seam between the coordinator/monitor and the page overlay.
pub trait StatusPanel: Send + Sync {
    /// Inject the panel into the page. Idempotent: mounting over an
    /// existing panel is a no-op.
    fn mount(&self) -> impl Future<Output = Result<(), SurfaceError>> + Send;

    /// Enable or disable the entry buttons.
    fn set_busy(&self, busy: bool) -> impl Future<Output = ()> + Send;

    fn show_loading(&self, comment_count: usize) -> impl Future<Output = ()> + Send;

    fn show_summary(&self, text: &str) -> impl Future<Output = ()> + Send;

    fn show_error(&self, text: &str) -> impl Future<Output = ()> + Send;

    /// Remove transient state (loading/summary/error boxes) while leaving
    /// the entry points in place. Used by navigation teardown.
    fn clear_transient(&self) -> impl Future<Output = ()> + Send;
}

const PANEL_ID: &str = "tubedigest-panel";
const STATUS_ID: &str = "tubedigest-status";
const REQUEST_ID: &str = "tubedigest-request";

/// Mount script. The existence check makes re-mounting after an
/// asynchronous wait safe: the DOM may have changed during the wait, and
/// a second panel would otherwise appear.
const MOUNT_SCRIPT: &str = r#"
(() => {
    if (document.getElementById('tubedigest-panel')) return true;
    const panel = document.createElement('div');
    panel.id = 'tubedigest-panel';
    panel.style.cssText =
        'position:fixed;top:72px;right:16px;z-index:99999;width:320px;' +
        'font-family:Roboto,Arial,sans-serif;font-size:13px;' +
        'background:#fff;color:#0f0f0f;border:1px solid #ccc;' +
        'border-radius:8px;padding:10px;box-shadow:0 2px 8px rgba(0,0,0,.2)';
    const mkButton = (label, mode) => {
        const b = document.createElement('button');
        b.textContent = label;
        b.dataset.tubedigest = mode;
        b.style.cssText = 'margin-right:8px;padding:4px 10px;cursor:pointer';
        b.addEventListener('click', () => {
            const slot = document.getElementById('tubedigest-request');
            if (slot) slot.textContent = mode;
        });
        return b;
    };
    panel.appendChild(mkButton('Summarize', 'quick'));
    panel.appendChild(mkButton('Deep summarize', 'deep'));
    const status = document.createElement('div');
    status.id = 'tubedigest-status';
    status.style.cssText = 'margin-top:8px;white-space:pre-wrap';
    panel.appendChild(status);
    const slot = document.createElement('span');
    slot.id = 'tubedigest-request';
    slot.style.display = 'none';
    panel.appendChild(slot);
    document.body.appendChild(panel);
    return true;
})()
"#;

/// [`StatusPanel`] rendered as a fixed overlay via surface scripts.
pub struct OverlayPanel<S> {
    surface: S,
}

impl<S: CommentSurface> OverlayPanel<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    async fn run_script(&self, script: String) {
        if let Err(e) = self.surface.eval(&script).await {
            warn!(error = %e, "panel render failed");
        }
    }

    async fn set_status(&self, text: &str, color: &str) {
        let payload = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
        self.run_script(format!(
            r#"
            (() => {{
                const status = document.getElementById('{STATUS_ID}');
                if (!status) return false;
                status.textContent = {payload};
                status.style.color = '{color}';
                return true;
            }})()
            "#
        ))
        .await;
    }
}

impl<S: CommentSurface> StatusPanel for OverlayPanel<S> {
    fn mount(&self) -> impl Future<Output = Result<(), SurfaceError>> + Send {
        async move {
            self.surface.eval(MOUNT_SCRIPT).await?;
            debug!("panel mounted");
            Ok(())
        }
    }

    fn set_busy(&self, busy: bool) -> impl Future<Output = ()> + Send {
        async move {
            self.run_script(format!(
                r#"
                (() => {{
                    const panel = document.getElementById('{PANEL_ID}');
                    if (!panel) return false;
                    panel.querySelectorAll('button[data-tubedigest]')
                         .forEach(b => b.disabled = {busy});
                    return true;
                }})()
                "#
            ))
            .await;
        }
    }

    fn show_loading(&self, comment_count: usize) -> impl Future<Output = ()> + Send {
        async move {
            self.set_status(
                &format!("Summarizing {comment_count} comments…"),
                "#606060",
            )
            .await;
        }
    }

    fn show_summary(&self, text: &str) -> impl Future<Output = ()> + Send {
        async move {
            self.set_status(text, "#0f0f0f").await;
        }
    }

    fn show_error(&self, text: &str) -> impl Future<Output = ()> + Send {
        async move {
            self.set_status(text, "#cc0000").await;
        }
    }

    fn clear_transient(&self) -> impl Future<Output = ()> + Send {
        async move {
            self.set_status("", "#0f0f0f").await;
        }
    }
}

/// Read and clear the entry-request slot the panel buttons write into.
///
/// Returns the requested mode when a button was clicked since the last
/// poll. Read and clear are two round-trips, but the only writer between
/// them is another button click, and losing one duplicate click is fine.
pub async fn take_entry_request<S: CommentSurface>(surface: &S) -> Option<CollectMode> {
    let texts = surface
        .texts(&format!("#{REQUEST_ID}"))
        .await
        .unwrap_or_default();
    let request = texts.first().map(String::as_str).unwrap_or_default();
    let mode = match request.trim() {
        "quick" => Some(CollectMode::Quick),
        "deep" => Some(CollectMode::Deep),
        _ => None,
    };
    if mode.is_some() {
        let clear = format!(
            r#"
            (() => {{
                const slot = document.getElementById('{REQUEST_ID}');
                if (slot) slot.textContent = '';
                return true;
            }})()
            "#
        );
        if let Err(e) = surface.eval(&clear).await {
            warn!(error = %e, "failed to clear entry request slot");
        }
    }
    mode
}
