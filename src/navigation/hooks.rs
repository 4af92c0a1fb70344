//! Navigation-signal producers for the live browser.
//!
//! YouTube is a single-page application: moving between videos mutates
//! the URL and swaps page content without a document reload. Three
//! independent detection mechanisms feed the monitor, any one of which
//! is sufficient:
//!
//! 1. An injected page hook wrapping `history.pushState`/`replaceState`
//!    (original behavior preserved, counter bumped afterward), listening
//!    for `popstate` (back/forward), and running a `MutationObserver`
//!    over the region that hosts the comments container.
//! 2. The CDP `Page.navigatedWithinDocument` event stream.
//! 3. The CDP `Page.frameNavigated` event stream (full loads).
//!
//! The hook writes into an in-page counter; [`pump_signals`] polls it and
//! forwards everything as [`NavSignal`]s over an mpsc channel.

use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::page::{
    EventFrameNavigated, EventNavigatedWithinDocument,
};
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use super::NavSignal;
use crate::error::SurfaceError;
use crate::surface::{CdpSurface, CommentSurface};

/// Page-side navigation hook. Idempotent; installing twice is a no-op.
pub const NAV_HOOK_SCRIPT: &str = r#"
(() => {
    if (window.__tubedigestNavHook) return true;
    window.__tubedigestNavHook = true;
    window.__tubedigestNavTicks = 0;
    const bump = () => {
        window.__tubedigestNavTicks = (window.__tubedigestNavTicks || 0) + 1;
    };
    const origPush = history.pushState.bind(history);
    history.pushState = function (...args) {
        const result = origPush(...args);
        bump();
        return result;
    };
    const origReplace = history.replaceState.bind(history);
    history.replaceState = function (...args) {
        const result = origReplace(...args);
        bump();
        return result;
    };
    window.addEventListener('popstate', bump);
    window.addEventListener('yt-navigate-finish', bump);
    const region = document.querySelector('ytd-page-manager') || document.body;
    if (region) {
        new MutationObserver((mutations) => {
            for (const m of mutations) {
                if (m.type === 'childList' && m.addedNodes.length > 0) {
                    bump();
                    return;
                }
            }
        }).observe(region, { childList: true });
    }
    return true;
})()
"#;

/// Install the page-side hook.
pub async fn install_hooks(surface: &CdpSurface) -> Result<(), SurfaceError> {
    surface.eval(NAV_HOOK_SCRIPT).await?;
    debug!("navigation hooks installed");
    Ok(())
}

/// Forward navigation signals from the page to the monitor until either
/// the event streams end (browser gone) or the receiver is dropped.
///
/// Meant to be spawned alongside `NavigationMonitor::run`.
pub async fn pump_signals(surface: CdpSurface, tx: mpsc::Sender<NavSignal>, poll: Duration) {
    let page = surface.page().clone();

    let mut frame_navigated = match page.event_listener::<EventFrameNavigated>().await {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "could not subscribe to frame navigation events");
            return;
        }
    };
    let mut within_document = match page.event_listener::<EventNavigatedWithinDocument>().await {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, "could not subscribe to in-document navigation events");
            return;
        }
    };

    let mut last_ticks = 0u64;
    let mut interval = tokio::time::interval(poll);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            event = frame_navigated.next() => {
                if event.is_none() {
                    debug!("frame navigation stream ended");
                    return;
                }
                if tx.send(NavSignal::FrameNavigated).await.is_err() {
                    return;
                }
            }
            event = within_document.next() => {
                if event.is_none() {
                    debug!("in-document navigation stream ended");
                    return;
                }
                if tx.send(NavSignal::HistoryMutation).await.is_err() {
                    return;
                }
            }
            _ = interval.tick() => {
                let ticks = match page.evaluate("window.__tubedigestNavTicks || 0").await {
                    Ok(result) => result.into_value::<u64>().unwrap_or(0),
                    Err(e) => {
                        trace!(error = %e, "nav tick poll failed");
                        continue;
                    }
                };
                if ticks > last_ticks {
                    last_ticks = ticks;
                    if tx.send(NavSignal::PageHook).await.is_err() {
                        return;
                    }
                }
            }
        }
    }
}
