//! Incremental comment loading for deep collection.
//!
//! YouTube renders comments lazily: more arrive as the viewport nears the
//! bottom of the comment region, and older layouts gate batches behind a
//! "load more" control. Deep collection provokes both, re-locates after
//! every pass, and stops when the count stops growing (convergence), the
//! global cap is reached, or the pass budget runs out.
//!
//! The viewport scroll position is recorded before the first pass and
//! restored on every exit path, including errors; the user's reading
//! position is not ours to keep.

use log::{debug, warn};

use crate::config::DigestConfig;
use crate::error::{DigestError, DigestResult};
use crate::expander::ReplyExpander;
use crate::locator::{self, ContainerCache};
use crate::surface::CommentSurface;

/// Deep collection: scroll, expand, paginate until convergence.
///
/// Terminal failures (no comments container, a dead browser) propagate to
/// the caller; scroll restoration still happens first.
pub async fn load_deep<S: CommentSurface>(
    surface: &S,
    cache: &ContainerCache,
    expander: &ReplyExpander,
    config: &DigestConfig,
) -> DigestResult<Vec<String>> {
    let origin = surface.scroll_offset().await?;
    debug!("deep collection started at scroll offset {origin:.0}");

    let outcome = drive(surface, cache, expander, config).await;

    // Unconditional release of the scroll position acquired above. A
    // restore failure is logged, never allowed to mask the real outcome.
    if let Err(e) = surface.scroll_to(origin).await {
        warn!("failed to restore scroll position: {e}");
    }

    outcome
}

async fn drive<S: CommentSurface>(
    surface: &S,
    cache: &ContainerCache,
    expander: &ReplyExpander,
    config: &DigestConfig,
) -> DigestResult<Vec<String>> {
    // Init: one locate + expand pass over whatever is already rendered.
    let mut collected = locator::locate(surface, cache, config).await;
    if !collected.is_empty() {
        expander.expand(surface, config).await;
        collected = locator::locate(surface, cache, config).await;
    }

    for pass in 1..=config.max_load_passes {
        let container = locator::resolve_container(surface, cache, config)
            .await
            .ok_or(DigestError::NotFound("comments container"))?;

        let bottom = surface
            .region_bottom(&container)
            .await?
            .ok_or(DigestError::NotFound("comments container"))?;

        surface.scroll_to(bottom + config.scroll_step_px).await?;
        tokio::time::sleep(config.load_settle).await;

        if !collected.is_empty() {
            expander.expand(surface, config).await;
        }

        // Pagination is best-effort: a vanished or failing "load more"
        // control must not abort the run.
        match surface.actionable_controls(config.pagination_control()).await {
            Ok(n) if n > 0 => {
                match surface.trigger_control(config.pagination_control(), 0).await {
                    Ok(true) => {
                        debug!("pagination control triggered on pass {pass}");
                        tokio::time::sleep(config.load_settle).await;
                        expander.expand(surface, config).await;
                    }
                    Ok(false) => debug!("pagination control vanished before click"),
                    Err(e) => warn!("pagination click failed: {e}"),
                }
            }
            Ok(_) => {}
            Err(e) => warn!("pagination probe failed: {e}"),
        }

        let latest = locator::locate(surface, cache, config).await;
        let grew = latest.len() > collected.len();
        debug!(
            "pass {pass}: {} -> {} comments",
            collected.len(),
            latest.len()
        );
        collected = latest;

        if collected.len() >= config.deep_max_comments {
            debug!("deep cap reached ({})", config.deep_max_comments);
            break;
        }
        if !grew {
            debug!("converged: no new comments arrived");
            break;
        }
    }

    collected.truncate(config.deep_max_comments);
    Ok(collected)
}
