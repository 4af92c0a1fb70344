//! Deep-loader convergence, cap enforcement, and scroll restoration.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::FixtureSurface;
use tubedigest::error::DigestError;
use tubedigest::{ContainerCache, DigestConfig, ReplyExpander, load_deep};

fn quick_config() -> DigestConfig {
    // Real pacing is irrelevant under a paused clock, but shrinking it
    // keeps auto-advance cheap.
    DigestConfig::default()
        .with_expand_pacing(
            3,
            Duration::from_millis(1),
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .with_load_settle(Duration::from_millis(1))
}

#[tokio::test(start_paused = true)]
async fn stops_at_the_global_cap_when_content_keeps_growing() {
    let surface = Arc::new(FixtureSurface::with(|state| {
        state.container_present = true;
        state.grow_per_locate = 60;
        state.scroll = 800.0;
    }));

    let collected = load_deep(
        surface.as_ref(),
        &ContainerCache::new(),
        &ReplyExpander::new(),
        &quick_config(),
    )
    .await
    .expect("deep collection succeeds");

    assert_eq!(collected.len(), DigestConfig::default().deep_max_comments());
}

#[tokio::test(start_paused = true)]
async fn terminates_within_the_pass_bound_when_growth_never_converges() {
    let surface = Arc::new(FixtureSurface::with(|state| {
        state.container_present = true;
        // One new comment per lookup: always growing, never reaching
        // the cap within the pass budget.
        state.grow_per_locate = 1;
    }));

    let config = quick_config();
    let collected = load_deep(
        surface.as_ref(),
        &ContainerCache::new(),
        &ReplyExpander::new(),
        &config,
    )
    .await
    .expect("deep collection succeeds");

    // Bounded by the pass budget: the loader gave up provoking growth
    // long before the cap.
    assert!(!collected.is_empty());
    assert!(collected.len() < DigestConfig::default().deep_max_comments());
}

#[tokio::test(start_paused = true)]
async fn converges_when_no_new_comments_arrive() {
    let surface = Arc::new(FixtureSurface::with(|state| {
        state.container_present = true;
        state.comments = (0..8).map(|i| format!("static comment {i}")).collect();
    }));

    let collected = load_deep(
        surface.as_ref(),
        &ContainerCache::new(),
        &ReplyExpander::new(),
        &quick_config(),
    )
    .await
    .expect("deep collection succeeds");

    assert_eq!(collected.len(), 8);
    // Convergence after the first iterate pass: one scroll step plus the
    // final restore.
    let history = surface.state.lock().scroll_history.clone();
    assert_eq!(history.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn restores_scroll_position_on_success() {
    let surface = Arc::new(FixtureSurface::with(|state| {
        state.container_present = true;
        state.comments = vec!["some comment text here".to_string()];
        state.scroll = 800.0;
    }));

    load_deep(
        surface.as_ref(),
        &ContainerCache::new(),
        &ReplyExpander::new(),
        &quick_config(),
    )
    .await
    .expect("deep collection succeeds");

    let history = surface.state.lock().scroll_history.clone();
    assert_eq!(history.last().copied(), Some(800.0));
}

#[tokio::test(start_paused = true)]
async fn restores_scroll_position_when_a_mid_iteration_step_fails() {
    let surface = Arc::new(FixtureSurface::with(|state| {
        state.container_present = true;
        state.comments = vec!["some comment text here".to_string()];
        state.scroll = 640.0;
        state.fail_region_bottom = true;
    }));

    let err = load_deep(
        surface.as_ref(),
        &ContainerCache::new(),
        &ReplyExpander::new(),
        &quick_config(),
    )
    .await
    .expect_err("scripted structural failure propagates");
    assert!(matches!(err, DigestError::Surface(_)));

    let history = surface.state.lock().scroll_history.clone();
    assert_eq!(history.last().copied(), Some(640.0));
}

#[tokio::test(start_paused = true)]
async fn missing_container_is_a_propagated_error() {
    let surface = Arc::new(FixtureSurface::with(|state| {
        state.container_present = false;
    }));

    let err = load_deep(
        surface.as_ref(),
        &ContainerCache::new(),
        &ReplyExpander::new(),
        &quick_config(),
    )
    .await
    .expect_err("no container is terminal for deep collection");
    assert!(matches!(err, DigestError::NotFound("comments container")));
}
