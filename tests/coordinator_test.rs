//! Coordinator pipeline: validation, deadlines, busy scoping, rendering.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ErrorSummarizer, FixtureSurface, NeverSummarizer, RecordingPanel, StaticSummarizer};
use tubedigest::error::DigestError;
use tubedigest::summarize::Summarizer;
use tubedigest::{ContainerCache, Coordinator, DigestConfig};

type TestCoordinator<M> = Coordinator<FixtureSurface, RecordingPanel, M>;

fn build<M: Summarizer>(
    summarizer: M,
    comments: Vec<&str>,
    config: DigestConfig,
) -> (Arc<FixtureSurface>, Arc<RecordingPanel>, TestCoordinator<M>) {
    let comments: Vec<String> = comments.iter().map(ToString::to_string).collect();
    let surface = Arc::new(FixtureSurface::with(move |state| {
        state.url = "https://www.youtube.com/watch?v=test0001".to_string();
        state.container_present = !comments.is_empty();
        state.comments = comments;
    }));
    let panel = Arc::new(RecordingPanel::default());
    let coordinator = Coordinator::new(
        Arc::clone(&surface),
        Arc::clone(&panel),
        summarizer,
        Arc::new(ContainerCache::new()),
        config,
    );
    (surface, panel, coordinator)
}

#[tokio::test]
async fn quick_summarize_end_to_end_dedups_and_renders() {
    // Three comment nodes, one duplicate text: exactly two unique
    // sanitized strings reach the summarizer.
    let (_surface, panel, coordinator) = build(
        StaticSummarizer("viewers loved the pacing"),
        vec![
            "Great breakdown of the topic",
            "Great breakdown of the topic",
            "The audio mix is slightly off",
        ],
        DigestConfig::default(),
    );

    let report = coordinator.summarize_quick().await.expect("summary");
    assert_eq!(report.comment_count, 2);
    assert_eq!(report.summary, "viewers loved the pacing");
    assert_eq!(report.video_url, "https://www.youtube.com/watch?v=test0001");

    let log = panel.log.lock();
    assert_eq!(log.loading, vec![2]);
    assert_eq!(log.summaries, vec!["viewers loved the pacing"]);
    assert!(log.errors.is_empty());
    assert_eq!(log.busy, vec![true, false]);
}

#[tokio::test(start_paused = true)]
async fn quick_timeout_fires_at_the_deadline_and_releases_busy() {
    let (_surface, panel, coordinator) = build(
        NeverSummarizer,
        vec!["a perfectly reasonable comment"],
        DigestConfig::default(),
    );

    let started = tokio::time::Instant::now();
    let err = coordinator.summarize_quick().await.expect_err("times out");
    let elapsed = started.elapsed();

    assert!(matches!(err, DigestError::Timeout(d) if d == Duration::from_secs(60)));
    assert!(
        elapsed >= Duration::from_secs(60) && elapsed < Duration::from_secs(61),
        "elapsed {elapsed:?}"
    );

    let log = panel.log.lock();
    assert_eq!(log.busy, vec![true, false], "entry points re-enabled");
    assert_eq!(log.errors.len(), 1);
    assert!(log.errors[0].contains("timed out"));
}

#[tokio::test]
async fn zero_comments_renders_the_no_comments_error() {
    let (_surface, panel, coordinator) = build(
        StaticSummarizer("never used"),
        Vec::new(),
        DigestConfig::default(),
    );

    let err = coordinator.summarize_quick().await.expect_err("no comments");
    assert!(matches!(err, DigestError::NoComments));

    let log = panel.log.lock();
    assert_eq!(log.errors, vec!["no comments found"]);
    assert_eq!(log.busy, vec![true, false]);
    assert!(log.summaries.is_empty());
}

#[tokio::test]
async fn provider_error_text_is_relayed_verbatim() {
    let (_surface, panel, coordinator) = build(
        ErrorSummarizer("x"),
        vec!["a perfectly reasonable comment"],
        DigestConfig::default(),
    );

    let err = coordinator.summarize_quick().await.expect_err("provider error");
    assert!(matches!(err, DigestError::External(m) if m == "x"));
    assert_eq!(panel.log.lock().errors, vec!["x"]);
}

#[tokio::test]
async fn overlong_comments_alone_fail_validation() {
    let wall_of_text = "x".repeat(1500);
    let (_surface, panel, coordinator) = build(
        StaticSummarizer("never used"),
        vec![wall_of_text.as_str()],
        DigestConfig::default(),
    );

    let err = coordinator.summarize_quick().await.expect_err("validation");
    assert!(matches!(err, DigestError::Validation(_)));
    assert_eq!(panel.log.lock().busy, vec![true, false]);
}

#[tokio::test]
async fn the_quick_cap_limits_what_reaches_the_summarizer() {
    let many: Vec<String> = (0..180).map(|i| format!("unique comment number {i}")).collect();
    let refs: Vec<&str> = many.iter().map(String::as_str).collect();
    let (_surface, _panel, coordinator) =
        build(StaticSummarizer("summary"), refs, DigestConfig::default());

    let report = coordinator.summarize_quick().await.expect("summary");
    assert_eq!(
        report.comment_count,
        DigestConfig::default().quick_max_comments()
    );
}

#[tokio::test(start_paused = true)]
async fn a_second_trigger_while_busy_is_rejected_without_touching_state() {
    let (_surface, panel, coordinator) = build(
        NeverSummarizer,
        vec!["a perfectly reasonable comment"],
        DigestConfig::default(),
    );
    let coordinator = Arc::new(coordinator);

    let first = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        async move { coordinator.summarize_quick().await }
    });

    // Give the first run a chance to take the busy flag.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let err = coordinator.summarize_deep().await.expect_err("rejected");
    assert!(matches!(err, DigestError::Busy));

    // The rejection did not flip the first run's busy UI.
    assert_eq!(panel.log.lock().busy, vec![true]);

    // The first run still times out normally afterwards.
    let outcome = first.await.expect("join");
    assert!(matches!(outcome, Err(DigestError::Timeout(_))));
    assert_eq!(panel.log.lock().busy, vec![true, false]);
}
