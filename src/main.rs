//! tubedigest CLI.
//!
//! Live mode drives a Chromium instance to the watch page, mounts the
//! overlay panel, and keeps a navigation monitor running; snapshot mode
//! summarizes a saved watch-page HTML file without a browser.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tubedigest::panel::take_entry_request;
use tubedigest::session::{CollectMode, RunReport};
use tubedigest::summarize::Provider;
use tubedigest::surface::CommentSurface;
use tubedigest::{
    CdpSurface, CleanupRegistry, ContainerCache, Coordinator, DigestConfig, OverlayPanel,
    Settings, SnapshotSurface, StatusPanel, browser, navigation,
};

#[derive(Parser)]
#[command(
    name = "tubedigest",
    version,
    about = "Summarize YouTube comment threads with Claude, OpenAI, or Gemini"
)]
struct Cli {
    /// Watch page URL (https://www.youtube.com/watch?v=...)
    url: Option<String>,

    /// Provoke lazy loading (scroll + pagination + reply expansion)
    /// before summarizing
    #[arg(long)]
    deep: bool,

    /// Summarize a saved watch-page HTML file instead of a live browser
    #[arg(long, value_name = "FILE", conflicts_with = "watch")]
    snapshot: Option<PathBuf>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,

    /// Show the browser window instead of running headless
    #[arg(long)]
    headed: bool,

    /// Stay attached after the first summary: react to panel button
    /// clicks and follow in-page navigation until Ctrl-C
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tubedigest=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = DigestConfig::default();

    let provider = Settings::load(config.settings_io_timeout())
        .await
        .context("no usable provider settings; set TUBEDIGEST_API_KEY or write settings.json")?
        .into_provider();

    if let Some(snapshot) = cli.snapshot {
        return run_snapshot(snapshot, cli.deep, cli.json, provider, config).await;
    }

    let url = cli
        .url
        .context("a watch page URL is required (or use --snapshot FILE)")?;
    if !tubedigest::utils::is_watch_url(&url) {
        warn!("{url} does not look like a watch page; continuing anyway");
    }

    run_live(url, cli.deep, cli.json, cli.headed, cli.watch, provider, config).await
}

async fn run_snapshot(
    path: PathBuf,
    deep: bool,
    json: bool,
    provider: Provider,
    config: DigestConfig,
) -> Result<()> {
    let html = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;

    let surface = Arc::new(SnapshotSurface::new(html, format!("file://{}", path.display())));
    let panel = Arc::new(OverlayPanel::new(Arc::clone(&surface)));
    let cache = Arc::new(ContainerCache::new());
    let coordinator = Coordinator::new(surface, panel, provider, cache, config);

    let report = if deep {
        coordinator.summarize_deep().await?
    } else {
        coordinator.summarize_quick().await?
    };
    emit(&report, json)
}

#[allow(clippy::too_many_arguments)]
async fn run_live(
    url: String,
    deep: bool,
    json: bool,
    headed: bool,
    watch: bool,
    provider: Provider,
    config: DigestConfig,
) -> Result<()> {
    let handle = browser::launch(!headed).await?;
    let page = browser::open_watch_page(&handle, &url).await?;
    let surface = Arc::new(CdpSurface::new(page));

    let panel = Arc::new(OverlayPanel::new(Arc::clone(&surface)));
    if let Err(e) = panel.mount().await {
        warn!("could not mount panel: {e}");
    }

    let cleanup = Arc::new(CleanupRegistry::new(config.cleanup_registry_cap()));
    let cache = Arc::new(ContainerCache::new());

    navigation::hooks::install_hooks(&surface).await.ok();
    let (tx, rx) = navigation::signal_channel();
    let pump = tokio::spawn(navigation::hooks::pump_signals(
        surface.as_ref().clone(),
        tx,
        config.nav_poll_interval(),
    ));
    let monitor = tokio::spawn(
        navigation::NavigationMonitor::new(
            Arc::clone(&surface),
            Arc::clone(&panel),
            Arc::clone(&cleanup),
            Arc::clone(&cache),
            config.clone(),
            rx,
            surface.current_url().await,
        )
        .run(),
    );

    let coordinator = Coordinator::new(
        Arc::clone(&surface),
        Arc::clone(&panel),
        provider,
        Arc::clone(&cache),
        config.clone(),
    );

    let mode = if deep {
        CollectMode::Deep
    } else {
        CollectMode::Quick
    };
    let first = run_once(&coordinator, mode).await;
    if let Some(report) = first {
        emit(&report, json)?;
    }

    if watch {
        info!("watching for panel clicks and navigation; Ctrl-C to exit");
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                () = tokio::time::sleep(std::time::Duration::from_millis(500)) => {
                    if let Some(mode) = take_entry_request(surface.as_ref()).await {
                        if let Some(report) = run_once(&coordinator, mode).await {
                            emit(&report, json)?;
                        }
                    }
                }
            }
        }
    }

    monitor.abort();
    pump.abort();
    handle.shutdown().await;
    Ok(())
}

async fn run_once<S, P, M>(
    coordinator: &Coordinator<S, P, M>,
    mode: CollectMode,
) -> Option<RunReport>
where
    S: CommentSurface,
    P: StatusPanel,
    M: tubedigest::Summarizer,
{
    let outcome = match mode {
        CollectMode::Quick => coordinator.summarize_quick().await,
        CollectMode::Deep => coordinator.summarize_deep().await,
    };
    match outcome {
        Ok(report) => Some(report),
        Err(e) => {
            warn!("summarization failed: {e}");
            None
        }
    }
}

fn emit(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!(
            "# {} comments summarized ({} mode)\n\n{}",
            report.comment_count, report.mode, report.summary
        );
    }
    Ok(())
}
