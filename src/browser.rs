//! Browser lifecycle management.
//!
//! Launches a chromiumoxide-driven Chrome pointed at a watch page. The
//! event handler task MUST be aborted when the browser goes away or it
//! runs indefinitely; [`BrowserHandle`] owns both and cleans up the
//! per-session user-data directory after the process exits.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::{self, JoinHandle};
use tracing::{info, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// A launched browser plus its event-handler task and temp profile dir.
pub struct BrowserHandle {
    browser: Browser,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl BrowserHandle {
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the browser, wait for the process to exit, then remove the
    /// temp profile. Waiting first matters: the profile cannot be removed
    /// while Chrome holds file handles in it.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("failed to close browser: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            warn!("failed to wait for browser exit: {e}");
        }
        self.handler.abort();
        if let Some(dir) = self.user_data_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                warn!(
                    "failed to clean up user data dir {}: {e}. Manual cleanup may be required.",
                    dir.display()
                );
            }
        }
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        self.handler.abort();
        if let Some(dir) = self.user_data_dir.take() {
            warn!("browser handle dropped without shutdown, removing profile dir");
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

/// Locate a Chrome/Chromium executable: the `CHROMIUM_PATH` environment
/// variable first, then the usual per-platform installation paths.
pub fn find_browser_executable() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
    }

    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    for candidate in candidates {
        let path = PathBuf::from(candidate);
        if path.exists() {
            info!("found browser executable: {}", path.display());
            return Ok(path);
        }
    }

    anyhow::bail!(
        "no Chrome/Chromium executable found; set CHROMIUM_PATH to point at one"
    )
}

/// Launch a browser suitable for driving a YouTube watch page.
pub async fn launch(headless: bool) -> Result<BrowserHandle> {
    let chrome_path = find_browser_executable()?;

    let user_data_dir =
        std::env::temp_dir().join(format!("tubedigest_chrome_{}", std::process::id()));
    std::fs::create_dir_all(&user_data_dir).context("failed to create user data directory")?;

    let headless_mode = if headless {
        HeadlessMode::default()
    } else {
        HeadlessMode::False
    };

    let browser_config = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1920, 1080)
        .user_data_dir(user_data_dir.clone())
        .chrome_executable(chrome_path)
        .headless_mode(headless_mode)
        .arg(format!("--user-agent={CHROME_USER_AGENT}"))
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-infobars")
        .arg("--disable-notifications")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--disable-background-networking")
        .arg("--disable-popup-blocking")
        .arg("--mute-audio")
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

    info!("launching browser");
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("failed to launch browser")?;

    // The handler task must be tracked, not detached, so shutdown can
    // stop it.
    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::error!("browser handler error: {e:?}");
            }
        }
        info!("browser event handler task completed");
    });

    Ok(BrowserHandle {
        browser,
        handler: handler_task,
        user_data_dir: Some(user_data_dir),
    })
}

/// Open the watch page and wait for its initial load.
pub async fn open_watch_page(handle: &BrowserHandle, url: &str) -> Result<Page> {
    let page = handle
        .browser()
        .new_page("about:blank")
        .await
        .context("failed to create page")?;

    page.goto(url)
        .await
        .with_context(|| format!("failed to navigate to {url}"))?;
    page.wait_for_navigation()
        .await
        .context("failed to wait for initial page load")?;

    info!("watch page loaded: {url}");
    Ok(page)
}
