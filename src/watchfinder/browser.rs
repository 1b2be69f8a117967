//! Headless browser session for listing pages.
//!
//! Listing pages fill in their product grid after the initial load, so they
//! are rendered in Chrome through chromiumoxide. One session (one browser,
//! one tab) serves the whole sweep and is closed when the sweep ends.

use crate::config::Config;
use crate::error::ScrapeError;
use anyhow::Result;
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Trait for rendering listing pages - enables mocking for tests.
#[async_trait]
pub trait ListingSession: Send {
    /// Navigates to `url`, waits for it to settle, and returns the rendered HTML.
    async fn render(&mut self, url: &str) -> Result<String>;

    /// Releases the session. Later calls are no-ops.
    async fn close(&mut self) -> Result<()>;
}

/// A running Chrome instance with a single reusable tab.
///
/// Call [`close`](ListingSession::close) when done. If the session is
/// dropped without it, the event loop is aborted and chromiumoxide kills
/// the browser process.
pub struct BrowserSession {
    browser: Browser,
    page: Option<Page>,
    handler: JoinHandle<()>,
    settle_delay: Duration,
    closed: bool,
}

impl BrowserSession {
    /// Launches the browser described by `config` and opens its tab.
    pub async fn launch(config: &Config) -> Result<Self> {
        let mut builder =
            BrowserConfig::builder().arg("--no-sandbox").arg("--disable-dev-shm-usage");

        if !config.headless {
            builder = builder.with_head();
        }

        if let Some(path) = &config.chrome_executable {
            debug!("Using browser executable: {}", path.display());
            builder = builder.chrome_executable(path);
        }

        let browser_config = builder.build().map_err(ScrapeError::BrowserLaunch)?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScrapeError::BrowserLaunch(e.to_string()))?;

        // chromiumoxide only makes progress while its handler stream is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser after tab error: {}", close_err);
                }
                handler.abort();
                return Err(ScrapeError::BrowserLaunch(e.to_string()).into());
            }
        };

        debug!("Browser session started");

        Ok(Self {
            browser,
            page: Some(page),
            handler,
            settle_delay: Duration::from_millis(config.settle_delay_ms),
            closed: false,
        })
    }
}

#[async_trait]
impl ListingSession for BrowserSession {
    async fn render(&mut self, url: &str) -> Result<String> {
        let page = self.page.as_ref().ok_or(ScrapeError::SessionClosed)?;

        debug!("Rendering {}", url);
        page.goto(url).await.map_err(|e| ScrapeError::ListingRender {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tokio::time::sleep(self.settle_delay).await;

        let html = page.content().await.map_err(|e| ScrapeError::ListingRender {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(html)
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                warn!("Failed to close browser tab: {}", e);
            }
        }

        let result = self.browser.close().await;
        if result.is_ok() {
            let _ = self.browser.wait().await;
        }
        self.handler.abort();

        debug!("Browser session closed");
        result.map(|_| ()).map_err(|e| anyhow::anyhow!("Failed to close browser: {}", e))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if !self.closed {
            warn!("Browser session dropped without close; killing browser");
            self.handler.abort();
        }
    }
}
