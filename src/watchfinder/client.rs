//! HTTP client for detail pages using wreq for TLS fingerprint emulation.

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Trait for detail-page fetching - enables mocking for tests.
#[async_trait]
pub trait DetailFetch: Send + Sync {
    /// Fetches the page at `url` and returns its HTML.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP client for product detail pages.
pub struct DetailClient {
    client: Client,
}

impl DetailClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl DetailFetch for DetailClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}
