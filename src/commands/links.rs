//! Link discovery command: runs only the listing sweep.

use crate::config::Config;
use crate::format::Formatter;
use crate::pipeline::LinkCollector;
use crate::watchfinder::{BrowserSession, DetailLink, ListingPage, ListingSession};
use anyhow::{Context, Result};
use tracing::info;

/// Lists the detail links a sweep would scrape.
pub struct LinksCommand {
    config: Config,
}

impl LinksCommand {
    /// Creates a new links command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Launches the browser, sweeps, and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let session =
            BrowserSession::launch(&self.config).await.context("Failed to start browser session")?;

        Ok(self.execute_with_session(session).await)
    }

    /// Sweeps with a provided session (for testing).
    pub async fn execute_with_session<S: ListingSession>(&self, session: S) -> String {
        let collected = LinkCollector::new(&self.config)
            .collect(session, &self.config.collections, self.config.pages_per_collection)
            .await;

        let links: Vec<DetailLink> = collected.links.into_iter().collect();
        let formatter = Formatter::new(self.config.format);
        info!("Listing sweep: {}", collected.report);
        formatter.format_links(&links)
    }

    /// Lists every listing URL the sweep would visit, without a browser.
    pub fn listing_urls(&self) -> Vec<String> {
        let collector = LinkCollector::new(&self.config);

        self.config
            .collections
            .iter()
            .flat_map(|collection| {
                (1..=self.config.pages_per_collection)
                    .map(move |page| ListingPage::new(collection.as_str(), page))
            })
            .map(|page| collector.listing_url(&page))
            .collect()
    }
}
