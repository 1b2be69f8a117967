//! Link collection across collection listing pages.

use crate::config::Config;
use crate::watchfinder::parser::extract_item_links;
use crate::watchfinder::{CollectedLinks, ListingPage, ListingSession};
use tracing::{info, warn};

/// Sweeps listing pages and gathers unique detail links.
pub struct LinkCollector {
    base_url: String,
    brand: String,
    item_marker: String,
}

impl LinkCollector {
    /// Creates a collector for the site described by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            brand: config.brand.clone(),
            item_marker: config.item_marker.clone(),
        }
    }

    /// Builds the URL of one listing page.
    pub fn listing_url(&self, page: &ListingPage) -> String {
        format!(
            "{}/{}/{}/watches?pageno={}",
            self.base_url,
            urlencoding::encode(&self.brand),
            urlencoding::encode(&page.collection),
            page.page
        )
    }

    /// Visits pages `1..=pages_per_collection` of every collection and
    /// returns the deduplicated links.
    ///
    /// Takes ownership of `session` and closes it once the sweep is over,
    /// whatever happened to individual pages.
    pub async fn collect<S: ListingSession>(
        &self,
        mut session: S,
        collections: &[String],
        pages_per_collection: u32,
    ) -> CollectedLinks {
        let collected = self.sweep(&mut session, collections, pages_per_collection).await;

        if let Err(e) = session.close().await {
            warn!("Failed to close browser session: {}", e);
        }

        collected
    }

    async fn sweep<S: ListingSession>(
        &self,
        session: &mut S,
        collections: &[String],
        pages_per_collection: u32,
    ) -> CollectedLinks {
        let mut collected = CollectedLinks::default();

        for collection in collections {
            info!("Getting links to watches in the {} collection...", collection);

            for page_no in 1..=pages_per_collection {
                let page = ListingPage::new(collection.as_str(), page_no);
                let url = self.listing_url(&page);
                collected.report.pages_visited += 1;

                let html = match session.render(&url).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!("Skipping {}: {}", page, e);
                        collected.report.pages_failed += 1;
                        continue;
                    }
                };

                let links = extract_item_links(&html, &self.item_marker);
                if links.is_empty() {
                    warn!("No watch links on {} ({})", page, url);
                    collected.report.pages_empty += 1;
                    continue;
                }

                collected.report.raw_links += links.len();
                collected.links.extend(links);
            }
        }

        if collected.report.pages_failed > 0 || collected.report.pages_empty > 0 {
            warn!(
                "{} listing pages failed to render, {} had no links",
                collected.report.pages_failed, collected.report.pages_empty
            );
        }
        info!("Found {} unique watch links.", collected.links.len());

        collected
    }
}
