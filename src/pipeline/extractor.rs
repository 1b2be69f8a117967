//! Record extraction from product detail pages.

use crate::watchfinder::parser::parse_detail_page;
use crate::watchfinder::{DetailFetch, DetailLink, WatchRecord};
use tracing::{info, warn};

/// Turns detail links into normalized watch records.
pub struct RecordExtractor {
    base_url: String,
}

impl RecordExtractor {
    /// Creates an extractor resolving links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Fetches and parses one detail page.
    ///
    /// Always yields a record. A page that cannot be fetched becomes an
    /// all-"N/A" record, which the result writer later drops.
    pub async fn extract(&self, client: &impl DetailFetch, link: &DetailLink) -> WatchRecord {
        let url = link.to_url(&self.base_url);
        self.extract_url(client, &url).await
    }

    /// Same as [`extract`](Self::extract) for an already absolute URL.
    pub async fn extract_url(&self, client: &impl DetailFetch, url: &str) -> WatchRecord {
        match client.fetch(url).await {
            Ok(html) => Self::extract_html(&html, url),
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                WatchRecord::unavailable(url)
            }
        }
    }

    /// Parses and normalizes already-fetched HTML.
    pub fn extract_html(html: &str, url: &str) -> WatchRecord {
        parse_detail_page(html).normalize(url)
    }

    /// Extracts every link in turn, one request at a time.
    pub async fn extract_all<'a>(
        &self,
        client: &impl DetailFetch,
        links: impl IntoIterator<Item = &'a DetailLink>,
    ) -> Vec<WatchRecord> {
        info!("Extracting data for each watch...");

        let mut records = Vec::new();
        for link in links {
            let record = self.extract(client, link).await;
            info!(
                "{} | {} | {} | {}",
                record.url, record.model, record.reference_code, record.price
            );
            records.push(record);
        }

        info!("Extraction complete!");
        records
    }
}
