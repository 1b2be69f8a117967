//! Full scrape command: collect links, extract records, write the table.

use crate::config::Config;
use crate::pipeline::{LinkCollector, RecordExtractor, ResultWriter, WriteSummary};
use crate::watchfinder::{BrowserSession, DetailClient, DetailFetch, ListingSession, SweepReport};
use anyhow::{Context, Result};

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub sweep: SweepReport,
    pub unique_links: usize,
    pub summary: WriteSummary,
}

impl ScrapeOutcome {
    /// Human-readable run summary.
    pub fn render(&self) -> String {
        format!(
            "Listing sweep: {}\nUnique watch links: {}\nRows written: {} ({} dropped without a price)\nData saved to {}",
            self.sweep,
            self.unique_links,
            self.summary.rows_written,
            self.summary.rows_dropped,
            self.summary.path.display()
        )
    }
}

/// Runs the whole pipeline.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Launches the browser and HTTP client and runs the pipeline.
    pub async fn execute(&self) -> Result<ScrapeOutcome> {
        let client = DetailClient::new(&self.config).context("Failed to create HTTP client")?;
        let session =
            BrowserSession::launch(&self.config).await.context("Failed to start browser session")?;

        self.execute_with(session, &client).await
    }

    /// Runs the pipeline with provided collaborators (for testing).
    pub async fn execute_with<S: ListingSession>(
        &self,
        session: S,
        client: &impl DetailFetch,
    ) -> Result<ScrapeOutcome> {
        let collector = LinkCollector::new(&self.config);
        let collected = collector
            .collect(session, &self.config.collections, self.config.pages_per_collection)
            .await;

        let extractor = RecordExtractor::new(self.config.base_url.clone());
        let mut writer = ResultWriter::new();
        writer.extend(extractor.extract_all(client, &collected.links).await);

        let summary = writer.write(&self.config.output_dir, &self.config.output_file)?;

        Ok(ScrapeOutcome { sweep: collected.report, unique_links: collected.links.len(), summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct OnePageSession {
        html: String,
        closed: Arc<AtomicBool>,
    }

    #[async_trait]
    impl ListingSession for OnePageSession {
        async fn render(&mut self, url: &str) -> Result<String> {
            if url.ends_with("pageno=1") {
                Ok(self.html.clone())
            } else {
                Ok("<html></html>".to_string())
            }
        }

        async fn close(&mut self) -> Result<()> {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Serves a priced page for `/item/priced` and an unpriced one otherwise.
    struct PricedFetcher;

    #[async_trait]
    impl DetailFetch for PricedFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            let price = if url.ends_with("/item/priced") {
                r#"<span class="h2 bold reduced-padding">$5,200</span>"#
            } else {
                ""
            };
            Ok(format!(
                r#"<html><head><meta itemprop="mpn" content="CAR2A1Z"></head><body>{}</body></html>"#,
                price
            ))
        }
    }

    #[tokio::test]
    async fn test_scrape_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config {
            collections: vec!["Carrera".to_string()],
            pages_per_collection: 2,
            output_dir: tmp.path().join("out"),
            ..Config::default()
        };

        let closed = Arc::new(AtomicBool::new(false));
        let session = OnePageSession {
            html: r#"<a href="/item/priced">A</a><a href="/item/unpriced">B</a>"#.to_string(),
            closed: closed.clone(),
        };

        let outcome = ScrapeCommand::new(config.clone())
            .execute_with(session, &PricedFetcher)
            .await
            .unwrap();

        assert!(closed.load(Ordering::SeqCst));
        assert_eq!(outcome.unique_links, 2);
        assert_eq!(outcome.sweep.pages_visited, 2);
        assert_eq!(outcome.sweep.pages_empty, 1);
        assert_eq!(outcome.summary.rows_written, 1);
        assert_eq!(outcome.summary.rows_dropped, 1);

        let content = std::fs::read_to_string(config.output_path()).unwrap();
        assert!(content.starts_with("URL,Model,Reference Code,Price"));
        assert!(content.contains("https://www.watchfinder.com/item/priced,N/A,CAR2A1Z,5200"));
        assert!(!content.contains("/item/unpriced"));

        let rendered = outcome.render();
        assert!(rendered.contains("Unique watch links: 2"));
        assert!(rendered.contains("1 dropped without a price"));
    }
}
