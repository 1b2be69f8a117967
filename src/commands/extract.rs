//! Detail extraction command: scrapes given pages without a listing sweep.

use crate::config::Config;
use crate::format::Formatter;
use crate::pipeline::RecordExtractor;
use crate::watchfinder::{DetailClient, DetailFetch, DetailLink, WatchRecord};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Extracts records from detail page URLs, site paths, or saved HTML files.
pub struct ExtractCommand {
    config: Config,
}

impl ExtractCommand {
    /// Creates a new extract command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches each target and returns formatted output.
    pub async fn execute(&self, targets: &[String]) -> Result<String> {
        let client = DetailClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client, targets).await
    }

    /// Extracts with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl DetailFetch,
        targets: &[String],
    ) -> Result<String> {
        let extractor = RecordExtractor::new(self.config.base_url.clone());
        let mut records: Vec<WatchRecord> = Vec::with_capacity(targets.len());

        for target in targets {
            let target = target.trim();
            info!("Extracting: {}", target);

            let record = if target.ends_with(".html") && Path::new(target).is_file() {
                let html = std::fs::read_to_string(target)
                    .with_context(|| format!("Failed to read HTML file: {}", target))?;
                RecordExtractor::extract_html(&html, target)
            } else {
                extractor.extract(client, &DetailLink::new(target)).await
            };

            records.push(record);
        }

        let formatter = Formatter::new(self.config.format);
        match records.as_slice() {
            [record] => Ok(formatter.format_record(record)),
            records => Ok(formatter.format_records(records)),
        }
    }
}
