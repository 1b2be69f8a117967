//! Output formatting for watch records and link lists (table, JSON, CSV).

use crate::config::OutputFormat;
use crate::pipeline::ResultTable;
use crate::watchfinder::{DetailLink, WatchRecord};

/// Formats records for printing.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single record.
    pub fn format_record(&self, record: &WatchRecord) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(record),
            OutputFormat::Table => self.table_single(record),
            OutputFormat::Csv => self.csv_records(std::slice::from_ref(record)),
        }
    }

    /// Formats multiple records.
    pub fn format_records(&self, records: &[WatchRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => String::new(),
                OutputFormat::Table => "No watches found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => {
                records.iter().map(|r| self.table_single(r)).collect::<Vec<_>>().join("\n\n")
            }
            OutputFormat::Csv => self.csv_records(records),
        }
    }

    /// Formats a list of links, sorted for stable output.
    pub fn format_links(&self, links: &[DetailLink]) -> String {
        let mut links = links.to_vec();
        links.sort();

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&links).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => std::iter::once("link".to_string())
                .chain(links.iter().map(|l| l.to_string()))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Table => {
                let mut lines: Vec<String> = links.iter().map(|l| l.to_string()).collect();
                lines.push(String::new());
                lines.push(format!("Total: {} links", links.len()));
                lines.join("\n")
            }
        }
    }

    // JSON formatting

    fn json_single(&self, record: &WatchRecord) -> String {
        serde_json::to_string_pretty(&record.flatten()).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_records(&self, records: &[WatchRecord]) -> String {
        let rows: Vec<_> = records.iter().map(WatchRecord::flatten).collect();
        serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, record: &WatchRecord) -> String {
        let row = record.flatten();
        let width = row.keys().map(|k| k.chars().count()).max().unwrap_or(0) + 1;

        row.iter()
            .map(|(field, value)| format!("{:<width$} {}", format!("{}:", field), value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // CSV formatting

    fn csv_records(&self, records: &[WatchRecord]) -> String {
        let table = ResultTable::from_records(records);
        let mut buf = Vec::new();

        if table.write_csv(&mut buf).is_err() {
            return String::new();
        }

        String::from_utf8_lossy(&buf).trim_end().to_string()
    }
}
