//! Result table assembly and CSV persistence.

use crate::watchfinder::models::{NOT_AVAILABLE, PRICE_FIELD};
use crate::watchfinder::WatchRecord;
use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rectangular view of flattened records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    /// Union of every field seen, in first-seen order
    pub columns: Vec<String>,
    pub rows: Vec<IndexMap<String, String>>,
}

impl ResultTable {
    /// Builds a table from records, keeping their order.
    pub fn from_records(records: &[WatchRecord]) -> Self {
        let rows: Vec<IndexMap<String, String>> =
            records.iter().map(WatchRecord::flatten).collect();

        let columns: IndexSet<String> = rows.iter().flat_map(|row| row.keys().cloned()).collect();

        Self { columns: columns.into_iter().collect(), rows }
    }

    /// Drops rows whose price is "N/A" and returns how many were removed.
    /// Columns are left untouched.
    pub fn retain_priced(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row.get(PRICE_FIELD).is_some_and(|p| p != NOT_AVAILABLE));
        before - self.rows.len()
    }

    /// Cell values of `row` in column order; missing fields are empty.
    pub fn cells<'a>(&'a self, row: &'a IndexMap<String, String>) -> Vec<&'a str> {
        self.columns
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or(""))
            .collect()
    }

    /// Writes the header and every row as CSV.
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        if self.columns.is_empty() {
            return Ok(());
        }
        wtr.write_record(&self.columns)?;

        for row in &self.rows {
            wtr.write_record(self.cells(row))?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// What a write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows_written: usize,
    pub rows_dropped: usize,
}

/// Accumulates records over a run and persists them once at the end.
#[derive(Debug, Default)]
pub struct ResultWriter {
    records: Vec<WatchRecord>,
}

impl ResultWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record in processing order.
    pub fn push(&mut self, record: WatchRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assembles the final table with unpriced rows removed.
    pub fn table(&self) -> (ResultTable, usize) {
        let mut table = ResultTable::from_records(&self.records);
        let dropped = table.retain_priced();
        (table, dropped)
    }

    /// Writes the final table to `dir/file_name`, creating `dir` if needed.
    pub fn write(&self, dir: &Path, file_name: &str) -> Result<WriteSummary> {
        info!("Converting data to table...");
        let (table, rows_dropped) = self.table();
        debug!("{} columns, {} rows dropped without a price", table.columns.len(), rows_dropped);

        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

        let path = dir.join(file_name);
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        table
            .write_csv(file)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        info!("Data saved to {}", path.display());

        Ok(WriteSummary { path, rows_written: table.rows.len(), rows_dropped })
    }
}

impl Extend<WatchRecord> for ResultWriter {
    fn extend<T: IntoIterator<Item = WatchRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}
