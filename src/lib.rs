//! watchfinder-scraper - Watch listing scraper for watchfinder.com
//!
//! Renders collection listing pages in a headless browser to discover
//! product links, fetches each product page over plain HTTP, and writes
//! one CSV row per watch.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod watchfinder;

pub use config::Config;
pub use error::ScrapeError;
pub use pipeline::{LinkCollector, RecordExtractor, ResultWriter};
pub use watchfinder::{DetailLink, WatchRecord};
