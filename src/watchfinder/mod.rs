//! watchfinder.com-specific modules for fetching, parsing, and data models.

pub mod browser;
pub mod client;
pub mod models;
pub mod normalize;
pub mod parser;
pub mod selectors;

pub use browser::{BrowserSession, ListingSession};
pub use client::{DetailClient, DetailFetch};
pub use models::{
    CollectedLinks, DetailLink, LinkSet, ListingPage, RawRecord, SweepReport, WatchRecord,
};
