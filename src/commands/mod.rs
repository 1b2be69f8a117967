//! CLI command implementations.

pub mod extract;
pub mod links;
pub mod scrape;

pub use extract::ExtractCommand;
pub use links::LinksCommand;
pub use scrape::{ScrapeCommand, ScrapeOutcome};
