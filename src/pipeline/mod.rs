//! The scrape pipeline: link collection, record extraction, result writing.

pub mod collector;
pub mod extractor;
pub mod writer;

pub use collector::LinkCollector;
pub use extractor::RecordExtractor;
pub use writer::{ResultTable, ResultWriter, WriteSummary};
