//! Data models for listing pages, detail links, and watch records.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Placeholder for any field the page did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column names of the fixed leading fields, in output order.
pub const URL_FIELD: &str = "URL";
pub const MODEL_FIELD: &str = "Model";
pub const REFERENCE_CODE_FIELD: &str = "Reference Code";
pub const PRICE_FIELD: &str = "Price";

/// One page of one collection's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub collection: String,
    /// 1-based page number
    pub page: u32,
}

impl ListingPage {
    pub fn new(collection: impl Into<String>, page: u32) -> Self {
        Self { collection: collection.into(), page }
    }
}

impl fmt::Display for ListingPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} page {}", self.collection, self.page)
    }
}

/// Site-relative path of one product detail page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DetailLink(String);

impl DetailLink {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the link against the site root. Absolute links pass through;
    /// protocol-relative links take the base URL's scheme.
    pub fn to_url(&self, base_url: &str) -> String {
        let link = self.0.as_str();
        if link.starts_with("http://") || link.starts_with("https://") {
            return link.to_string();
        }

        if let Some(rest) = link.strip_prefix("//") {
            let scheme = base_url.split_once("://").map_or("https", |(scheme, _)| scheme);
            return format!("{}://{}", scheme, rest);
        }

        format!("{}/{}", base_url.trim_end_matches('/'), link.trim_start_matches('/'))
    }
}

impl fmt::Display for DetailLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated detail links. Iteration order carries no meaning.
pub type LinkSet = HashSet<DetailLink>;

/// Ordered label -> value pairs from a detail page's specification table.
pub type Specifications = IndexMap<String, String>;

/// Outcome counts for one collection sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Listing pages requested
    pub pages_visited: usize,
    /// Pages that failed to render
    pub pages_failed: usize,
    /// Pages that rendered but held no product links
    pub pages_empty: usize,
    /// Links found before deduplication
    pub raw_links: usize,
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages visited, {} failed, {} empty, {} links before dedup",
            self.pages_visited, self.pages_failed, self.pages_empty, self.raw_links
        )
    }
}

/// Links gathered by a sweep together with its report.
#[derive(Debug, Clone, Default)]
pub struct CollectedLinks {
    pub links: LinkSet,
    pub report: SweepReport,
}

/// Fields as scraped from a detail page, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub model: String,
    pub reference_code: String,
    pub price: String,
    pub specifications: Specifications,
}

impl Default for RawRecord {
    fn default() -> Self {
        Self {
            model: NOT_AVAILABLE.to_string(),
            reference_code: NOT_AVAILABLE.to_string(),
            price: NOT_AVAILABLE.to_string(),
            specifications: Specifications::new(),
        }
    }
}

/// A normalized watch record ready for the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchRecord {
    pub url: String,
    pub model: String,
    pub reference_code: String,
    /// Digits only, or "N/A"
    pub price: String,
    pub specifications: Specifications,
}

impl WatchRecord {
    /// Record for a page that could not be fetched. Never survives the writer.
    pub fn unavailable(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model: NOT_AVAILABLE.to_string(),
            reference_code: NOT_AVAILABLE.to_string(),
            price: NOT_AVAILABLE.to_string(),
            specifications: Specifications::new(),
        }
    }

    /// True when the price resolved to a number.
    pub fn has_price(&self) -> bool {
        self.price != NOT_AVAILABLE
    }

    /// Flattens into one row: the four base fields first, then every
    /// specification label. A label that repeats a base field name
    /// replaces that field's value in place.
    pub fn flatten(&self) -> IndexMap<String, String> {
        let mut row = IndexMap::with_capacity(4 + self.specifications.len());
        row.insert(URL_FIELD.to_string(), self.url.clone());
        row.insert(MODEL_FIELD.to_string(), self.model.clone());
        row.insert(REFERENCE_CODE_FIELD.to_string(), self.reference_code.clone());
        row.insert(PRICE_FIELD.to_string(), self.price.clone());

        for (label, value) in &self.specifications {
            row.insert(label.clone(), value.clone());
        }

        row
    }
}
