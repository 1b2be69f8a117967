//! CSS selectors for watchfinder.com HTML parsing.
//!
//! Every selector the scraper depends on lives here. Update this file
//! when the site changes its markup, and add a fixture that reproduces it.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for collection listing pages.
pub mod listing {
    use super::*;

    /// Any anchor carrying an href.
    pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
}

/// Selectors for product detail pages.
pub mod detail {
    use super::*;

    /// Model name in the document metadata.
    pub static MODEL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("meta[itemprop='model']").unwrap());

    /// Manufacturer part number, i.e. the reference code.
    pub static REFERENCE_CODE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("meta[itemprop='mpn']").unwrap());

    /// Attribute holding the metadata value.
    pub static META_CONTENT_ATTR: &str = "content";

    /// Regular price. Matches the exact class string so the discounted
    /// variant (which carries an extra class) is not picked up here.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span[class='h2 bold reduced-padding']").unwrap());

    /// Price shown when the watch is on offer.
    pub static DISCOUNTED_PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse("span[class='h2 bold reduced-padding with-saving']").unwrap()
    });

    /// Specification table.
    pub static SPEC_TABLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div#specification-content table").unwrap());

    /// Rows of the specification table.
    pub static SPEC_ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Cells of a specification row.
    pub static SPEC_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
}
