//! HTML parser for listing and detail pages.

use crate::watchfinder::models::{DetailLink, RawRecord, Specifications, NOT_AVAILABLE};
use crate::watchfinder::selectors::{detail, listing};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

/// One way of pulling a field out of a parsed page.
pub type Strategy = fn(&Html) -> Option<String>;

/// Price lookups in order of preference.
pub const PRICE_STRATEGIES: &[Strategy] = &[regular_price, discounted_price];

/// Returns the first value produced by `strategies`, in order.
pub fn first_match(document: &Html, strategies: &[Strategy]) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy(document))
}

/// Extracts every href containing `marker`, as written in the page.
///
/// Duplicates are kept; the collector deduplicates across pages.
pub fn extract_item_links(html: &str, marker: &str) -> Vec<DetailLink> {
    let document = Html::parse_document(html);

    let links: Vec<DetailLink> = document
        .select(&listing::LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(marker))
        .map(DetailLink::new)
        .collect();

    trace!("Found {} item links", links.len());
    links
}

/// Parses a detail page into a raw record. Missing parts become "N/A".
pub fn parse_detail_page(html: &str) -> RawRecord {
    let document = Html::parse_document(html);

    let model = meta_content(&document, &detail::MODEL).unwrap_or_else(not_available);
    let reference_code =
        meta_content(&document, &detail::REFERENCE_CODE).unwrap_or_else(not_available);
    let price = first_match(&document, PRICE_STRATEGIES).unwrap_or_else(not_available);
    let specifications = parse_specifications(&document);

    debug!(
        "Parsed detail page: model={}, reference={}, price={}, {} specs",
        model,
        reference_code,
        price,
        specifications.len()
    );

    RawRecord { model, reference_code, price, specifications }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|e| e.value().attr(detail::META_CONTENT_ATTR))
        .map(String::from)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn regular_price(document: &Html) -> Option<String> {
    document.select(&detail::PRICE).next().map(element_text)
}

fn discounted_price(document: &Html) -> Option<String> {
    document.select(&detail::DISCOUNTED_PRICE).next().map(element_text)
}

/// Reads two-cell rows of the specification table as label/value pairs.
fn parse_specifications(document: &Html) -> Specifications {
    let mut specifications = Specifications::new();

    let Some(table) = document.select(&detail::SPEC_TABLE).next() else {
        trace!("No specification table");
        return specifications;
    };

    for row in table.select(&detail::SPEC_ROW) {
        let cells: Vec<ElementRef> = row.select(&detail::SPEC_CELL).collect();
        if cells.len() != 2 {
            continue;
        }

        let label = element_text(cells[0]).trim_end_matches(':').trim_end().to_string();
        let value = element_text(cells[1]);
        specifications.insert(label, value);
    }

    specifications
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_html(head: &str, body: &str) -> String {
        format!("<html><head>{}</head><body>{}</body></html>", head, body)
    }

    #[test]
    fn test_extract_item_links() {
        let html = r#"
            <html><body>
                <a href="/Tag%20Heuer/Carrera/item/111">One</a>
                <a href="/Tag%20Heuer/Carrera/item/111">One again</a>
                <a href="/Tag%20Heuer/Carrera/item/222">Two</a>
                <a href="/Tag%20Heuer/Carrera/watches?pageno=2">Next</a>
            </body></html>
        "#;

        let links = extract_item_links(html, "/item/");
        assert_eq!(links.len(), 3);
        assert_eq!(links[0].as_str(), "/Tag%20Heuer/Carrera/item/111");
        assert!(links.iter().all(|l| l.as_str().contains("/item/")));
    }

    #[test]
    fn test_extract_item_links_empty_page() {
        assert!(extract_item_links("<html><body></body></html>", "/item/").is_empty());
        assert!(extract_item_links("", "/item/").is_empty());
    }

    #[test]
    fn test_parse_detail_page_full() {
        let html = detail_html(
            r#"<meta itemprop="model" content="Carrera"><meta itemprop="mpn" content="CAR2A1Z">"#,
            r#"
                <span class="h2 bold reduced-padding">$5,200</span>
                <div id="specification-content">
                    <table>
                        <tr><td>Case size:</td><td>43 MM</td></tr>
                        <tr><td>Movement:</td><td>Automatic</td></tr>
                        <tr><th colspan="2">Heading row</th></tr>
                        <tr><td>a</td><td>b</td><td>c</td></tr>
                    </table>
                </div>
            "#,
        );

        let raw = parse_detail_page(&html);
        assert_eq!(raw.model, "Carrera");
        assert_eq!(raw.reference_code, "CAR2A1Z");
        assert_eq!(raw.price, "$5,200");
        assert_eq!(raw.specifications.len(), 2);
        assert_eq!(raw.specifications["Case size"], "43 MM");
        assert_eq!(raw.specifications["Movement"], "Automatic");
    }

    #[test]
    fn test_parse_detail_page_empty_document() {
        let raw = parse_detail_page("<html></html>");
        assert_eq!(raw, RawRecord::default());
    }

    #[test]
    fn test_parse_detail_page_meta_without_content() {
        let html = detail_html(r#"<meta itemprop="model">"#, "");
        assert_eq!(parse_detail_page(&html).model, "N/A");
    }

    #[test]
    fn test_price_falls_back_to_discount() {
        let html = detail_html(
            "",
            r#"<span class="h2 bold reduced-padding with-saving">$4,100</span>"#,
        );
        assert_eq!(parse_detail_page(&html).price, "$4,100");
    }

    #[test]
    fn test_regular_price_preferred_over_discount() {
        let html = detail_html(
            "",
            r#"
                <span class="h2 bold reduced-padding with-saving">$4,100</span>
                <span class="h2 bold reduced-padding">$5,000</span>
            "#,
        );
        assert_eq!(parse_detail_page(&html).price, "$5,000");
    }

    #[test]
    fn test_first_match_exhausted() {
        let document = Html::parse_document("<html><body><span>$10</span></body></html>");
        assert_eq!(first_match(&document, PRICE_STRATEGIES), None);
        assert_eq!(first_match(&document, &[]), None);
    }

    #[test]
    fn test_spec_table_outside_container_ignored() {
        let html = detail_html("", "<table><tr><td>Case:</td><td>Steel</td></tr></table>");
        assert!(parse_detail_page(&html).specifications.is_empty());
    }

    #[test]
    fn test_spec_label_only_trailing_colon_stripped() {
        let html = detail_html(
            "",
            r#"<div id="specification-content"><table>
                <tr><td>Power reserve (h): </td><td>80</td></tr>
            </table></div>"#,
        );
        let raw = parse_detail_page(&html);
        assert_eq!(raw.specifications["Power reserve (h)"], "80");
    }

    #[test]
    fn test_spec_duplicate_label_keeps_last_value() {
        let html = detail_html(
            "",
            r#"<div id="specification-content"><table>
                <tr><td>Box:</td><td>No</td></tr>
                <tr><td>Papers:</td><td>Yes</td></tr>
                <tr><td>Box:</td><td>Yes</td></tr>
            </table></div>"#,
        );
        let raw = parse_detail_page(&html);
        assert_eq!(raw.specifications.len(), 2);
        assert_eq!(raw.specifications.get_index(0), Some((&"Box".to_string(), &"Yes".to_string())));
    }
}
