//! Text cleanup applied to every scraped field.

use crate::watchfinder::models::{RawRecord, WatchRecord, NOT_AVAILABLE};
use regex::Regex;
use std::sync::LazyLock;

static MM_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bMM\b").unwrap());

static METRES_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bmetres\b").unwrap());

/// Cleans one text value.
///
/// Line breaks are dropped first, then the unit tokens `MM` and `metres`
/// are rewritten as whole words, then whitespace runs collapse to a single
/// space and the ends are trimmed. Running it twice gives the same result.
pub fn clean_text(text: &str) -> String {
    let text: String = text.chars().filter(|c| *c != '\r' && *c != '\n').collect();
    let text = MM_TOKEN.replace_all(&text, "mm");
    let text = METRES_TOKEN.replace_all(&text, "m");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans a price, dropping `$` and thousands separators.
///
/// Returns "N/A" when nothing numeric is left.
pub fn clean_price(text: &str) -> String {
    let cleaned: String = clean_text(text).chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();

    if cleaned.chars().any(|c| c.is_ascii_digit()) {
        cleaned.to_string()
    } else {
        NOT_AVAILABLE.to_string()
    }
}

impl RawRecord {
    /// Normalizes every field and label, attaching the page URL.
    pub fn normalize(self, url: impl Into<String>) -> WatchRecord {
        let specifications = self
            .specifications
            .iter()
            .map(|(label, value)| (clean_text(label), clean_text(value)))
            .collect();

        WatchRecord {
            url: url.into(),
            model: clean_text(&self.model),
            reference_code: clean_text(&self.reference_code),
            price: clean_price(&self.price),
            specifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchfinder::models::Specifications;

    #[test]
    fn test_mm_token_lowercased() {
        assert_eq!(clean_text("41 MM case"), "41 mm case");
        assert_eq!(clean_text("41MM"), "41MM");
    }

    #[test]
    fn test_mm_inside_word_untouched() {
        assert_eq!(clean_text("COMMENT"), "COMMENT");
        assert_eq!(clean_text("MMX"), "MMX");
    }

    #[test]
    fn test_tokens_next_to_accented_letters_untouched() {
        assert_eq!(clean_text("ÉMM"), "ÉMM");
        assert_eq!(clean_text("MMé"), "MMé");
        assert_eq!(clean_text("émetres"), "émetres");
        assert_eq!(clean_text("Été MM"), "Été mm");
    }

    #[test]
    fn test_metres_shortened() {
        assert_eq!(clean_text("100 metres"), "100 m");
        assert_eq!(clean_text("200 metres / 660 feet"), "200 m / 660 feet");
        assert_eq!(clean_text("kilometres"), "kilometres");
        assert_eq!(clean_text("Metres"), "Metres");
    }

    #[test]
    fn test_line_breaks_removed() {
        assert_eq!(clean_text("Stainless\r\nsteel"), "Stainlesssteel");
        assert_eq!(clean_text("Stainless \r\n steel"), "Stainless steel");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(clean_text("   Carrera \t  Calibre   16  "), "Carrera Calibre 16");
        assert_eq!(clean_text("Sapphire\u{a0}\u{a0}crystal"), "Sapphire crystal");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_clean_text_idempotent() {
        let samples = [
            "  41 MM case\r\n with 100 metres  ",
            "M\nM",
            "COMMENT\tMM metres",
            "Automatic,\r\n   calibre 5",
            "N/A",
        ];

        for sample in samples {
            let once = clean_text(sample);
            assert_eq!(clean_text(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_clean_price() {
        assert_eq!(clean_price("$12,345"), "12345");
        assert_eq!(clean_price("  $5,200 \n"), "5200");
        assert_eq!(clean_price("$999"), "999");
    }

    #[test]
    fn test_clean_price_not_available() {
        assert_eq!(clean_price("N/A"), "N/A");
        assert_eq!(clean_price(""), "N/A");
        assert_eq!(clean_price("$"), "N/A");
        assert_eq!(clean_price("Price on request"), "N/A");
    }

    #[test]
    fn test_normalize_record() {
        let mut specifications = Specifications::new();
        specifications.insert(" Case size ".to_string(), "41 MM".to_string());
        specifications.insert("Water resistance".to_string(), "100 metres\r\n".to_string());

        let raw = RawRecord {
            model: "  Carrera\n".to_string(),
            reference_code: "CAR2A1Z".to_string(),
            price: "$5,200".to_string(),
            specifications,
        };

        let record = raw.normalize("https://www.watchfinder.com/item/1");
        assert_eq!(record.url, "https://www.watchfinder.com/item/1");
        assert_eq!(record.model, "Carrera");
        assert_eq!(record.reference_code, "CAR2A1Z");
        assert_eq!(record.price, "5200");
        assert_eq!(record.specifications["Case size"], "41 mm");
        assert_eq!(record.specifications["Water resistance"], "100 m");
    }
}
