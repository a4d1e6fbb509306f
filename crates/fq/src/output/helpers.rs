//! Common helper functions for output formatting.

use flyer_feed_rs::record::Record;
use owo_colors::OwoColorize;

/// Truncates a string to a maximum number of characters.
///
/// Counts characters rather than bytes so accented product names never
/// split mid-codepoint.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a price for display.
///
/// Parseable prices render with two decimals; unparseable text passes
/// through as-is so the user sees what the feed carried.
pub fn format_price(raw: Option<&str>) -> String {
    let Some(text) = raw else {
        return String::new();
    };
    match flyer_feed_rs::record::parse_price_text(text) {
        Some(value) => format!("{value:.2}"),
        None => text.to_string(),
    }
}

/// Formats the promotion marker for a record.
pub fn format_promo(record: &Record, use_colors: bool) -> String {
    if !record.is_on_promotion() {
        return String::new();
    }
    if use_colors {
        "promo".green().to_string()
    } else {
        "promo".to_string()
    }
}

/// Formats the validity window of a record.
///
/// Prefers the free-form validity phrase; falls back to the ISO bounds.
pub fn format_validity(record: &Record) -> String {
    if let Some(ref validity) = record.validity {
        return validity.clone();
    }
    match (record.valid_from.as_deref(), record.valid_to.as_deref()) {
        (Some(from), Some(to)) => format!("{from} to {to}"),
        (Some(from), None) => format!("from {from}"),
        (None, Some(to)) => format!("until {to}"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("this is long", 10), "this is...");
    }

    #[test]
    fn test_truncate_str_counts_characters_not_bytes() {
        // 10 accented characters, well over 10 bytes
        assert_eq!(truncate_str("éééééééééé", 10), "éééééééééé");
        assert_eq!(truncate_str("ééééééééééé", 10), "ééééééé...");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Some("2,50")), "2.50");
        assert_eq!(format_price(Some("3.99")), "3.99");
        assert_eq!(format_price(Some("n/a")), "n/a");
        assert_eq!(format_price(None), "");
    }

    #[test]
    fn test_format_promo_without_colors() {
        let promoted = Record {
            current_price: Some("2,00".to_string()),
            previous_price: Some("3,00".to_string()),
            ..Record::default()
        };
        assert_eq!(format_promo(&promoted, false), "promo");

        let plain = Record::default();
        assert_eq!(format_promo(&plain, false), "");
    }

    #[test]
    fn test_format_validity() {
        let phrase = Record {
            validity: Some("du 3 au 9 janvier 2025".to_string()),
            ..Record::default()
        };
        assert_eq!(format_validity(&phrase), "du 3 au 9 janvier 2025");

        let bounds = Record {
            valid_from: Some("2025-01-03".to_string()),
            valid_to: Some("2025-01-09".to_string()),
            ..Record::default()
        };
        assert_eq!(format_validity(&bounds), "2025-01-03 to 2025-01-09");

        let open_ended = Record {
            valid_from: Some("2025-01-03".to_string()),
            ..Record::default()
        };
        assert_eq!(format_validity(&open_ended), "from 2025-01-03");

        assert_eq!(format_validity(&Record::default()), "");
    }
}
