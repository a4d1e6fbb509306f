//! Sort comparators for query results.
//!
//! Sorting produces a new ordering over borrowed records and never touches
//! the underlying dataset. All sorts are stable, so records that compare
//! equal keep their original relative order.

use std::cmp::Ordering;

use flyer_feed_rs::record::Record;
use unicode_normalization::UnicodeNormalization;

/// The supported sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Name A to Z.
    NameAsc,
    /// Name Z to A.
    NameDesc,
    /// Keep the input order.
    #[default]
    None,
}

/// Sorts the given records by the given key.
///
/// Price sorts compare the parsed current price; records with a missing or
/// unparseable price order last in both directions. Name sorts compare
/// normalized keys (see [`name_sort_key`]); records without a name order
/// last in both directions. [`SortKey::None`] returns the input unchanged.
pub fn sort_records(mut records: Vec<&Record>, key: SortKey) -> Vec<&Record> {
    match key {
        SortKey::PriceAsc => records.sort_by(|a, b| compare_prices(a, b, true)),
        SortKey::PriceDesc => records.sort_by(|a, b| compare_prices(a, b, false)),
        SortKey::NameAsc => records.sort_by(|a, b| compare_names(a, b, true)),
        SortKey::NameDesc => records.sort_by(|a, b| compare_names(a, b, false)),
        SortKey::None => {}
    }
    records
}

/// Builds the normalized sort key for a product name.
///
/// NFD decomposition followed by lowercasing and whitespace collapsing, so
/// accented and oddly spaced names order next to their plain forms.
pub fn name_sort_key(name: &str) -> String {
    let decomposed: String = name.nfd().collect();
    decomposed
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn compare_prices(a: &Record, b: &Record, ascending: bool) -> Ordering {
    match (a.current_price_value(), b.current_price_value()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_price), Some(b_price)) => {
            let ord = a_price.partial_cmp(&b_price).unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}

fn compare_names(a: &Record, b: &Record, ascending: bool) -> Ordering {
    match (a.name.as_deref(), b.name.as_deref()) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_name), Some(b_name)) => {
            // Raw name breaks ties between names that normalize identically
            let ord = name_sort_key(a_name)
                .cmp(&name_sort_key(b_name))
                .then_with(|| a_name.cmp(b_name));
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}
