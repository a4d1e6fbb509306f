//! Pure filter functions over loaded records.
//!
//! Every function here is re-entrant, takes the records as a slice, and
//! returns matching references in their original order. String comparison is
//! case-insensitive throughout. Records missing a constrained field simply
//! do not match; a malformed value in one record never fails the whole scan.

use chrono::NaiveDate;
use flyer_feed_rs::record::Record;

/// A transient set of filter constraints, combined with AND.
///
/// Build one per query invocation; it is never persisted. Unset fields are
/// unconstrained.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Substring match against the product name.
    pub name: Option<String>,
    /// Exact (case-insensitive) brand match.
    pub brand: Option<String>,
    /// Exact (case-insensitive) store match.
    pub store: Option<String>,
    /// Exact (case-insensitive) match against any category element.
    pub category: Option<String>,
    /// Free-text match across every field.
    pub query: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    pub max_price: Option<f64>,
    /// Validity year.
    pub year: Option<String>,
    /// Promotion state to require.
    pub promotion: Option<bool>,
    /// Date that must fall inside the validity window.
    pub valid_on: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Returns true if no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand.is_none()
            && self.store.is_none()
            && self.category.is_none()
            && self.query.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.year.is_none()
            && self.promotion.is_none()
            && self.valid_on.is_none()
    }
}

/// Keeps records whose named field contains `value`, ignoring case.
///
/// Array-valued fields match if any element does. Records without the field
/// do not match.
pub fn filter_by_field<'a>(records: &'a [Record], field: &str, value: &str) -> Vec<&'a Record> {
    let needle = value.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .field_values(field)
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Keeps records valid in the given year.
pub fn filter_by_year<'a>(records: &'a [Record], year: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| record.matches_year(year))
        .collect()
}

/// Keeps records whose parsed current price lies in `[min, max]`.
///
/// Records with a missing or unparseable price are excluded.
pub fn filter_by_price_range<'a>(records: &'a [Record], min: f64, max: f64) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| {
            record
                .current_price_value()
                .is_some_and(|price| price >= min && price <= max)
        })
        .collect()
}

/// Keeps records whose promotion state equals `wanted`.
pub fn filter_by_promotion<'a>(records: &'a [Record], wanted: bool) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| record.is_on_promotion() == wanted)
        .collect()
}

/// Keeps records whose validity window contains `date`.
///
/// A missing or unparseable bound is unconstrained on that side; records
/// with no parseable bound at all do not match.
pub fn filter_by_valid_on<'a>(records: &'a [Record], date: NaiveDate) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| valid_on(record, date))
        .collect()
}

/// Keeps records whose full text contains `query`, ignoring case.
pub fn search<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.full_text().contains(&needle))
        .collect()
}

/// Applies every set constraint of `criteria`, ANDed together.
pub fn apply<'a>(records: &'a [Record], criteria: &FilterCriteria) -> Vec<&'a Record> {
    let mut matches: Vec<&Record> = records.iter().collect();

    if let Some(name) = &criteria.name {
        let needle = name.to_lowercase();
        matches.retain(|r| {
            r.name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
        });
    }

    if let Some(brand) = &criteria.brand {
        let brand_lower = brand.to_lowercase();
        matches.retain(|r| {
            r.brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase() == brand_lower)
        });
    }

    if let Some(store) = &criteria.store {
        let store_lower = store.to_lowercase();
        matches.retain(|r| {
            r.store
                .as_deref()
                .is_some_and(|s| s.to_lowercase() == store_lower)
        });
    }

    if let Some(category) = &criteria.category {
        let category_lower = category.to_lowercase();
        matches.retain(|r| {
            r.categories
                .iter()
                .any(|c| c.to_lowercase() == category_lower)
        });
    }

    if let Some(query) = &criteria.query {
        let needle = query.to_lowercase();
        matches.retain(|r| r.full_text().contains(&needle));
    }

    if criteria.min_price.is_some() || criteria.max_price.is_some() {
        let min = criteria.min_price.unwrap_or(f64::MIN);
        let max = criteria.max_price.unwrap_or(f64::MAX);
        matches.retain(|r| {
            r.current_price_value()
                .is_some_and(|price| price >= min && price <= max)
        });
    }

    if let Some(year) = &criteria.year {
        matches.retain(|r| r.matches_year(year));
    }

    if let Some(wanted) = criteria.promotion {
        matches.retain(|r| r.is_on_promotion() == wanted);
    }

    if let Some(date) = criteria.valid_on {
        matches.retain(|r| valid_on(r, date));
    }

    matches
}

/// Returns whether `date` falls inside the record's validity window.
fn valid_on(record: &Record, date: NaiveDate) -> bool {
    let from = record.valid_from.as_deref().and_then(parse_date);
    let to = record.valid_to.as_deref().and_then(parse_date);
    match (from, to) {
        (None, None) => false,
        (Some(from), None) => from <= date,
        (None, Some(to)) => date <= to,
        (Some(from), Some(to)) => from <= date && date <= to,
    }
}

/// Parses an ISO-like date string, tolerating a trailing time component.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
