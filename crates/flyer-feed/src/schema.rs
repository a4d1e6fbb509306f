//! Source schema detection and normalization.
//!
//! The feeds come from several scrapers and the shape of a record depends on
//! which scraper produced it. The variant is detected once per document from
//! the first object's keys and applied to the whole document, so a feed is
//! never interpreted under a mix of schemas.

use serde_json::{Map, Value};

use crate::record::Record;

/// The known feed schema variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// Comma-decimal price text (`current_price`/`previous_price`), a
    /// free-form `validity` phrase, and a unit price under `price_per_item`.
    Flyer,
    /// A single `price_text` field, a scalar `category`, and a
    /// `valid_from`/`valid_to` date window.
    PriceText,
    /// Numeric prices, an array of `categories`, and explicit
    /// `is_promotion`/`in_stock`/`is_new` flags.
    Listing,
}

/// Detects the schema variant of a feed document from its first object.
///
/// An empty document or one without a distinguishing key falls back to
/// [`SchemaVariant::Flyer`], the most common shape.
pub fn detect(values: &[Value]) -> SchemaVariant {
    let Some(first) = values.iter().find_map(Value::as_object) else {
        return SchemaVariant::Flyer;
    };

    if first.contains_key("price_text") {
        return SchemaVariant::PriceText;
    }
    if first.contains_key("is_promotion")
        || first.contains_key("in_stock")
        || first.get("categories").is_some_and(Value::is_array)
    {
        return SchemaVariant::Listing;
    }
    SchemaVariant::Flyer
}

/// Normalizes one feed element into a [`Record`] under the given variant.
///
/// Returns `None` for non-object elements, which the loader skips. Keys the
/// variant does not recognize are preserved in [`Record::extra`].
pub fn normalize(variant: SchemaVariant, value: Value) -> Option<Record> {
    let Value::Object(mut map) = value else {
        return None;
    };

    let record = match variant {
        SchemaVariant::Flyer => Record {
            name: take_string(&mut map, "name"),
            brand: take_string(&mut map, "brand"),
            store: take_string(&mut map, "store"),
            categories: take_string_list(&mut map, "category"),
            current_price: take_price(&mut map, "current_price"),
            previous_price: take_price(&mut map, "previous_price"),
            price_per_item: take_string(&mut map, "price_per_item"),
            validity: take_string(&mut map, "validity"),
            image_url: take_string(&mut map, "image_url"),
            extra: map,
            ..Record::default()
        },
        SchemaVariant::PriceText => Record {
            name: take_string(&mut map, "name"),
            brand: take_string(&mut map, "brand"),
            store: take_string(&mut map, "store"),
            categories: take_string_list(&mut map, "category"),
            current_price: take_price(&mut map, "price_text"),
            valid_from: take_string(&mut map, "valid_from"),
            valid_to: take_string(&mut map, "valid_to"),
            image_url: take_string(&mut map, "image"),
            extra: map,
            ..Record::default()
        },
        SchemaVariant::Listing => Record {
            name: take_string(&mut map, "name"),
            brand: take_string(&mut map, "brand"),
            store: take_string(&mut map, "store"),
            categories: take_string_list(&mut map, "categories"),
            current_price: take_price(&mut map, "current_price"),
            previous_price: take_price(&mut map, "previous_price"),
            on_promotion: take_bool(&mut map, "is_promotion"),
            available: take_bool(&mut map, "in_stock"),
            is_new: take_bool(&mut map, "is_new"),
            image_url: take_string(&mut map, "image_url"),
            extra: map,
            ..Record::default()
        },
    };

    Some(record)
}

/// Removes a string field. Empty strings and nulls normalize to `None`;
/// values of an unexpected type stay behind in the map.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => {
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        }
        Some(Value::Null) | None => None,
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
    }
}

/// Removes a price field, rendering numeric source values to text so every
/// variant stores prices in the same raw-text form.
fn take_price(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => {
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Null) | None => None,
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
    }
}

/// Removes a boolean field.
fn take_bool(map: &mut Map<String, Value>, key: &str) -> Option<bool> {
    match map.remove(key) {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Null) | None => None,
        Some(other) => {
            map.insert(key.to_string(), other);
            None
        }
    }
}

/// Removes a field that may be a scalar string or an array of strings,
/// normalizing both to a list.
fn take_string_list(map: &mut Map<String, Value>, key: &str) -> Vec<String> {
    match map.remove(key) {
        Some(Value::String(s)) => {
            if s.is_empty() {
                Vec::new()
            } else {
                vec![s]
            }
        }
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            map.insert(key.to_string(), other);
            Vec::new()
        }
    }
}
