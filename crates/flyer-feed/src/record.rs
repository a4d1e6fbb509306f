//! Canonical product record model.
//!
//! Every source schema variant is normalized into [`Record`]. All fields are
//! optional because scraped flyer data is ragged; a missing field is never an
//! error, it just means the record cannot match constraints on that field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single product entry from a flyer feed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Brand name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Store the flyer was scraped from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    /// Product categories. Scalar `category` source fields normalize to a
    /// single-element list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Current price as raw text (locale variants use `,` as the decimal
    /// separator and may carry a currency sign).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<String>,

    /// Previous price as raw text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<String>,

    /// Unit price text (e.g. per kilo).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_item: Option<String>,

    /// Free-form validity phrase. Its trailing token is a year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<String>,

    /// Start of the validity window as an ISO-like date string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,

    /// End of the validity window as an ISO-like date string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<String>,

    /// Explicit promotion flag, where the source schema provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_promotion: Option<bool>,

    /// Availability flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,

    /// New-product flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,

    /// Product image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Unrecognized source fields, kept so free-text search covers every
    /// field the feed carried.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Parses scraped price text into a numeric value.
///
/// Accepts `,` as a decimal separator, strips a leading currency sign and
/// whitespace, and takes the leading numeric prefix of what remains, so
/// `"2,99 €/kg"` parses as `2.99`. Returns `None` when no leading number
/// exists.
pub fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned = text.trim().trim_start_matches(['$', '€']).trim_start();
    let cleaned = cleaned.replace(',', ".");
    let bytes = cleaned.as_bytes();

    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    cleaned[..end].parse().ok()
}

impl Record {
    /// Returns the parsed current price, or `None` if absent or unparseable.
    pub fn current_price_value(&self) -> Option<f64> {
        self.current_price.as_deref().and_then(parse_price_text)
    }

    /// Returns the parsed previous price, or `None` if absent or unparseable.
    pub fn previous_price_value(&self) -> Option<f64> {
        self.previous_price.as_deref().and_then(parse_price_text)
    }

    /// Returns whether this record is on promotion.
    ///
    /// The explicit `on_promotion` flag wins when the source provided one.
    /// Otherwise the state is derived from the prices: a previous price
    /// strictly above the current price means a markdown. When either price
    /// is missing or unparseable the record is not considered on promotion.
    pub fn is_on_promotion(&self) -> bool {
        if let Some(flag) = self.on_promotion {
            return flag;
        }
        match (self.previous_price_value(), self.current_price_value()) {
            (Some(prev), Some(curr)) => prev > curr,
            _ => false,
        }
    }

    /// Returns whether this record is valid in the given year.
    ///
    /// A record matches when the trailing whitespace-delimited token of its
    /// `validity` phrase equals `year`, or when `valid_from` starts with it.
    pub fn matches_year(&self, year: &str) -> bool {
        let validity_match = self
            .validity
            .as_deref()
            .and_then(|v| v.split_whitespace().last())
            .is_some_and(|token| token == year);
        let valid_from_match = self
            .valid_from
            .as_deref()
            .is_some_and(|from| from.starts_with(year));
        validity_match || valid_from_match
    }

    /// Returns the string form(s) of a named field.
    ///
    /// Scalar fields yield at most one element, array-valued fields yield
    /// every element, absent fields yield nothing. Unrecognized names are
    /// looked up in `extra`.
    pub fn field_values(&self, field: &str) -> Vec<String> {
        match field {
            "name" => self.name.iter().cloned().collect(),
            "brand" => self.brand.iter().cloned().collect(),
            "store" => self.store.iter().cloned().collect(),
            "category" | "categories" => self.categories.clone(),
            "current_price" => self.current_price.iter().cloned().collect(),
            "previous_price" => self.previous_price.iter().cloned().collect(),
            "price_per_item" => self.price_per_item.iter().cloned().collect(),
            "validity" => self.validity.iter().cloned().collect(),
            "valid_from" => self.valid_from.iter().cloned().collect(),
            "valid_to" => self.valid_to.iter().cloned().collect(),
            "on_promotion" => self.on_promotion.iter().map(|b| b.to_string()).collect(),
            "available" => self.available.iter().map(|b| b.to_string()).collect(),
            "is_new" => self.is_new.iter().map(|b| b.to_string()).collect(),
            "image_url" => self.image_url.iter().cloned().collect(),
            _ => {
                let mut values = Vec::new();
                if let Some(value) = self.extra.get(field) {
                    collect_value_strings(value, &mut values);
                }
                values
            }
        }
    }

    /// Returns a case-folded serialization of the whole record, for
    /// free-text search across every field.
    pub fn full_text(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Collects the string forms of a JSON value, descending into arrays.
fn collect_value_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Array(items) => {
            for item in items {
                collect_value_strings(item, out);
            }
        }
        Value::Null | Value::Object(_) => {}
    }
}
