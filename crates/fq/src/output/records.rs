//! Product listing output formatting.

use flyer_feed_rs::record::Record;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::helpers::{format_price, format_promo, format_validity, truncate_str};

/// JSON output structure for the list command.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub products: Vec<RecordOutput<'a>>,
    pub total: usize,
}

/// JSON output structure for a single product.
#[derive(Serialize)]
pub struct RecordOutput<'a> {
    pub name: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub store: Option<&'a str>,
    pub categories: &'a [String],
    pub current_price: Option<&'a str>,
    pub previous_price: Option<&'a str>,
    /// Parsed numeric current price, when the raw text is parseable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub on_promotion: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<&'a str>,
}

/// Formats products as JSON.
pub fn format_records_json(records: &[&Record]) -> Result<String, serde_json::Error> {
    let products: Vec<RecordOutput> = records
        .iter()
        .map(|record| RecordOutput {
            name: record.name.as_deref(),
            brand: record.brand.as_deref(),
            store: record.store.as_deref(),
            categories: &record.categories,
            current_price: record.current_price.as_deref(),
            previous_price: record.previous_price.as_deref(),
            price: record.current_price_value(),
            on_promotion: record.is_on_promotion(),
            validity: record.validity.as_deref(),
            valid_from: record.valid_from.as_deref(),
            valid_to: record.valid_to.as_deref(),
        })
        .collect();

    let output = ListOutput {
        total: products.len(),
        products,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats products as a table.
pub fn format_records_table(records: &[&Record], use_colors: bool) -> String {
    if records.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut output = String::new();

    // Header
    let header = format!(
        "{:<28} {:<14} {:<14} {:>8} {:>8} {:<6} {}",
        "Name", "Brand", "Store", "Price", "Was", "Promo", "Validity"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for record in records {
        let name = truncate_str(record.name.as_deref().unwrap_or(""), 28);
        let brand = truncate_str(record.brand.as_deref().unwrap_or(""), 14);
        let store = truncate_str(record.store.as_deref().unwrap_or(""), 14);
        let price = format_price(record.current_price.as_deref());
        let was = format_price(record.previous_price.as_deref());
        let promo = format_promo(record, use_colors);
        let validity = format_validity(record);

        let line = format!(
            "{:<28} {:<14} {:<14} {:>8} {:>8} {:<6} {}",
            name, brand, store, price, was, promo, validity
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
