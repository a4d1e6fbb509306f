//! List command implementation.
//!
//! Lists products from the loaded feed, filtered by various criteria.

use std::collections::HashSet;

use flyer_catalog_rs::{facet, sort_records, Catalog, FilterCriteria, SortKey};
use flyer_feed_rs::client::FeedClient;
use flyer_feed_rs::record::Record;

use super::{CommandContext, CommandError, Result};
use crate::cli::SortArg;
use crate::output::{format_records_json, format_records_table};

/// Options for the list command.
#[derive(Debug)]
pub struct ListOptions {
    /// Filter by product name (substring).
    pub name: Option<String>,
    /// Filter by brand (exact, case-insensitive).
    pub brand: Option<String>,
    /// Filter by store (exact, case-insensitive).
    pub store: Option<String>,
    /// Filter by category (exact, case-insensitive).
    pub category: Option<String>,
    /// Free-text search over every field.
    pub search: Option<String>,
    /// Minimum current price.
    pub min_price: Option<f64>,
    /// Maximum current price.
    pub max_price: Option<f64>,
    /// Filter by validity year.
    pub year: Option<String>,
    /// Promotion state filter (`--promo` / `--no-promo`).
    pub promotion: Option<bool>,
    /// Only products valid on this date.
    pub valid_on: Option<chrono::NaiveDate>,
    /// Sort order.
    pub sort: Option<SortArg>,
    /// Limit results.
    pub limit: u32,
    /// Show all results (no limit).
    pub all: bool,
    /// Stamp this store name onto records that lack one.
    pub store_label: Option<String>,
    /// Drop records without a price at load time.
    pub drop_unpriced: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            name: None,
            brand: None,
            store: None,
            category: None,
            search: None,
            min_price: None,
            max_price: None,
            year: None,
            promotion: None,
            valid_on: None,
            sort: None,
            limit: 50,
            all: false,
            store_label: None,
            drop_unpriced: false,
        }
    }
}

/// Executes the list command.
///
/// # Arguments
///
/// * `ctx` - Command context with output settings
/// * `opts` - List command options
/// * `feed` - Resolved feed location (URL, file, or directory)
///
/// # Errors
///
/// Returns an error if the feed cannot be loaded or if a `--brand` or
/// `--store` value matches nothing in the loaded feed.
pub async fn execute(ctx: &CommandContext, opts: &ListOptions, feed: &str) -> Result<()> {
    let mut client = FeedClient::from_location(feed);
    if let Some(label) = &opts.store_label {
        client = client.with_store_label(label.clone());
    }
    if opts.drop_unpriced {
        client = client.drop_unpriced();
    }

    let mut catalog = Catalog::new(client);

    if ctx.verbose {
        eprintln!("Loading feed from {feed}...");
    }
    catalog.ensure_loaded().await?;
    if ctx.verbose {
        eprintln!("Loaded {} records", catalog.records().len());
    }

    // Exact-match facet filters get a typed error instead of a silent
    // empty result when the value does not exist in the feed.
    if let Some(brand) = &opts.brand {
        let known = catalog.distinct_values("brand").await?;
        check_known("brand", brand, &known)?;
    }
    if let Some(store) = &opts.store {
        let known = catalog.distinct_values("store").await?;
        check_known("store", store, &known)?;
    }

    let criteria = criteria_from(opts);
    let records = catalog.filter(&criteria).await?;
    let records = sort_records(records, opts.sort.map(SortKey::from).unwrap_or_default());
    let records = apply_limit(records, opts);

    if ctx.json_output {
        println!("{}", format_records_json(&records)?);
    } else if !ctx.quiet {
        print!("{}", format_records_table(&records, ctx.use_colors));
    }

    Ok(())
}

/// Builds the filter criteria from the command options.
fn criteria_from(opts: &ListOptions) -> FilterCriteria {
    FilterCriteria {
        name: opts.name.clone(),
        brand: opts.brand.clone(),
        store: opts.store.clone(),
        category: opts.category.clone(),
        query: opts.search.clone(),
        min_price: opts.min_price,
        max_price: opts.max_price,
        year: opts.year.clone(),
        promotion: opts.promotion,
        valid_on: opts.valid_on,
    }
}

/// Checks that `wanted` names a known facet value, ignoring case.
fn check_known(field: &'static str, wanted: &str, known: &HashSet<String>) -> Result<()> {
    let wanted_lower = wanted.to_lowercase();
    if known.iter().any(|v| v.to_lowercase() == wanted_lower) {
        return Ok(());
    }
    Err(CommandError::UnknownFacetValue {
        field,
        value: wanted.to_string(),
        suggestion: facet::suggest(wanted, known.iter().map(String::as_str)),
    })
}

/// Applies the limit to the records.
fn apply_limit<'a>(records: Vec<&'a Record>, opts: &ListOptions) -> Vec<&'a Record> {
    if opts.all {
        records
    } else {
        records.into_iter().take(opts.limit as usize).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_options_defaults() {
        let opts = ListOptions::default();
        assert!(!opts.all);
        assert_eq!(opts.limit, 50);
        assert!(opts.promotion.is_none());
        assert!(criteria_from(&opts).is_empty());
    }

    #[test]
    fn test_criteria_from_maps_every_filter() {
        let opts = ListOptions {
            name: Some("milk".to_string()),
            brand: Some("Lactel".to_string()),
            min_price: Some(1.0),
            max_price: Some(3.0),
            promotion: Some(true),
            ..ListOptions::default()
        };

        let criteria = criteria_from(&opts);
        assert_eq!(criteria.name.as_deref(), Some("milk"));
        assert_eq!(criteria.brand.as_deref(), Some("Lactel"));
        assert_eq!(criteria.min_price, Some(1.0));
        assert_eq!(criteria.max_price, Some(3.0));
        assert_eq!(criteria.promotion, Some(true));
    }

    #[test]
    fn test_check_known_accepts_case_insensitive_match() {
        let known: HashSet<String> = ["Lactel".to_string()].into_iter().collect();
        assert!(check_known("brand", "lactel", &known).is_ok());
    }

    #[test]
    fn test_check_known_suggests_close_value() {
        let known: HashSet<String> = ["Lactel".to_string(), "Coca-Cola".to_string()]
            .into_iter()
            .collect();

        let err = check_known("brand", "Lactol", &known).unwrap_err();
        match err {
            CommandError::UnknownFacetValue {
                field,
                value,
                suggestion,
            } => {
                assert_eq!(field, "brand");
                assert_eq!(value, "Lactol");
                assert_eq!(suggestion.as_deref(), Some("Lactel"));
            }
            other => panic!("expected UnknownFacetValue, got {other:?}"),
        }
    }

    #[test]
    fn test_check_known_no_suggestion_for_distant_value() {
        let known: HashSet<String> = ["Lactel".to_string()].into_iter().collect();

        let err = check_known("store", "Warehouse", &known).unwrap_err();
        match err {
            CommandError::UnknownFacetValue { suggestion, .. } => {
                assert!(suggestion.is_none());
            }
            other => panic!("expected UnknownFacetValue, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_limit() {
        let records: Vec<Record> = (0..5)
            .map(|i| Record {
                name: Some(format!("Product {i}")),
                ..Record::default()
            })
            .collect();
        let refs: Vec<&Record> = records.iter().collect();

        let opts = ListOptions {
            limit: 2,
            ..ListOptions::default()
        };
        assert_eq!(apply_limit(refs.clone(), &opts).len(), 2);

        let opts = ListOptions {
            limit: 2,
            all: true,
            ..ListOptions::default()
        };
        assert_eq!(apply_limit(refs, &opts).len(), 5);
    }
}
