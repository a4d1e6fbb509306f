//! Facet listing commands (brands, stores, categories).
//!
//! Each command loads the feed, extracts the distinct values of one field,
//! and prints them sorted for display.

use flyer_catalog_rs::Catalog;
use flyer_feed_rs::client::FeedClient;

use super::{CommandContext, Result};
use crate::output::{format_facet_json, format_facet_table};

/// The fields exposed as facet listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetField {
    Brand,
    Store,
    Category,
}

impl FacetField {
    /// The record field name the facet reads.
    pub fn key(self) -> &'static str {
        match self {
            FacetField::Brand => "brand",
            FacetField::Store => "store",
            FacetField::Category => "category",
        }
    }

    /// The heading shown above the listing.
    pub fn heading(self) -> &'static str {
        match self {
            FacetField::Brand => "Brands",
            FacetField::Store => "Stores",
            FacetField::Category => "Categories",
        }
    }
}

/// Executes a facet listing command.
///
/// # Errors
///
/// Returns an error if the feed cannot be loaded.
pub async fn execute(ctx: &CommandContext, field: FacetField, feed: &str) -> Result<()> {
    let mut catalog = Catalog::new(FeedClient::from_location(feed));

    if ctx.verbose {
        eprintln!("Loading feed from {feed}...");
    }

    let mut values: Vec<String> = catalog
        .distinct_values(field.key())
        .await?
        .into_iter()
        .collect();
    values.sort();

    if ctx.json_output {
        println!("{}", format_facet_json(field.key(), &values)?);
    } else if !ctx.quiet {
        print!("{}", format_facet_table(field.heading(), &values, ctx.use_colors));
    }

    Ok(())
}
