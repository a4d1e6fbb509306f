//! Output formatting utilities for the fq CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules:
//!
//! - [`records`] - Product listing output (list command)
//! - [`facets`] - Facet listing output (brands, stores, categories)
//! - [`helpers`] - Common formatting utilities (truncation, prices)

mod facets;
pub mod helpers;
mod records;

pub use facets::{format_facet_json, format_facet_table};
pub use records::{format_records_json, format_records_table};
