//! Facet listing output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for a facet listing.
#[derive(Serialize)]
pub struct FacetOutput<'a> {
    pub field: &'a str,
    pub values: &'a [String],
    pub total: usize,
}

/// Formats a facet listing as JSON.
pub fn format_facet_json(field: &str, values: &[String]) -> Result<String, serde_json::Error> {
    let output = FacetOutput {
        field,
        values,
        total: values.len(),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats a facet listing as a table.
pub fn format_facet_table(heading: &str, values: &[String], use_colors: bool) -> String {
    if values.is_empty() {
        return format!("No {} found.\n", heading.to_lowercase());
    }

    let mut output = String::new();

    let header = format!("{} ({})", heading, values.len());
    if use_colors {
        output.push_str(&format!("{}\n", header.green().bold()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for value in values {
        output.push_str(&format!("  {value}\n"));
    }

    output
}
