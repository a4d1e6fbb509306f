//! Facet extraction for populating filter choices.

use std::collections::HashSet;

use flyer_feed_rs::record::Record;
use strsim::levenshtein;

/// Maximum Levenshtein distance to consider a value as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Collects every distinct non-empty value of the named field.
///
/// Array-valued fields contribute each element. One scan over the dataset;
/// the result carries no ordering guarantee, callers sort for presentation.
pub fn distinct_values(records: &[Record], field: &str) -> HashSet<String> {
    let mut values = HashSet::new();
    for record in records {
        for value in record.field_values(field) {
            if !value.is_empty() {
                values.insert(value);
            }
        }
    }
    values
}

/// Finds the best matching value from a list of candidates using Levenshtein
/// distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`. Exact matches are not suggestions.
pub fn suggest<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .into_iter()
        .filter(|value| !value.is_empty())
        .map(|value| {
            let distance = levenshtein(&query_lower, &value.to_lowercase());
            (value.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}
