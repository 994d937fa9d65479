//! Free-text lookup over a catalog.

use crate::types::entity::TextSearchable;

/// Returns the entities whose text fields contain `query`, ignoring case.
///
/// Results keep catalog order; there is no relevance ranking. An empty
/// query matches every entity, so the whole catalog is returned.
pub fn search_by_text<T: TextSearchable + Clone>(catalog: &[T], query: &str) -> Vec<T> {
    let needle = query.to_lowercase();
    let matches: Vec<T> = catalog
        .iter()
        .filter(|entity| {
            entity
                .text_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();
    debug!(
        "search_by_text query: {:?}, matched {} of {}",
        query,
        matches.len(),
        catalog.len()
    );
    matches
}
