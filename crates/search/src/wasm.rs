//! WASM bindings for the search crate.
//!
//! These bindings let the browser app call the parser and ranker directly.
//! Records cross the boundary as JSON strings.

use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Parse a query string.
///
/// # Returns
/// JSON of the parsed query (camelCase fields, absent filters omitted)
#[wasm_bindgen]
pub fn parse_query_json(raw: &str) -> String {
    serde_json::to_string(&crate::parse_query(raw)).unwrap_or_else(|_| "{}".to_string())
}

/// Human-readable summary of the filters in a query string.
///
/// # Returns
/// JSON array of strings
#[wasm_bindgen]
pub fn filter_summary_json(raw: &str) -> String {
    serde_json::to_string(&crate::parse_query(raw).filter_summary())
        .unwrap_or_else(|_| "[]".to_string())
}

/// Score a query against text.
///
/// # Returns
/// Fuzzy score (0-100, 0 means no match)
#[wasm_bindgen]
pub fn fuzzy_score(query: &str, target: &str) -> u32 {
    crate::fuzzy_score(query, target)
}

/// Search items and return ranked results as JSON.
///
/// # Arguments
/// * `raw` - Query string
/// * `items_json` - JSON array of searchable records
/// * `max_results` - Maximum results to return (0 for all)
///
/// # Returns
/// JSON array of `{id, score}` objects, best first; `[]` on invalid input
#[wasm_bindgen]
pub fn search_items_json(raw: &str, items_json: &str, max_results: usize) -> String {
    #[derive(Serialize)]
    struct Hit<'a> {
        id: &'a str,
        score: u32,
    }

    let items = match crate::items_from_json(items_json) {
        Ok(items) => items,
        Err(_) => return "[]".to_string(),
    };

    let mut results: Vec<Hit<'_>> = crate::universal_search(&items, raw)
        .into_iter()
        .map(|r| Hit {
            id: r.item.id.as_str(),
            score: r.score,
        })
        .collect();

    if max_results > 0 {
        results.truncate(max_results);
    }

    serde_json::to_string(&results).unwrap_or_else(|_| "[]".to_string())
}
