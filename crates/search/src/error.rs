//! Error types for the search crate.
//!
//! Parsing and scoring never fail. Errors only arise at the JSON boundary
//! where callers hand in serialized records.

use crate::matcher::SearchableItem;
use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur at the search crate's boundaries.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Records could not be decoded
    #[error("Invalid items: {0}")]
    InvalidItems(#[from] serde_json::Error),
}

/// Decode a JSON array of searchable records.
pub fn items_from_json(json: &str) -> Result<Vec<SearchableItem>> {
    Ok(serde_json::from_str(json)?)
}
