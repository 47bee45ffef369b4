//! Universal search for Keepsake.
//!
//! This crate provides:
//! - A query language parser (type tags, status/rating/year filters,
//!   phrases, exclusions, OR groups)
//! - A filter-gate and additive scoring engine for searchable records
//! - Fuzzy subsequence matching with tiered scores and highlight ranges
//! - Ranking helpers combining the above
//! - WASM bindings for browser usage
//!
//! Everything here is pure and synchronous: no I/O, no shared state.
//!
//! # Example
//!
//! ```
//! use keepsake_search::{parse_query, score_item, ContentType, SearchableItem};
//!
//! let query = parse_query("action OR adventure");
//! let item = SearchableItem::new("1", ContentType::Game, "Hollow Knight")
//!     .with_genres(["Adventure"]);
//!
//! assert_eq!(query.or_groups, vec![vec!["action", "adventure"]]);
//! assert!(score_item(&item, &query) > 0);
//! ```

mod error;
mod fuzzy;
mod matcher;
mod parser;
mod query;
mod relevance;
mod universal;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{items_from_json, Result, SearchError};
pub use fuzzy::{
    fuzzy_filter, fuzzy_filter_with_threshold, fuzzy_match, fuzzy_score, fuzzy_score_multi,
    FuzzyMatchResult,
};
pub use matcher::{
    score_item, searchable_text, SearchableItem, BASE_SCORE, OR_GROUP_BONUS, PHRASE_BONUS,
    TEXT_TERM_BONUS, TITLE_PREFIX_BONUS, TITLE_TERM_BONUS,
};
pub use parser::{parse_query, QueryParser};
pub use query::{ContentType, ParsedQuery, Status};
pub use relevance::MatchTier;
pub use universal::{search_parsed, title_search, universal_search};

/// Search result with relevance score.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResult<T> {
    /// The matched item
    pub item: T,
    /// Relevance score (higher is better)
    pub score: u32,
}
