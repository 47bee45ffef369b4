//! Universal search: parse once, score every candidate, rank.

use crate::fuzzy::fuzzy_filter;
use crate::matcher::{score_item, SearchableItem};
use crate::parser::{parse_query, QueryParser};
use crate::query::ParsedQuery;
use crate::SearchResult;

/// Score `items` against an already parsed query.
///
/// Zero scores are dropped and the rest sorted best first. Ties keep their
/// input order, with or without the `parallel` feature.
pub fn search_parsed<'a>(
    items: &'a [SearchableItem],
    query: &ParsedQuery,
) -> Vec<SearchResult<&'a SearchableItem>> {
    #[cfg(feature = "parallel")]
    let scored: Vec<SearchResult<&'a SearchableItem>> = {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| SearchResult {
                item,
                score: score_item(item, query),
            })
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let scored: Vec<SearchResult<&'a SearchableItem>> = items
        .iter()
        .map(|item| SearchResult {
            item,
            score: score_item(item, query),
        })
        .collect();

    let mut results: Vec<_> = scored.into_iter().filter(|r| r.score > 0).collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(
        candidates = items.len(),
        matches = results.len(),
        "Universal search complete"
    );

    results
}

/// Parse `raw` with the default parser and rank `items` against it.
///
/// # Example
///
/// ```
/// use keepsake_search::{universal_search, ContentType, SearchableItem};
///
/// let items = vec![
///     SearchableItem::new("1", ContentType::Movie, "Heat").with_tags(["heist"]),
///     SearchableItem::new("2", ContentType::Tv, "Heist Stories"),
/// ];
///
/// let results = universal_search(&items, "heist");
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].item.id, "2");
/// ```
pub fn universal_search<'a>(
    items: &'a [SearchableItem],
    raw: &str,
) -> Vec<SearchResult<&'a SearchableItem>> {
    search_parsed(items, &parse_query(raw))
}

/// Fuzzy search over item titles only.
pub fn title_search<'a>(items: &'a [SearchableItem], query: &str) -> Vec<SearchResult<&'a SearchableItem>> {
    fuzzy_filter(items, query, |item| item.title.as_str())
}

impl QueryParser {
    /// Parse `raw` with this parser and rank `items` against it.
    pub fn search<'a>(
        &self,
        items: &'a [SearchableItem],
        raw: &str,
    ) -> Vec<SearchResult<&'a SearchableItem>> {
        search_parsed(items, &self.parse(raw))
    }
}
