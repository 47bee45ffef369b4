//! Fuzzy matching algorithms.
//!
//! Scores lie in `0..=100`. Contiguous matches are ranked by tier (exact,
//! prefix, substring); otherwise the query is matched as a character
//! subsequence and scored below the substring tier.

use crate::relevance::{contiguous_tier, fold, Folded, MatchTier};
use crate::SearchResult;
use serde::{Deserialize, Serialize};

const COVERAGE_WEIGHT: f64 = 40.0;
const CONSECUTIVE_BONUS: f64 = 5.0;
const BOUNDARY_BONUS: f64 = 8.0;

/// Outcome of matching a query against one target string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuzzyMatchResult {
    /// Whether the query matched
    pub matched: bool,
    /// Score in `0..=100`
    pub score: u32,
    /// Half-open char ranges of `target` covered by the match
    pub highlight_ranges: Vec<(usize, usize)>,
}

impl FuzzyMatchResult {
    fn no_match() -> Self {
        Self {
            matched: false,
            score: 0,
            highlight_ranges: Vec::new(),
        }
    }

    fn hit(score: u32, highlight_ranges: Vec<(usize, usize)>) -> Self {
        Self {
            matched: true,
            score,
            highlight_ranges,
        }
    }
}

/// Match `query` against `target`, case-insensitively.
///
/// - the empty query never matches
/// - a whitespace-only query matches everything at 100
/// - exact 100, prefix 95, substring 85
/// - otherwise a subsequence match scores `1..=84`, a miss scores 0
pub fn fuzzy_match(query: &str, target: &str) -> FuzzyMatchResult {
    if query.is_empty() {
        return FuzzyMatchResult::no_match();
    }

    if query.trim().is_empty() {
        return FuzzyMatchResult::hit(MatchTier::Exact.score(), Vec::new());
    }

    if target.is_empty() {
        return FuzzyMatchResult::no_match();
    }

    let query = fold(query).chars;
    let target = fold(target);

    if let Some((tier, (start, end))) = contiguous_tier(&query, &target.chars) {
        return FuzzyMatchResult::hit(tier.score(), vec![target.source_range(start, end)]);
    }

    subsequence_match(&query, &target)
}

/// Score `query` against `target` in `0..=100`; 0 means no match.
///
/// # Example
///
/// ```
/// use keepsake_search::fuzzy_score;
///
/// let exact = fuzzy_score("breaking bad", "Breaking Bad");
/// let prefix = fuzzy_score("break", "Breaking Bad");
/// let scattered = fuzzy_score("brba", "Breaking Bad");
///
/// assert_eq!(exact, 100);
/// assert_eq!(prefix, 95);
/// assert!(scattered > 0 && scattered < prefix);
/// ```
pub fn fuzzy_score(query: &str, target: &str) -> u32 {
    fuzzy_match(query, target).score
}

/// Best score of `query` across the present fields, 0 if none match.
pub fn fuzzy_score_multi(query: &str, fields: &[Option<&str>]) -> u32 {
    fields
        .iter()
        .flatten()
        .map(|field| fuzzy_score(query, field))
        .max()
        .unwrap_or(0)
}

/// Rank `items` by the fuzzy score of their key, keeping scores above 0.
pub fn fuzzy_filter<'a, T, F, K>(items: &'a [T], query: &str, key: F) -> Vec<SearchResult<&'a T>>
where
    F: Fn(&'a T) -> K,
    K: AsRef<str>,
{
    fuzzy_filter_with_threshold(items, query, key, 0)
}

/// Rank `items` by the fuzzy score of their key, keeping scores above
/// `threshold`, best first. Ties keep their input order.
///
/// An empty or whitespace-only query keeps every item at score 100.
pub fn fuzzy_filter_with_threshold<'a, T, F, K>(
    items: &'a [T],
    query: &str,
    key: F,
    threshold: u32,
) -> Vec<SearchResult<&'a T>>
where
    F: Fn(&'a T) -> K,
    K: AsRef<str>,
{
    if query.trim().is_empty() {
        return items
            .iter()
            .map(|item| SearchResult {
                item,
                score: MatchTier::Exact.score(),
            })
            .collect();
    }

    let mut results: Vec<SearchResult<&'a T>> = items
        .iter()
        .filter_map(|item| {
            let score = fuzzy_score(query, key(item).as_ref());
            (score > threshold).then_some(SearchResult { item, score })
        })
        .collect();

    // Stable, so equal scores stay in input order.
    results.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(
        candidates = items.len(),
        matches = results.len(),
        threshold,
        "Fuzzy filter complete"
    );

    results
}

/// Greedy left-to-right subsequence match over folded characters.
fn subsequence_match(query: &[char], folded: &Folded) -> FuzzyMatchResult {
    let target = &folded.chars;
    let mut positions = Vec::with_capacity(query.len());
    let mut cursor = 0;

    for &wanted in query {
        match target[cursor..].iter().position(|&c| c == wanted) {
            Some(offset) => {
                positions.push(cursor + offset);
                cursor += offset + 1;
            }
            None => return FuzzyMatchResult::no_match(),
        }
    }

    let consecutive = positions.windows(2).filter(|pair| pair[1] == pair[0] + 1).count();
    let boundaries = positions
        .iter()
        .filter(|&&pos| pos == 0 || !target[pos - 1].is_alphanumeric())
        .count();

    let raw = COVERAGE_WEIGHT * positions.len() as f64 / target.len() as f64
        + CONSECUTIVE_BONUS * consecutive as f64
        + BOUNDARY_BONUS * boundaries as f64;
    let score = (raw.round() as u32).clamp(1, MatchTier::Subsequence.score());

    let mut source: Vec<usize> = positions.iter().map(|&pos| folded.source_index(pos)).collect();
    source.dedup();

    FuzzyMatchResult::hit(score, merge_positions(&source))
}

/// Collapse sorted positions into half-open runs.
fn merge_positions(positions: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &pos in positions {
        match ranges.last_mut() {
            Some((_, end)) if *end == pos => *end = pos + 1,
            _ => ranges.push((pos, pos + 1)),
        }
    }
    ranges
}
