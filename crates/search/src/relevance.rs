//! Match tiers for fuzzy scoring.

use serde::{Deserialize, Serialize};

/// Relevance tiers, each strictly outranking the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// No match
    None = 0,
    /// All query characters found in order; scores fall in `1..=84`
    Subsequence = 84,
    /// Contains the query contiguously
    Contains = 85,
    /// Starts with the query
    Prefix = 95,
    /// Equal ignoring case
    Exact = 100,
}

impl MatchTier {
    /// Score of the tier. For [`MatchTier::Subsequence`] this is the ceiling.
    pub fn score(self) -> u32 {
        self as u32
    }
}

/// Case-folded text, with the source char index of every folded char.
///
/// One source char may fold to several (`ß` to `ss`), so offsets into
/// `chars` are mapped back through `origin` before they reach callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Folded {
    pub chars: Vec<char>,
    pub origin: Vec<usize>,
}

impl Folded {
    /// Source char range covering the folded half-open range `start..end`.
    pub fn source_range(&self, start: usize, end: usize) -> (usize, usize) {
        (self.origin[start], self.origin[end - 1] + 1)
    }

    /// Source char index of a folded position.
    pub fn source_index(&self, pos: usize) -> usize {
        self.origin[pos]
    }
}

/// Fold one character into `out`.
///
/// Uppercasing then lowercasing is repeated until stable, so `ς`, `σ`
/// and `Σ` all fold to `σ`, and `ß`, `ẞ` and `SS` all fold to `ss`.
fn push_folded(c: char, out: &mut Vec<char>) {
    if c.is_ascii() {
        out.push(c.to_ascii_lowercase());
        return;
    }

    let mut current = vec![c];
    for _ in 0..4 {
        let next: Vec<char> = current
            .iter()
            .flat_map(|ch| ch.to_uppercase())
            .flat_map(char::to_lowercase)
            .collect();
        if next == current {
            break;
        }
        current = next;
    }
    out.extend(current);
}

/// Case-fold `text`.
pub(crate) fn fold(text: &str) -> Folded {
    let mut chars = Vec::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());

    for (index, c) in text.chars().enumerate() {
        push_folded(c, &mut chars);
        origin.resize(chars.len(), index);
    }

    Folded { chars, origin }
}

/// Classify a contiguous match of `query` in `target`.
///
/// Both slices must already be folded and `query` must be non-empty.
/// Returns the tier and the matched half-open char range.
pub(crate) fn contiguous_tier(query: &[char], target: &[char]) -> Option<(MatchTier, (usize, usize))> {
    if query.is_empty() || query.len() > target.len() {
        return None;
    }

    if query == target {
        return Some((MatchTier::Exact, (0, target.len())));
    }

    if target.starts_with(query) {
        return Some((MatchTier::Prefix, (0, query.len())));
    }

    target
        .windows(query.len())
        .position(|window| window == query)
        .map(|start| (MatchTier::Contains, (start, start + query.len())))
}
