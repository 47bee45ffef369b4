//! Property-based tests using proptest.
//!
//! These check the invariants that must hold for any input: case
//! insensitivity, self-matching, parse determinism and hard-filter dominance.

use proptest::prelude::*;
use keepsake_search::{
    fuzzy_filter, fuzzy_match, fuzzy_score, parse_query, score_item, ContentType, SearchableItem,
};

// ============================================================================
// STRATEGIES
// ============================================================================

/// ASCII text with mixed case, spaces and punctuation.
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,'-]{0,24}").unwrap()
}

/// Arbitrary printable Unicode, including chars whose case mappings
/// expand (`ß`) or depend on position (final `ς`).
fn unicode_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex("\\PC{0,16}").unwrap(),
        prop::collection::vec(
            prop::sample::select(vec!["ß", "ẞ", "SS", "ς", "Σ", "σ", "İ", "ı", "ǅ", "\u{212A}", "ﬁ", "a", " "]),
            0..8,
        )
        .prop_map(|parts| parts.concat()),
    ]
}

/// Non-blank ASCII text.
fn solid_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9][a-zA-Z0-9 .-]{0,16}").unwrap()
}

/// Query strings built from a mix of filter tokens and plain words.
fn query_strategy() -> impl Strategy<Value = String> {
    let token = prop::sample::select(vec![
        "@movie", "@tv", "@media", "@place", "@note", "status:done", "status:queue",
        "rating>3", "rating<=2", "rating:4", "year>=2000", "year:1999", "genre:drama",
        "visited:yes", "archived:no", "unread", "-dark", "NOT knight", "OR", "action",
        "\"dark knight\"", "heat", "by:sam", "\"", "-",
    ])
    .prop_map(str::to_string);
    prop::collection::vec(token, 0..8).prop_map(|tokens| tokens.join(" "))
}

fn content_type_strategy() -> impl Strategy<Value = ContentType> {
    prop::sample::select(vec![
        ContentType::Movie,
        ContentType::Tv,
        ContentType::Game,
        ContentType::Note,
        ContentType::Place,
    ])
}

// ============================================================================
// FUZZY PROPERTIES
// ============================================================================

proptest! {
    /// Property: scores ignore case on both sides.
    #[test]
    fn prop_fuzzy_case_insensitive(query in text_strategy(), target in text_strategy()) {
        prop_assert_eq!(
            fuzzy_score(&query, &target),
            fuzzy_score(&query.to_uppercase(), &target.to_lowercase())
        );
    }

    /// Property: case insensitivity holds for any Unicode input.
    #[test]
    fn prop_fuzzy_case_insensitive_unicode(
        query in unicode_text_strategy(),
        target in unicode_text_strategy(),
    ) {
        prop_assert_eq!(
            fuzzy_score(&query, &target),
            fuzzy_score(&query.to_uppercase(), &target.to_lowercase())
        );
    }

    /// Property: highlights stay inside the source text when folding expands chars.
    #[test]
    fn prop_fuzzy_highlights_in_bounds_unicode(
        query in unicode_text_strategy(),
        target in unicode_text_strategy(),
    ) {
        let result = fuzzy_match(&query, &target);
        let len = target.chars().count();
        let mut last_end = 0;
        for (start, end) in result.highlight_ranges {
            prop_assert!(start < end);
            prop_assert!(start >= last_end);
            prop_assert!(end <= len);
            last_end = end;
        }
    }

    /// Property: a non-blank string matches itself exactly.
    #[test]
    fn prop_fuzzy_self_match(text in solid_text_strategy()) {
        prop_assert_eq!(fuzzy_score(&text, &text), 100);
    }

    /// Property: scores stay in range and zero means unmatched.
    #[test]
    fn prop_fuzzy_score_range(query in text_strategy(), target in text_strategy()) {
        let result = fuzzy_match(&query, &target);
        prop_assert!(result.score <= 100);
        if result.score == 0 {
            prop_assert!(!result.matched);
        }
    }

    /// Property: highlight ranges are ordered, non-empty and inside the target.
    #[test]
    fn prop_fuzzy_highlights_in_bounds(query in text_strategy(), target in text_strategy()) {
        let result = fuzzy_match(&query, &target);
        let len = target.chars().count();
        let mut last_end = 0;
        for (start, end) in result.highlight_ranges {
            prop_assert!(start < end);
            prop_assert!(start >= last_end);
            prop_assert!(end <= len);
            last_end = end;
        }
    }

    /// Property: an empty query keeps every item at 100 in input order.
    #[test]
    fn prop_fuzzy_filter_empty_query(titles in prop::collection::vec(text_strategy(), 0..10)) {
        let results = fuzzy_filter(&titles, "", |t| t.as_str());
        prop_assert_eq!(results.len(), titles.len());
        for (result, title) in results.iter().zip(titles.iter()) {
            prop_assert_eq!(result.item, title);
            prop_assert_eq!(result.score, 100);
        }
    }

    /// Property: filtered results are sorted best first.
    #[test]
    fn prop_fuzzy_filter_sorted(
        titles in prop::collection::vec(text_strategy(), 0..10),
        query in solid_text_strategy(),
    ) {
        let results = fuzzy_filter(&titles, &query, |t| t.as_str());
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        prop_assert!(results.iter().all(|r| r.score > 0));
    }
}

// ============================================================================
// PARSER AND SCORING PROPERTIES
// ============================================================================

proptest! {
    /// Property: parsing is deterministic.
    #[test]
    fn prop_parse_deterministic(raw in query_strategy()) {
        prop_assert_eq!(parse_query(&raw), parse_query(&raw));
    }

    /// Property: arbitrary text always parses.
    #[test]
    fn prop_parse_total(raw in ".{0,64}") {
        let query = parse_query(&raw);
        if raw.trim().is_empty() {
            prop_assert!(!query.has_search_criteria());
        }
    }

    /// Property: the summary only mentions filters that were parsed.
    #[test]
    fn prop_summary_consistent(raw in query_strategy()) {
        let query = parse_query(&raw);
        let summary = query.filter_summary();
        let mentions = |prefix: &str| summary.iter().any(|line| line.starts_with(prefix));

        prop_assert_eq!(mentions("Type:"), !query.types.is_empty());
        prop_assert_eq!(mentions("Status:"), query.status.is_some());
        prop_assert_eq!(mentions("By:"), query.created_by.is_some());
        prop_assert_eq!(mentions("Rating:"), query.min_rating.is_some() || query.max_rating.is_some());
        prop_assert_eq!(
            mentions("Year:"),
            query.year.is_some() || query.year_min.is_some() || query.year_max.is_some()
        );
        prop_assert_eq!(mentions("Genre:"), query.genre.is_some());
        prop_assert_eq!(summary.iter().any(|l| l.ends_with("isited")), query.visited.is_some());
        prop_assert_eq!(summary.iter().any(|l| l.ends_with("rchived")), query.archived.is_some());
        prop_assert_eq!(summary.iter().any(|l| l == "Unread"), query.unread.is_some());
    }

    /// Property: a failed type filter excludes the item no matter the text.
    #[test]
    fn prop_type_filter_dominates(
        raw in query_strategy(),
        item_type in content_type_strategy(),
        title in text_strategy(),
    ) {
        let query = parse_query(&raw);
        let item = SearchableItem::new("id", item_type, title)
            .with_content("dark knight heat action drama")
            .with_rating(4)
            .with_year(1999);

        let score = score_item(&item, &query);
        if !query.types.is_empty() && !query.types.contains(&item_type) {
            prop_assert_eq!(score, 0);
        }
        if score > 0 {
            prop_assert!(score >= 100);
        }
    }

    /// Property: an unmet rating bound excludes the item no matter the text.
    #[test]
    fn prop_rating_filter_dominates(rating in 0i32..10, bound in 0i32..10, title in "[a-z ]{0,16}") {
        let query = parse_query(&format!("rating>={} {}", bound, title));
        let item = SearchableItem::new("id", ContentType::Movie, title.clone()).with_rating(rating);
        let score = score_item(&item, &query);
        if rating < bound {
            prop_assert_eq!(score, 0);
        }
    }
}
