//! Free-form query parsing.
//!
//! Turns the raw contents of a search box into a [`ParsedQuery`]. Parsing is
//! best-effort: anything that is not a recognised filter becomes a plain
//! search term, so there is no input that fails to parse.
//!
//! # Syntax
//!
//! | Token | Effect |
//! |-------|--------|
//! | `"dark knight"` | exact phrase |
//! | `@movie`, `@film`, `@tv`, `@show`, `@game`, `@note`, `@place`, ... | type restriction |
//! | `@media` | movie, tv and game, unless another type tag is present |
//! | `status:done` | status filter (synonyms accepted) |
//! | `by:sam`, `from:sam` | creator filter (known users only) |
//! | `rating>4`, `rating>=4`, `rating<3`, `rating<=3`, `rating:4` | rating bounds |
//! | `year>2000`, `year:1999`, ... | release year bounds |
//! | `genre:drama` | genre filter |
//! | `visited:yes`, `archived:no` | boolean filters |
//! | `unread`, `is:unread` | unread messages only |
//! | `-word`, `NOT word` | exclusion |
//! | `a OR b OR c` | at least one of the group |

use crate::query::{ContentType, ParsedQuery, Status};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TYPE_ALIASES: Lazy<HashMap<&'static str, ContentType>> = Lazy::new(|| {
    HashMap::from([
        ("movie", ContentType::Movie),
        ("movies", ContentType::Movie),
        ("film", ContentType::Movie),
        ("films", ContentType::Movie),
        ("tv", ContentType::Tv),
        ("show", ContentType::Tv),
        ("shows", ContentType::Tv),
        ("series", ContentType::Tv),
        ("game", ContentType::Game),
        ("games", ContentType::Game),
        ("note", ContentType::Note),
        ("notes", ContentType::Note),
        ("message", ContentType::Note),
        ("messages", ContentType::Note),
        ("place", ContentType::Place),
        ("places", ContentType::Place),
        ("location", ContentType::Place),
        ("locations", ContentType::Place),
    ])
});

static STATUS_ALIASES: Lazy<HashMap<&'static str, Status>> = Lazy::new(|| {
    HashMap::from([
        ("queued", Status::Queued),
        ("queue", Status::Queued),
        ("watching", Status::Watching),
        ("playing", Status::Watching),
        ("in-progress", Status::Watching),
        ("completed", Status::Completed),
        ("done", Status::Completed),
        ("finished", Status::Completed),
        ("dropped", Status::Dropped),
        ("abandoned", Status::Dropped),
    ])
});

static BOOL_TOKENS: Lazy<HashMap<&'static str, bool>> = Lazy::new(|| {
    HashMap::from([
        ("yes", true),
        ("true", true),
        ("1", true),
        ("no", false),
        ("false", false),
        ("0", false),
    ])
});

// Two-character operators come first in the alternation.
static RATING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^rating(>=|<=|>|<|:|=)?(\d+)$").expect("valid rating regex"));

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^year(>=|<=|>|<|:|=)?(\d{4})$").expect("valid year regex"));

static PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]*)""#).expect("valid phrase regex"));

const MEDIA_TAG: &str = "media";

/// Comparison operator attached to a numeric filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Greater,
    AtLeast,
    Less,
    AtMost,
    Exact,
}

impl Comparison {
    fn from_op(op: Option<&str>) -> Self {
        match op {
            Some(">") => Comparison::Greater,
            Some(">=") => Comparison::AtLeast,
            Some("<") => Comparison::Less,
            Some("<=") => Comparison::AtMost,
            _ => Comparison::Exact,
        }
    }

    /// Inclusive `(min, max)` bounds for `value`, or `None` on overflow.
    fn bounds(self, value: i32) -> Option<(Option<i32>, Option<i32>)> {
        Some(match self {
            Comparison::Greater => (Some(value.checked_add(1)?), None),
            Comparison::AtLeast => (Some(value), None),
            Comparison::Less => (None, Some(value.checked_sub(1)?)),
            Comparison::AtMost => (None, Some(value)),
            Comparison::Exact => (Some(value), Some(value)),
        })
    }
}

/// Query parser with its lookup options.
///
/// The free function [`parse_query`] uses a default parser that knows no
/// users, so `by:` filters only take effect with a configured parser.
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    known_users: Vec<String>,
}

impl QueryParser {
    /// Create a parser with no known users.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user identifiers accepted by `by:` and `from:`.
    pub fn with_known_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_users = users.into_iter().map(Into::into).collect();
        self
    }

    /// User identifiers accepted by `by:` and `from:`.
    pub fn known_users(&self) -> &[String] {
        &self.known_users
    }

    /// Parse a raw query string. Never fails.
    pub fn parse(&self, raw: &str) -> ParsedQuery {
        let mut query = ParsedQuery::default();

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return query;
        }

        let remainder = PHRASE_RE.replace_all(trimmed, |caps: &regex::Captures<'_>| {
            let phrase = caps[1].to_lowercase();
            if !phrase.trim().is_empty() {
                query.exact_phrases.push(phrase);
            }
            " "
        });

        let tokens: Vec<&str> = remainder.split_whitespace().collect();
        let mut wants_media = false;
        let mut i = 0;

        while i < tokens.len() {
            let token = tokens[i];

            if self.apply_filter(token, &mut query, &mut wants_media) {
                i += 1;
                continue;
            }

            if token.eq_ignore_ascii_case("not") && i + 1 < tokens.len() {
                query.exclude_terms.push(tokens[i + 1].to_lowercase());
                i += 2;
                continue;
            }

            if token.len() > 1 {
                if let Some(rest) = token.strip_prefix('-') {
                    query.exclude_terms.push(rest.to_lowercase());
                    i += 1;
                    continue;
                }
            }

            // A connector without operands on both sides carries no meaning.
            if is_or(token) {
                i += 1;
                continue;
            }

            if joins_next(&tokens, i) {
                let mut group = vec![token.to_lowercase()];
                let mut j = i + 1;
                while joins_next(&tokens, j - 1) {
                    let member = tokens[j + 1].to_lowercase();
                    if !group.contains(&member) {
                        group.push(member);
                    }
                    j += 2;
                }
                query.or_groups.push(group);
                i = j;
                continue;
            }

            query.terms.push(token.to_lowercase());
            i += 1;
        }

        if wants_media && query.types.is_empty() {
            query.types = ContentType::MEDIA.to_vec();
        }

        tracing::trace!(
            raw = %raw,
            terms = query.terms.len(),
            phrases = query.exact_phrases.len(),
            excludes = query.exclude_terms.len(),
            or_groups = query.or_groups.len(),
            filters = query.filter_summary().len(),
            "Parsed query"
        );

        query
    }

    /// Apply `token` if it is a filter. Returns true when the token was
    /// consumed, including filters whose value was not recognised.
    fn apply_filter(&self, token: &str, query: &mut ParsedQuery, wants_media: &mut bool) -> bool {
        if let Some(tag) = token.strip_prefix('@') {
            let tag = tag.to_lowercase();
            if tag == MEDIA_TAG {
                *wants_media = true;
                return true;
            }
            return match TYPE_ALIASES.get(tag.as_str()) {
                Some(&content_type) => {
                    if !query.types.contains(&content_type) {
                        query.types.push(content_type);
                    }
                    true
                }
                None => false,
            };
        }

        if let Some((key, value)) = token.split_once(':') {
            let value_lower = value.to_lowercase();
            match key.to_ascii_lowercase().as_str() {
                "status" => {
                    if let Some(&status) = STATUS_ALIASES.get(value_lower.as_str()) {
                        query.status = Some(status);
                    }
                    return true;
                }
                "by" | "from" => {
                    if let Some(user) = self.match_user(&value_lower) {
                        query.created_by = Some(user.to_string());
                    }
                    return true;
                }
                _ => {}
            }
        }

        if let Some(caps) = RATING_RE.captures(token) {
            let comparison = Comparison::from_op(caps.get(1).map(|m| m.as_str()));
            let bounds = caps[2].parse::<i32>().ok().and_then(|n| comparison.bounds(n));
            return match bounds {
                Some((min, max)) => {
                    if min.is_some() {
                        query.min_rating = min;
                    }
                    if max.is_some() {
                        query.max_rating = max;
                    }
                    true
                }
                None => false,
            };
        }

        if let Some(caps) = YEAR_RE.captures(token) {
            let comparison = Comparison::from_op(caps.get(1).map(|m| m.as_str()));
            let Some(year) = caps[2].parse::<i32>().ok() else {
                return false;
            };
            if comparison == Comparison::Exact {
                query.year = Some(year);
                return true;
            }
            return match comparison.bounds(year) {
                Some((min, max)) => {
                    if min.is_some() {
                        query.year_min = min;
                    }
                    if max.is_some() {
                        query.year_max = max;
                    }
                    true
                }
                None => false,
            };
        }

        if let Some((key, value)) = token.split_once(':') {
            let value_lower = value.to_lowercase();
            match key.to_ascii_lowercase().as_str() {
                "genre" => {
                    if !value_lower.is_empty() {
                        query.genre = Some(value_lower);
                    }
                    return true;
                }
                "visited" => {
                    if let Some(&flag) = BOOL_TOKENS.get(value_lower.as_str()) {
                        query.visited = Some(flag);
                    }
                    return true;
                }
                "archived" => {
                    if let Some(&flag) = BOOL_TOKENS.get(value_lower.as_str()) {
                        query.archived = Some(flag);
                    }
                    return true;
                }
                "is" if value_lower == "unread" => {
                    query.unread = Some(true);
                    return true;
                }
                _ => {}
            }
        }

        if token.eq_ignore_ascii_case("unread") {
            query.unread = Some(true);
            return true;
        }

        false
    }

    fn match_user(&self, value: &str) -> Option<&str> {
        self.known_users
            .iter()
            .find(|user| user.to_lowercase() == value)
            .map(String::as_str)
    }
}

fn is_or(token: &str) -> bool {
    token.eq_ignore_ascii_case("or")
}

/// True when `tokens[i]` is followed by `OR` and a non-connector operand.
fn joins_next(tokens: &[&str], i: usize) -> bool {
    match (tokens.get(i + 1), tokens.get(i + 2)) {
        (Some(connector), Some(operand)) => is_or(connector) && !is_or(operand),
        _ => false,
    }
}

/// Parse a raw query string with the default parser.
///
/// # Example
///
/// ```
/// use keepsake_search::{parse_query, ContentType};
///
/// let query = parse_query(r#"@movie rating>4 "dark knight" -batman"#);
/// assert_eq!(query.types, vec![ContentType::Movie]);
/// assert_eq!(query.min_rating, Some(5));
/// assert_eq!(query.exact_phrases, vec!["dark knight"]);
/// assert_eq!(query.exclude_terms, vec!["batman"]);
/// assert!(query.terms.is_empty());
/// ```
pub fn parse_query(raw: &str) -> ParsedQuery {
    QueryParser::default().parse(raw)
}
