//! Structured query types produced by the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of content a record represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Feature film
    Movie,
    /// Television series
    Tv,
    /// Video or board game
    Game,
    /// Free-form note or message
    Note,
    /// Saved location
    Place,
}

impl ContentType {
    /// Types covered by the `@media` aggregate tag.
    pub const MEDIA: [ContentType; 3] = [ContentType::Movie, ContentType::Tv, ContentType::Game];

    /// Human-readable label used in filter summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::Tv => "TV",
            ContentType::Game => "Game",
            ContentType::Note => "Note",
            ContentType::Place => "Place",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress status of a tracked title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// On the list, not started
    Queued,
    /// In progress
    Watching,
    /// Finished
    Completed,
    /// Given up on
    Dropped,
}

impl Status {
    /// Human-readable label used in filter summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Queued => "Queued",
            Status::Watching => "Watching",
            Status::Completed => "Completed",
            Status::Dropped => "Dropped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of parsing one raw query string.
///
/// Text fields are stored lowercased. Collections keep the left-to-right
/// order in which their tokens appeared. A default value carries no criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedQuery {
    /// Required substrings (AND-combined)
    pub terms: Vec<String>,
    /// Phrases that must appear verbatim
    pub exact_phrases: Vec<String>,
    /// Substrings that must not appear
    pub exclude_terms: Vec<String>,
    /// Groups where at least one member must appear
    pub or_groups: Vec<Vec<String>>,
    /// Allowed content types (empty = any)
    pub types: Vec<ContentType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_max: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread: Option<bool>,
}

impl ParsedQuery {
    /// Returns true if any field differs from its default.
    pub fn has_search_criteria(&self) -> bool {
        *self != Self::default()
    }

    /// Short descriptions of the active filters, in display order:
    /// type, status, creator, rating, year, genre, visited, archived, unread.
    ///
    /// Text criteria (terms, phrases, exclusions, OR groups) are not filters
    /// and never appear here.
    pub fn filter_summary(&self) -> Vec<String> {
        let mut summary = Vec::new();

        if !self.types.is_empty() {
            let labels: Vec<&str> = self.types.iter().map(ContentType::label).collect();
            summary.push(format!("Type: {}", labels.join(", ")));
        }

        if let Some(status) = self.status {
            summary.push(format!("Status: {}", status));
        }

        if let Some(ref user) = self.created_by {
            summary.push(format!("By: {}", user));
        }

        if let Some(range) = describe_range(self.min_rating, self.max_rating, None) {
            summary.push(format!("Rating: {}", range));
        }

        if let Some(range) = describe_range(self.year_min, self.year_max, self.year) {
            summary.push(format!("Year: {}", range));
        }

        if let Some(ref genre) = self.genre {
            summary.push(format!("Genre: {}", genre));
        }

        match self.visited {
            Some(true) => summary.push("Visited".to_string()),
            Some(false) => summary.push("Not visited".to_string()),
            None => {}
        }

        match self.archived {
            Some(true) => summary.push("Archived".to_string()),
            Some(false) => summary.push("Not archived".to_string()),
            None => {}
        }

        if self.unread == Some(true) {
            summary.push("Unread".to_string());
        }

        summary
    }
}

fn describe_range(min: Option<i32>, max: Option<i32>, exact: Option<i32>) -> Option<String> {
    if let Some(value) = exact {
        return Some(value.to_string());
    }

    match (min, max) {
        (Some(lo), Some(hi)) if lo == hi => Some(lo.to_string()),
        (Some(lo), Some(hi)) => Some(format!("{}-{}", lo, hi)),
        (Some(lo), None) => Some(format!("{}+", lo)),
        (None, Some(hi)) => Some(format!("≤{}", hi)),
        (None, None) => None,
    }
}
