//! Filter-gate and additive scoring of one record against a parsed query.

use crate::query::{ContentType, ParsedQuery, Status};
use serde::{Deserialize, Serialize};

/// Score awarded for passing every hard filter.
pub const BASE_SCORE: u32 = 100;
/// Bonus per exact phrase found.
pub const PHRASE_BONUS: u32 = 20;
/// Bonus per required term found in the title.
pub const TITLE_TERM_BONUS: u32 = 15;
/// Bonus per required term found outside the title.
pub const TEXT_TERM_BONUS: u32 = 5;
/// Bonus per satisfied OR group.
pub const OR_GROUP_BONUS: u32 = 10;
/// Bonus when the title starts with the first required term.
pub const TITLE_PREFIX_BONUS: u32 = 25;

/// The projection of a record that the engine can score.
///
/// Callers flatten their richer records (movies, notes, places) into this
/// shape. Optional fields that are absent never satisfy a filter on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
}

impl SearchableItem {
    /// Create an item with only the required fields set.
    pub fn new(id: impl Into<String>, content_type: ContentType, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content_type,
            title: title.into(),
            content: None,
            tags: Vec::new(),
            genres: None,
            status: None,
            rating: None,
            year: None,
            created_by: None,
            visited: None,
            archived: None,
            read: None,
        }
    }

    /// Set the free-text body
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Replace the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the genres
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = Some(genres.into_iter().map(Into::into).collect());
        self
    }

    /// Set the progress status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the rating
    pub fn with_rating(mut self, rating: impl Into<f64>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    /// Set the release year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the creating user
    pub fn with_created_by(mut self, user: impl Into<String>) -> Self {
        self.created_by = Some(user.into());
        self
    }

    /// Mark a place visited or not
    pub fn with_visited(mut self, visited: bool) -> Self {
        self.visited = Some(visited);
        self
    }

    /// Mark archived or not
    pub fn with_archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    /// Mark read or unread
    pub fn with_read(mut self, read: bool) -> Self {
        self.read = Some(read);
        self
    }
}

/// Lowercased title, content, tags and genres joined by spaces.
pub fn searchable_text(item: &SearchableItem) -> String {
    let mut parts: Vec<&str> = vec![item.title.as_str()];
    if let Some(ref content) = item.content {
        parts.push(content);
    }
    parts.extend(item.tags.iter().map(String::as_str));
    if let Some(ref genres) = item.genres {
        parts.extend(genres.iter().map(String::as_str));
    }
    parts.join(" ").to_lowercase()
}

/// Score `item` against `query`.
///
/// Returns 0 when the item is excluded. Otherwise the score starts at
/// [`BASE_SCORE`] and grows with each matched phrase, term and OR group.
///
/// # Example
///
/// ```
/// use keepsake_search::{parse_query, score_item, ContentType, SearchableItem};
///
/// let query = parse_query(r#"@movie rating>4 "dark knight" -batman"#);
/// let hit = SearchableItem::new("1", ContentType::Movie, "The Dark Knight").with_rating(5);
/// let miss = SearchableItem::new("2", ContentType::Movie, "The Dark Knight").with_rating(3);
///
/// assert!(score_item(&hit, &query) > 0);
/// assert_eq!(score_item(&miss, &query), 0);
/// ```
pub fn score_item(item: &SearchableItem, query: &ParsedQuery) -> u32 {
    if !passes_filters(item, query) {
        return 0;
    }

    let haystack = searchable_text(item);
    let title = item.title.to_lowercase();
    let mut score = BASE_SCORE;

    for phrase in &query.exact_phrases {
        if !haystack.contains(phrase.as_str()) {
            return 0;
        }
        score += PHRASE_BONUS;
    }

    if query
        .exclude_terms
        .iter()
        .any(|term| haystack.contains(term.as_str()))
    {
        return 0;
    }

    for term in &query.terms {
        if !haystack.contains(term.as_str()) {
            return 0;
        }
        score += if title.contains(term.as_str()) {
            TITLE_TERM_BONUS
        } else {
            TEXT_TERM_BONUS
        };
    }

    for group in &query.or_groups {
        if !group.iter().any(|member| haystack.contains(member.as_str())) {
            return 0;
        }
        score += OR_GROUP_BONUS;
    }

    if let Some(first) = query.terms.first() {
        if title.starts_with(first.as_str()) {
            score += TITLE_PREFIX_BONUS;
        }
    }

    score
}

/// Hard filters, checked in a fixed order. Any failure excludes the item.
fn passes_filters(item: &SearchableItem, query: &ParsedQuery) -> bool {
    if !query.types.is_empty() && !query.types.contains(&item.content_type) {
        return false;
    }

    if query.status.is_some() && item.status != query.status {
        return false;
    }

    if let Some(ref user) = query.created_by {
        match item.created_by {
            Some(ref creator) if creator.to_lowercase() == user.to_lowercase() => {}
            _ => return false,
        }
    }

    if query.min_rating.is_some() || query.max_rating.is_some() {
        let Some(rating) = item.rating else {
            return false;
        };
        if query.min_rating.is_some_and(|min| rating < f64::from(min)) {
            return false;
        }
        if query.max_rating.is_some_and(|max| rating > f64::from(max)) {
            return false;
        }
    }

    if query.year.is_some() && item.year != query.year {
        return false;
    }

    if query.year_min.is_some() || query.year_max.is_some() {
        let Some(year) = item.year else {
            return false;
        };
        if query.year_min.is_some_and(|min| year < min) {
            return false;
        }
        if query.year_max.is_some_and(|max| year > max) {
            return false;
        }
    }

    if let Some(ref genre) = query.genre {
        let genre = genre.to_lowercase();
        let matches = item
            .genres
            .as_ref()
            .is_some_and(|genres| genres.iter().any(|g| g.to_lowercase().contains(&genre)));
        if !matches {
            return false;
        }
    }

    if query.visited.is_some() && item.visited != query.visited {
        return false;
    }

    if query.archived.is_some() && item.archived != query.archived {
        return false;
    }

    if query.unread == Some(true) && item.read != Some(false) {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_query;

    fn movie(title: &str) -> SearchableItem {
        SearchableItem::new("m1", ContentType::Movie, title)
    }

    #[test]
    fn test_empty_query_scores_base() {
        assert_eq!(score_item(&movie("Anything"), &ParsedQuery::default()), BASE_SCORE);
    }

    #[test]
    fn test_haystack_composition() {
        let item = movie("Heat")
            .with_content("Crime SAGA")
            .with_tags(["LA", "heist"])
            .with_genres(["Thriller"]);
        assert_eq!(searchable_text(&item), "heat crime saga la heist thriller");
    }

    #[test]
    fn test_type_filter() {
        let query = parse_query("@movie");
        assert_eq!(score_item(&movie("X"), &query), 100);
        let show = SearchableItem::new("t", ContentType::Tv, "X");
        assert_eq!(score_item(&show, &query), 0);
    }

    #[test]
    fn test_status_filter() {
        let query = parse_query("status:done");
        assert_eq!(score_item(&movie("X"), &query), 0);
        assert_eq!(score_item(&movie("X").with_status(Status::Queued), &query), 0);
        assert_eq!(score_item(&movie("X").with_status(Status::Completed), &query), 100);
    }

    #[test]
    fn test_creator_filter_case_insensitive() {
        let query = ParsedQuery {
            created_by: Some("Sam".into()),
            ..Default::default()
        };
        assert_eq!(score_item(&movie("X").with_created_by("sam"), &query), 100);
        assert_eq!(score_item(&movie("X").with_created_by("alex"), &query), 0);
        assert_eq!(score_item(&movie("X"), &query), 0);
    }

    #[test]
    fn test_rating_boundaries() {
        let query = parse_query("rating>4");
        assert_eq!(score_item(&movie("X").with_rating(4), &query), 0);
        assert_eq!(score_item(&movie("X").with_rating(5), &query), 100);
        assert_eq!(score_item(&movie("X"), &query), 0);

        let query = parse_query("rating<=3");
        assert_eq!(score_item(&movie("X").with_rating(3), &query), 100);
        assert_eq!(score_item(&movie("X").with_rating(3.5), &query), 0);

        let query = parse_query("rating:4");
        assert_eq!(score_item(&movie("X").with_rating(4), &query), 100);
        assert_eq!(score_item(&movie("X").with_rating(5), &query), 0);
    }

    #[test]
    fn test_year_filters() {
        let query = parse_query("year:1999");
        assert_eq!(score_item(&movie("X").with_year(1999), &query), 100);
        assert_eq!(score_item(&movie("X").with_year(2000), &query), 0);
        assert_eq!(score_item(&movie("X"), &query), 0);

        let query = parse_query("year>=1990 year<2000");
        assert_eq!(score_item(&movie("X").with_year(1990), &query), 100);
        assert_eq!(score_item(&movie("X").with_year(2000), &query), 0);
        assert_eq!(score_item(&movie("X"), &query), 0);
    }

    #[test]
    fn test_genre_filter() {
        let query = parse_query("genre:sci");
        assert_eq!(score_item(&movie("X").with_genres(["Sci-Fi"]), &query), 100);
        assert_eq!(score_item(&movie("X").with_genres(["Drama"]), &query), 0);
        assert_eq!(score_item(&movie("X"), &query), 0);
    }

    #[test]
    fn test_boolean_filters() {
        let place = SearchableItem::new("p", ContentType::Place, "Cafe");
        let query = parse_query("visited:yes");
        assert_eq!(score_item(&place.clone().with_visited(true), &query), 100);
        assert_eq!(score_item(&place.clone().with_visited(false), &query), 0);
        assert_eq!(score_item(&place, &query), 0);

        let query = parse_query("archived:no");
        assert_eq!(score_item(&place.clone().with_archived(false), &query), 100);
        assert_eq!(score_item(&place.with_archived(true), &query), 0);
    }

    #[test]
    fn test_unread_requires_explicit_false() {
        let note = SearchableItem::new("n", ContentType::Note, "Hi");
        let query = parse_query("unread");
        assert_eq!(score_item(&note.clone().with_read(false), &query), 100);
        assert_eq!(score_item(&note.clone().with_read(true), &query), 0);
        assert_eq!(score_item(&note, &query), 0);
    }

    #[test]
    fn test_term_bonuses() {
        let item = movie("Heat").with_content("a crime saga");
        // "heat": in title (+15) and title prefix (+25)
        assert_eq!(score_item(&item, &parse_query("heat")), 140);
        // "crime": outside the title (+5)
        assert_eq!(score_item(&item, &parse_query("crime")), 105);
        // first term not a prefix, so no prefix bonus
        assert_eq!(score_item(&item, &parse_query("crime heat")), 120);
        assert_eq!(score_item(&item, &parse_query("missing")), 0);
    }

    #[test]
    fn test_phrase_and_exclusion() {
        let item = movie("The Dark Knight");
        assert_eq!(score_item(&item, &parse_query(r#""dark knight""#)), 120);
        assert_eq!(score_item(&item, &parse_query(r#""knight dark""#)), 0);
        assert_eq!(score_item(&item, &parse_query("-knight")), 0);
        assert_eq!(score_item(&item, &parse_query("-batman")), 100);
    }

    #[test]
    fn test_or_group_bonus_once_per_group() {
        let item = movie("X").with_tags(["action", "adventure"]);
        assert_eq!(score_item(&item, &parse_query("action OR adventure")), 110);
        assert_eq!(score_item(&item, &parse_query("comedy OR drama")), 0);
        assert_eq!(
            score_item(&item, &parse_query("action OR comedy adventure OR drama")),
            120
        );
    }

    #[test]
    fn test_filter_failure_beats_text_bonuses() {
        let item = movie("Heat").with_rating(2);
        let query = parse_query(r#"heat "heat" rating>=3"#);
        assert_eq!(score_item(&item, &query), 0);
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let item: SearchableItem =
            serde_json::from_str(r#"{"id":"1","type":"tv","title":"Severance","read":false}"#)
                .unwrap();
        assert_eq!(item.content_type, ContentType::Tv);
        assert_eq!(item.read, Some(false));
        assert!(item.tags.is_empty());
        assert!(item.genres.is_none());
    }
}
