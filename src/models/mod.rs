use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchErrorKind;

/// Opaque identifier for the current user, supplied by the session store
pub type UserId = uuid::Uuid;

/// A movie title with the metadata shared by every upstream response shape
///
/// Identity for deduplication purposes is the normalized title, never
/// `source_id` — the upstream services are not guaranteed to agree on ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub rating: Option<f64>,
    pub vote_count: Option<u64>,
    pub genres: Vec<String>,
    pub release_year: Option<i32>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub source_id: Option<u64>,
}

impl Movie {
    /// Deduplication key: lowercased, trimmed title
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Normalize a title string for use as a deduplication key
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

// ============================================================================
// Search state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Why a primary search failed, with the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub kind: SearchErrorKind,
    pub message: String,
}

/// Result of a single seed-title search
///
/// Replaced wholesale on every new query; never mutated across queries, so a
/// stale in-flight response has nothing to merge into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub seed_query: String,
    /// Canonical title the upstream matched the seed query to
    pub matched: Option<Movie>,
    /// Ranked recommendations, in upstream rank order (rank-significant)
    pub primary: Vec<Movie>,
    /// Genres of the matched title, driving the explore fetch
    pub genres: Vec<String>,
    pub phase: SearchPhase,
    pub failure: Option<SearchFailure>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl SearchResultSet {
    pub fn idle() -> Self {
        Self {
            seed_query: String::new(),
            matched: None,
            primary: Vec::new(),
            genres: Vec::new(),
            phase: SearchPhase::Idle,
            failure: None,
            fetched_at: None,
        }
    }

    pub fn loading(seed: &str) -> Self {
        Self {
            seed_query: seed.to_string(),
            phase: SearchPhase::Loading,
            ..Self::idle()
        }
    }
}

impl Default for SearchResultSet {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplorePhase {
    Idle,
    Loading,
    Loaded,
}

/// Secondary, genre-derived result set shown alongside primary results
///
/// Derived from the current `SearchResultSet`; items never overlap the
/// primary results or each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExploreResultSet {
    pub source_genres: Vec<String>,
    /// Deduplicated pool, rating-descending; rank is not meaningful here
    pub items: Vec<Movie>,
    pub phase: ExplorePhase,
}

impl ExploreResultSet {
    pub fn idle() -> Self {
        Self {
            source_genres: Vec::new(),
            items: Vec::new(),
            phase: ExplorePhase::Idle,
        }
    }
}

impl Default for ExploreResultSet {
    fn default() -> Self {
        Self::idle()
    }
}

// ============================================================================
// Recommendation service wire types
// ============================================================================

/// Response envelope used by every recommendation service endpoint
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// A movie as returned by the recommendation service
///
/// `overview`/`tagline` are only present on the recommend endpoint; the
/// browse and genre-pool endpoints omit them.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    pub title: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub votes: Option<u64>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub movie_id: Option<u64>,
}

impl From<ApiMovie> for Movie {
    fn from(api: ApiMovie) -> Self {
        Movie {
            title: api.title,
            rating: api.rating,
            vote_count: api.votes,
            genres: api.genres,
            release_year: api.release_year,
            overview: api.overview,
            tagline: api.tagline,
            source_id: api.movie_id,
        }
    }
}

/// Payload of `GET /api/recommend`
#[derive(Debug, Deserialize)]
pub struct ApiRecommendData {
    pub searched_movie: String,
    #[serde(default)]
    pub searched_genres: Vec<String>,
    #[serde(default)]
    pub searched_year: Option<i32>,
    #[serde(default)]
    pub searched_overview: Option<String>,
    #[serde(default)]
    pub searched_tagline: Option<String>,
    #[serde(default)]
    pub searched_rating: Option<f64>,
    #[serde(default)]
    pub searched_votes: Option<u64>,
    #[serde(default)]
    pub searched_movie_id: Option<u64>,
    #[serde(default)]
    pub recommendations: Vec<ApiMovie>,
}

/// A matched seed title plus its ranked recommendations
#[derive(Debug, Clone)]
pub struct MatchedSearch {
    pub matched: Movie,
    pub genres: Vec<String>,
    /// Rank order as returned upstream; must not be reordered
    pub recommendations: Vec<Movie>,
}

impl From<ApiRecommendData> for MatchedSearch {
    fn from(data: ApiRecommendData) -> Self {
        let matched = Movie {
            title: data.searched_movie,
            rating: data.searched_rating,
            vote_count: data.searched_votes,
            genres: data.searched_genres.clone(),
            release_year: data.searched_year,
            overview: data.searched_overview,
            tagline: data.searched_tagline,
            source_id: data.searched_movie_id,
        };

        MatchedSearch {
            matched,
            genres: data.searched_genres,
            recommendations: data.recommendations.into_iter().map(Movie::from).collect(),
        }
    }
}

// ============================================================================
// Poster lookup service wire types
// ============================================================================

/// Response from the poster lookup service
///
/// A missing poster comes back as the literal string "N/A" rather than an
/// absent field.
#[derive(Debug, Deserialize)]
pub struct PosterLookupResponse {
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl PosterLookupResponse {
    /// Extract a usable poster URL, treating "N/A" as absent
    pub fn into_url(self) -> Option<String> {
        match self.poster {
            Some(url) if !url.is_empty() && url != "N/A" => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  The Matrix  "), "the matrix");
        assert_eq!(normalize_title("INCEPTION"), "inception");
        assert_eq!(normalize_title(""), "");
    }

    #[test]
    fn test_api_movie_to_movie() {
        let api = ApiMovie {
            title: "Inception".to_string(),
            rating: Some(8.3),
            votes: Some(14000),
            genres: vec!["Science Fiction".to_string(), "Action".to_string()],
            release_year: Some(2010),
            overview: Some("A thief who steals corporate secrets".to_string()),
            tagline: None,
            movie_id: Some(27205),
        };

        let movie: Movie = api.into();
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.rating, Some(8.3));
        assert_eq!(movie.vote_count, Some(14000));
        assert_eq!(movie.genres.len(), 2);
        assert_eq!(movie.release_year, Some(2010));
        assert_eq!(movie.source_id, Some(27205));
    }

    #[test]
    fn test_recommend_data_deserialization() {
        let json = r#"{
            "searched_movie": "inception",
            "searched_genres": ["Science Fiction", "Action"],
            "searched_year": 2010,
            "searched_overview": "Cobb steals secrets from dreams.",
            "searched_tagline": "Your mind is the scene of the crime.",
            "searched_rating": 8.3,
            "searched_votes": 14075,
            "searched_movie_id": 27205,
            "recommendations": [
                { "title": "Interstellar", "rating": 8.1, "votes": 11000,
                  "genres": ["Adventure", "Drama"], "release_year": 2014 }
            ]
        }"#;

        let data: ApiRecommendData = serde_json::from_str(json).unwrap();
        let search: MatchedSearch = data.into();

        assert_eq!(search.matched.title, "inception");
        assert_eq!(search.matched.source_id, Some(27205));
        assert_eq!(search.genres, vec!["Science Fiction", "Action"]);
        assert_eq!(search.recommendations.len(), 1);
        assert_eq!(search.recommendations[0].title, "Interstellar");
    }

    #[test]
    fn test_recommend_data_minimal_fields() {
        // The upstream omits metadata it has no value for
        let json = r#"{ "searched_movie": "obscure film", "recommendations": [] }"#;

        let data: ApiRecommendData = serde_json::from_str(json).unwrap();
        assert_eq!(data.searched_movie, "obscure film");
        assert!(data.searched_genres.is_empty());
        assert!(data.recommendations.is_empty());
    }

    #[test]
    fn test_envelope_deserialization_error_shape() {
        let json = r#"{ "success": false, "data": null, "error": "Movie not found" }"#;
        let envelope: ApiEnvelope<ApiRecommendData> = serde_json::from_str(json).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("Movie not found"));
    }

    #[test]
    fn test_browse_envelope_deserialization() {
        // Browse endpoints return a bare movie list, without overview/tagline
        let json = r#"{
            "success": true,
            "data": [
                { "title": "The Dark Knight", "rating": 8.5, "votes": 30000,
                  "genres": ["Action", "Crime"], "release_year": 2008, "movie_id": 155 },
                { "title": "Parasite", "rating": 8.5, "votes": 12000,
                  "genres": ["Drama", "Thriller"], "release_year": 2019 }
            ],
            "error": null
        }"#;

        let envelope: ApiEnvelope<Vec<ApiMovie>> = serde_json::from_str(json).unwrap();
        let movies: Vec<Movie> = envelope
            .data
            .unwrap()
            .into_iter()
            .map(Movie::from)
            .collect();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "The Dark Knight");
        assert_eq!(movies[0].source_id, Some(155));
        assert_eq!(movies[1].overview, None);
        assert_eq!(movies[1].source_id, None);
    }

    #[test]
    fn test_poster_response_url() {
        let resp: PosterLookupResponse =
            serde_json::from_str(r#"{ "Poster": "https://img.example/inception.jpg" }"#).unwrap();
        assert_eq!(
            resp.into_url().as_deref(),
            Some("https://img.example/inception.jpg")
        );
    }

    #[test]
    fn test_poster_response_not_available() {
        let resp: PosterLookupResponse = serde_json::from_str(r#"{ "Poster": "N/A" }"#).unwrap();
        assert_eq!(resp.into_url(), None);

        let resp: PosterLookupResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(resp.into_url(), None);
    }

    #[test]
    fn test_search_result_set_loading_resets_results() {
        let set = SearchResultSet::loading("dune");
        assert_eq!(set.seed_query, "dune");
        assert_eq!(set.phase, SearchPhase::Loading);
        assert!(set.primary.is_empty());
        assert!(set.matched.is_none());
        assert!(set.failure.is_none());
    }
}
