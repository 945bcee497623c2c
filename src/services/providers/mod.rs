/// Upstream data source abstractions
///
/// The pipeline talks to two independent services: a recommendation API
/// (seed-title ranked lists, genre pools, browse feeds, search-history
/// logging) and a poster lookup API. Each sits behind a trait so the
/// orchestrator and cache can be exercised against test doubles.
use crate::{
    error::AppResult,
    models::{MatchedSearch, Movie, UserId},
};

pub mod omdb;
pub mod rec_api;

pub use omdb::OmdbProvider;
pub use rec_api::RecApiProvider;

/// Trait for the recommendation service
///
/// All list-returning calls preserve upstream ordering; `recommend` is the
/// only rank-significant one.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Resolve a seed title to its canonical match plus ranked recommendations
    ///
    /// An upstream "no match" surfaces as `AppError::NotFound` carrying the
    /// upstream message.
    async fn recommend(&self, seed: &str) -> AppResult<MatchedSearch>;

    /// Unranked pool of titles sharing any of the given genres
    ///
    /// `exclude` is forwarded upstream so the pool omits that title.
    async fn movies_by_genres(&self, genres: &[String], exclude: &str) -> AppResult<Vec<Movie>>;

    /// Most-voted titles for the browse surface
    async fn popular(&self) -> AppResult<Vec<Movie>>;

    /// Most recently released titles for the browse surface
    async fn recent(&self) -> AppResult<Vec<Movie>>;

    /// Personalized picks; absence of a user id yields a generic list
    async fn for_you(&self, user_id: Option<UserId>) -> AppResult<Vec<Movie>>;

    /// Record a completed search against the user's history
    ///
    /// Callers treat this as fire-and-forget; a failure must never affect
    /// displayed state.
    async fn log_search(&self, user_id: UserId, title: &str) -> AppResult<()>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for the poster lookup service
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Look up a poster image URL for a title
    ///
    /// `Ok(None)` means the service answered but has no poster. Transport
    /// errors are returned as-is; the cache layer absorbs them.
    async fn lookup_poster(&self, title: &str) -> AppResult<Option<String>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
