//! Search orchestration
//!
//! Sequences the primary recommendation fetch, the genre-driven explore
//! fetch, and the fire-and-forget history log, while suppressing stale
//! responses: every fetch is tagged with the generation it was issued for
//! and its result is dropped at commit time if a newer query has since been
//! submitted. The underlying HTTP calls are never cancelled.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::cache::PosterCache;
use crate::error::{AppError, AppResult};
use crate::models::{
    ExplorePhase, ExploreResultSet, MatchedSearch, Movie, SearchFailure, SearchPhase,
    SearchResultSet, UserId,
};
use crate::services::merge::merge;
use crate::services::providers::RecommendationProvider;

/// Genre → representative seed title for explore fetches
///
/// Closed configuration table; genres without an entry are silently skipped.
const GENRE_SEEDS: &[(&str, &str)] = &[
    ("Action", "mad max fury road"),
    ("Adventure", "indiana jones"),
    ("Animation", "toy story"),
    ("Comedy", "superbad"),
    ("Crime", "pulp fiction"),
    ("Documentary", "planet earth"),
    ("Drama", "the shawshank redemption"),
    ("Family", "home alone"),
    ("Fantasy", "lord of the rings"),
    ("History", "gladiator"),
    ("Horror", "the shining"),
    ("Music", "whiplash"),
    ("Mystery", "knives out"),
    ("Romance", "titanic"),
    ("Science Fiction", "interstellar"),
    ("Thriller", "gone girl"),
    ("War", "saving private ryan"),
    ("Western", "django unchained"),
];

/// How many genre seeds an explore fetch queries in parallel
const EXPLORE_SEED_CAP: usize = 2;

const UNAVAILABLE_MESSAGE: &str =
    "Recommendations are temporarily unavailable. Please try again.";

/// Representative seed title for a genre, if one is configured
pub fn seed_for_genre(genre: &str) -> Option<&'static str> {
    GENRE_SEEDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(genre))
        .map(|(_, seed)| *seed)
}

/// Await every branch, keep the successes, log the failures
///
/// A failed branch contributes nothing; the join itself never fails.
pub(crate) async fn settle_all<T>(handles: Vec<JoinHandle<AppResult<T>>>) -> Vec<T> {
    let mut settled = Vec::with_capacity(handles.len());
    let mut failed = 0usize;

    for handle in handles {
        match handle.await {
            Ok(Ok(value)) => settled.push(value),
            Ok(Err(e)) => {
                failed += 1;
                tracing::warn!(error = %e, "Explore branch failed");
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(error = %e, "Explore task join error");
            }
        }
    }

    if failed > 0 {
        tracing::warn!(
            success_count = settled.len(),
            error_count = failed,
            "Partial explore fetch failure"
        );
    }

    settled
}

/// Stateful controller over one search view
///
/// Holds exactly one current `SearchResultSet` (plus its derived explore
/// set) at a time. All state transitions are synchronous; suspension only
/// happens at upstream call boundaries.
pub struct SearchOrchestrator {
    recommender: Arc<dyn RecommendationProvider>,
    posters: Arc<PosterCache>,
    user_id: Option<UserId>,
    generation: AtomicU64,
    state: RwLock<SearchResultSet>,
    explore: RwLock<ExploreResultSet>,
}

impl SearchOrchestrator {
    pub fn new(
        recommender: Arc<dyn RecommendationProvider>,
        posters: Arc<PosterCache>,
        user_id: Option<UserId>,
    ) -> Self {
        Self {
            recommender,
            posters,
            user_id,
            generation: AtomicU64::new(0),
            state: RwLock::new(SearchResultSet::idle()),
            explore: RwLock::new(ExploreResultSet::idle()),
        }
    }

    /// The shared poster cache this orchestrator was built with
    pub fn poster_cache(&self) -> &Arc<PosterCache> {
        &self.posters
    }

    /// Submit a new seed query
    ///
    /// Immediately resets to `Loading` under a fresh generation, which
    /// invalidates any in-flight fetch: a superseded response is discarded
    /// at commit time rather than overwriting newer state.
    pub async fn submit_query(&self, seed: &str) {
        let generation = {
            let mut state = self.state.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SearchResultSet::loading(seed);
            *self.explore.write().await = ExploreResultSet::idle();
            generation
        };

        let result = self.recommender.recommend(seed).await;

        let logged_title = {
            let mut state = self.state.write().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(seed = %seed, "Discarding stale search response");
                return;
            }

            match result {
                Ok(search) => {
                    let MatchedSearch {
                        matched,
                        genres,
                        recommendations,
                    } = search;
                    let title = matched.title.clone();

                    state.matched = Some(matched);
                    state.primary = recommendations;
                    state.genres = genres;
                    state.phase = SearchPhase::Loaded;
                    state.failure = None;
                    state.fetched_at = Some(Utc::now());

                    tracing::info!(
                        seed = %seed,
                        matched = %title,
                        results = state.primary.len(),
                        "Search loaded"
                    );
                    Some(title)
                }
                Err(e) => {
                    tracing::warn!(seed = %seed, error = %e, "Primary search failed");
                    let message = match &e {
                        AppError::NotFound(msg) => msg.clone(),
                        _ => UNAVAILABLE_MESSAGE.to_string(),
                    };
                    *state = SearchResultSet {
                        phase: SearchPhase::Failed,
                        failure: Some(SearchFailure {
                            kind: e.search_error_kind(),
                            message,
                        }),
                        ..SearchResultSet::loading(seed)
                    };
                    None
                }
            }
        };

        // History logging never blocks or fails the search itself
        if let (Some(title), Some(user_id)) = (logged_title, self.user_id) {
            let recommender = Arc::clone(&self.recommender);
            tokio::spawn(async move {
                if let Err(e) = recommender.log_search(user_id, &title).await {
                    tracing::debug!(error = %e, "Search history log failed");
                }
            });
        }
    }

    /// Fetch the genre-driven explore set for the current loaded search
    ///
    /// Maps the searched genres through the seed table (unmapped genres are
    /// skipped), queries up to two representative seeds in parallel with a
    /// settle-all join, and merges the survivors minus everything already
    /// shown. Does nothing unless the primary search is loaded with at least
    /// one mapped genre.
    pub async fn fetch_explore(&self) {
        let (generation, genres, exclude) = {
            let state = self.state.read().await;
            if state.phase != SearchPhase::Loaded || state.genres.is_empty() {
                return;
            }

            let mut exclude: HashSet<String> =
                state.primary.iter().map(|m| m.normalized_title()).collect();
            if let Some(matched) = &state.matched {
                exclude.insert(matched.normalized_title());
            }

            (
                self.generation.load(Ordering::SeqCst),
                state.genres.clone(),
                exclude,
            )
        };

        let seeds: Vec<&'static str> = genres
            .iter()
            .filter_map(|g| seed_for_genre(g))
            .take(EXPLORE_SEED_CAP)
            .collect();
        if seeds.is_empty() {
            return;
        }

        {
            let mut explore = self.explore.write().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                return;
            }
            explore.source_genres = genres;
            explore.items.clear();
            explore.phase = ExplorePhase::Loading;
        }

        let mut handles: Vec<JoinHandle<AppResult<MatchedSearch>>> =
            Vec::with_capacity(seeds.len());
        for seed in seeds {
            let recommender = Arc::clone(&self.recommender);
            handles.push(tokio::spawn(
                async move { recommender.recommend(seed).await },
            ));
        }

        let lists: Vec<Vec<Movie>> = settle_all(handles)
            .await
            .into_iter()
            .map(|search| search.recommendations)
            .collect();

        let mut items = merge(&lists, &exclude);
        // Rating order is applied here, after the order-preserving dedup
        items.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        });

        let mut explore = self.explore.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Discarding stale explore response");
            return;
        }
        explore.items = items;
        explore.phase = ExplorePhase::Loaded;

        tracing::info!(
            genres = ?explore.source_genres,
            items = explore.items.len(),
            "Explore fetch completed"
        );
    }

    /// Clone of the current primary search state
    pub async fn snapshot(&self) -> SearchResultSet {
        self.state.read().await.clone()
    }

    /// Clone of the current explore state
    pub async fn explore_snapshot(&self) -> ExploreResultSet {
        self.explore.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_for_genre_known() {
        assert_eq!(seed_for_genre("Science Fiction"), Some("interstellar"));
        assert_eq!(seed_for_genre("Action"), Some("mad max fury road"));
    }

    #[test]
    fn test_seed_for_genre_case_insensitive() {
        assert_eq!(seed_for_genre("science fiction"), Some("interstellar"));
        assert_eq!(seed_for_genre("HORROR"), Some("the shining"));
    }

    #[test]
    fn test_seed_for_genre_unmapped() {
        assert_eq!(seed_for_genre("Telenovela"), None);
        assert_eq!(seed_for_genre(""), None);
    }

    #[tokio::test]
    async fn test_settle_all_keeps_successes_only() {
        let handles: Vec<JoinHandle<AppResult<u32>>> = vec![
            tokio::spawn(async { Ok(1u32) }),
            tokio::spawn(async { Err(AppError::ExternalApi("boom".to_string())) }),
            tokio::spawn(async { Ok(3u32) }),
        ];

        let settled = settle_all(handles).await;
        assert_eq!(settled, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_settle_all_tolerates_total_failure() {
        let handles: Vec<JoinHandle<AppResult<u32>>> = vec![
            tokio::spawn(async { Err(AppError::ExternalApi("down".to_string())) }),
            tokio::spawn(async { Err(AppError::NotFound("nothing".to_string())) }),
        ];

        let settled = settle_all(handles).await;
        assert!(settled.is_empty());
    }
}
