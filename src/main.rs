use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cinefeed::cache::PosterCache;
use cinefeed::config::Config;
use cinefeed::models::SearchPhase;
use cinefeed::services::feed::FeedCursor;
use cinefeed::services::gradient::gradient_for;
use cinefeed::services::match_score::rank_movies;
use cinefeed::services::providers::{OmdbProvider, RecApiProvider};
use cinefeed::services::search::SearchOrchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.is_empty() {
        eprintln!("usage: cinefeed <movie title>");
        std::process::exit(2);
    }

    let config = Config::from_env()?;

    let recommender = Arc::new(RecApiProvider::new(config.recommend_api_url.clone()));
    let posters = Arc::new(PosterCache::new(Arc::new(OmdbProvider::new(
        config.poster_api_url.clone(),
        config.poster_api_key.clone(),
    ))));
    let orchestrator = SearchOrchestrator::new(recommender, Arc::clone(&posters), None);

    orchestrator.submit_query(&query).await;
    let state = orchestrator.snapshot().await;

    match state.phase {
        SearchPhase::Failed => {
            if let Some(failure) = state.failure {
                println!("search failed ({:?}): {}", failure.kind, failure.message);
            }
            return Ok(());
        }
        SearchPhase::Loaded => {}
        _ => return Ok(()),
    }

    if let Some(matched) = &state.matched {
        println!(
            "Results for '{}' [{}]",
            matched.title,
            state.genres.join(", ")
        );
    }

    println!("\nTop recommendations:");
    for ranked in rank_movies(&state.primary, config.primary_display_cap) {
        let poster = orchestrator.poster_cache().resolve(&ranked.movie.title).await;
        let art = poster.unwrap_or_else(|| gradient_for(&ranked.movie.title).css());
        println!(
            "{:>2}. {:<42} {:>3}% ({:?})  {}",
            ranked.rank, ranked.movie.title, ranked.percent, ranked.tier, art
        );
    }

    orchestrator.fetch_explore().await;
    let explore = orchestrator.explore_snapshot().await;
    if explore.items.is_empty() {
        return Ok(());
    }

    println!(
        "\nExplore more · {}",
        explore.source_genres.join(" & ")
    );
    let mut cursor = FeedCursor::new();
    cursor.reveal(config.page_size);
    for movie in cursor.visible(&explore.items) {
        let rating = movie
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "—".to_string());
        println!("  - {} ({})", movie.title, rating);
    }
    if cursor.has_more(&explore.items) {
        println!(
            "  … and {} more",
            explore.items.len() - cursor.revealed()
        );
    }

    Ok(())
}
