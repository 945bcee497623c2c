/// Recommendation API provider
///
/// Talks to the in-house recommendation service. Every endpoint wraps its
/// payload in a `{ success, data, error }` envelope; a seed title with no
/// close match comes back as a 404 whose envelope carries the user-facing
/// message.
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{ApiEnvelope, ApiMovie, ApiRecommendData, MatchedSearch, Movie, UserId},
    services::providers::RecommendationProvider,
};

#[derive(Clone)]
pub struct RecApiProvider {
    http_client: HttpClient,
    api_url: String,
}

impl RecApiProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    /// Shared fetch for the endpoints that return a plain movie list
    async fn fetch_movie_list(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> AppResult<Vec<Movie>> {
        let response = self.http_client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Recommendation API returned status {}: {}",
                status, body
            )));
        }

        let ApiEnvelope { data, error, .. } =
            response.json::<ApiEnvelope<Vec<ApiMovie>>>().await?;

        let movies = data.ok_or_else(|| {
            AppError::ExternalApi(
                error.unwrap_or_else(|| "Recommendation API response missing data".to_string()),
            )
        })?;

        Ok(movies.into_iter().map(Movie::from).collect())
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for RecApiProvider {
    async fn recommend(&self, seed: &str) -> AppResult<MatchedSearch> {
        if seed.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Seed title cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/api/recommend", self.api_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("movie", seed)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let message = response
                .json::<ApiEnvelope<ApiRecommendData>>()
                .await
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| "No results found for this title.".to_string());
            return Err(AppError::NotFound(message));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Recommendation API returned status {}: {}",
                status, body
            )));
        }

        let ApiEnvelope { data, error, .. } =
            response.json::<ApiEnvelope<ApiRecommendData>>().await?;

        let data = data.ok_or_else(|| {
            AppError::ExternalApi(
                error.unwrap_or_else(|| "Recommendation API response missing data".to_string()),
            )
        })?;

        let search = MatchedSearch::from(data);

        tracing::info!(
            seed = %seed,
            matched = %search.matched.title,
            results = search.recommendations.len(),
            provider = "rec_api",
            "Recommendation fetch completed"
        );

        Ok(search)
    }

    async fn movies_by_genres(&self, genres: &[String], exclude: &str) -> AppResult<Vec<Movie>> {
        if genres.is_empty() {
            return Err(AppError::InvalidInput(
                "At least one genre is required".to_string(),
            ));
        }

        let url = format!("{}/api/movies/by-genres", self.api_url);
        let movies = self
            .fetch_movie_list(
                url,
                &[
                    ("genres", genres.join(",")),
                    ("exclude", exclude.to_string()),
                ],
            )
            .await?;

        tracing::info!(
            genres = ?genres,
            results = movies.len(),
            provider = "rec_api",
            "Genre pool fetch completed"
        );

        Ok(movies)
    }

    async fn popular(&self) -> AppResult<Vec<Movie>> {
        let url = format!("{}/api/movies/popular", self.api_url);
        self.fetch_movie_list(url, &[]).await
    }

    async fn recent(&self) -> AppResult<Vec<Movie>> {
        let url = format!("{}/api/movies/recent", self.api_url);
        self.fetch_movie_list(url, &[]).await
    }

    async fn for_you(&self, user_id: Option<UserId>) -> AppResult<Vec<Movie>> {
        let url = format!("{}/api/movies/for-you", self.api_url);
        let query = match user_id {
            Some(id) => vec![("user_id", id.to_string())],
            None => Vec::new(),
        };
        self.fetch_movie_list(url, &query).await
    }

    async fn log_search(&self, user_id: UserId, title: &str) -> AppResult<()> {
        let url = format!("{}/api/log-search", self.api_url);
        let response = self
            .http_client
            .post(&url)
            .json(&json!({
                "user_id": user_id,
                "movie_title": title,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Search log returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "rec_api"
    }
}
