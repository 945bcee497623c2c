/// OMDb poster provider
///
/// Looks up poster art by title. The API reports a missing poster either as
/// `"Poster": "N/A"` or by omitting the field; both read as "no poster".
use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::PosterLookupResponse,
    services::providers::PosterProvider,
};

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
}

impl OmdbProvider {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl PosterProvider for OmdbProvider {
    async fn lookup_poster(&self, title: &str) -> AppResult<Option<String>> {
        if title.trim().is_empty() {
            return Ok(None);
        }

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("t", title),
                ("type", "movie"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Poster API returned status {}",
                response.status()
            )));
        }

        let lookup: PosterLookupResponse = response.json().await?;
        let url = lookup.into_url();

        tracing::debug!(
            title = %title,
            found = url.is_some(),
            provider = "omdb",
            "Poster lookup completed"
        );

        Ok(url)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_title_short_circuits() {
        let provider = OmdbProvider::new("http://test.local".to_string(), "key".to_string());
        // No network call is made for a blank title
        let result = provider.lookup_poster("  ").await.unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_provider_name() {
        let provider = OmdbProvider::new("http://test.local".to_string(), "key".to_string());
        assert_eq!(provider.name(), "omdb");
    }
}
