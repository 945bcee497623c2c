use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Recommendation service base URL
    #[serde(default = "default_recommend_api_url")]
    pub recommend_api_url: String,

    /// Poster lookup service base URL
    #[serde(default = "default_poster_api_url")]
    pub poster_api_url: String,

    /// Poster lookup API key
    #[serde(default = "default_poster_api_key")]
    pub poster_api_key: String,

    /// Number of primary results shown with a match badge
    #[serde(default = "default_primary_display_cap")]
    pub primary_display_cap: usize,

    /// Page size for incrementally revealed feeds
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_recommend_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_poster_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_poster_api_key() -> String {
    // Free demo key; override with POSTER_API_KEY
    "trilogy".to_string()
}

fn default_primary_display_cap() -> usize {
    10
}

fn default_page_size() -> usize {
    12
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
