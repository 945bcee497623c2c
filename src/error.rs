use serde::{Deserialize, Serialize};

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// User-facing classification of a failed primary search
///
/// Only the primary query surfaces failures; everything else in the pipeline
/// degrades silently. `NotFound` renders as an empty state with suggested
/// queries, `Unavailable` as a generic retry message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchErrorKind {
    NotFound,
    Unavailable,
}

impl AppError {
    /// Classify an error for display against a failed search
    pub fn search_error_kind(&self) -> SearchErrorKind {
        match self {
            AppError::NotFound(_) => SearchErrorKind::NotFound,
            _ => SearchErrorKind::Unavailable,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classifies_as_not_found() {
        let err = AppError::NotFound("Movie not found".to_string());
        assert_eq!(err.search_error_kind(), SearchErrorKind::NotFound);
    }

    #[test]
    fn test_other_errors_classify_as_unavailable() {
        let err = AppError::ExternalApi("API returned status 502".to_string());
        assert_eq!(err.search_error_kind(), SearchErrorKind::Unavailable);

        let err = AppError::Internal("join error".to_string());
        assert_eq!(err.search_error_kind(), SearchErrorKind::Unavailable);
    }
}
