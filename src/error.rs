use thiserror::Error;

/// Main error type for the scoreboard engine
#[derive(Error, Debug)]
pub enum ScoreboardError {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scores API rejected the call
    #[error("Scores API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Identity provider errors (profile update, avatar upload)
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// Referenced score does not exist
    #[error("Score {0} not found")]
    ScoreNotFound(i64),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for ScoreboardError {
    fn from(s: String) -> Self {
        ScoreboardError::Other(s)
    }
}

impl From<&str> for ScoreboardError {
    fn from(s: &str) -> Self {
        ScoreboardError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ScoreboardError>;
