pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::ScoreRecord;
use crate::error::Result;

pub use http::HttpScoresFetcher;

/// Payload for submitting a new score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewScore {
    pub username: String,
    pub score: i64,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(default)]
    pub email: String,
}

impl NewScore {
    /// Build a submission stamped with the current UTC time
    pub fn now(
        username: impl Into<String>,
        score: i64,
        photo_url: Option<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            score,
            photo_url,
            created_at: chrono::Utc::now().to_rfc3339(),
            email: email.into(),
        }
    }
}

/// Trait for scores API clients.
///
/// List operations hand back only well-formed records; rejecting or
/// coercing malformed rows happens here, never downstream in ranking.
#[async_trait]
pub trait ScoresFetcher: Send + Sync {
    /// Fetch every score record, in whatever order the API returns them
    async fn fetch_all(&self) -> Result<Vec<ScoreRecord>>;

    /// Fetch the records owned by one email address
    async fn fetch_by_email(&self, email: &str) -> Result<Vec<ScoreRecord>>;

    /// Submit a new score, returning the stored record with its assigned ID
    async fn add(&self, score: NewScore) -> Result<ScoreRecord>;

    /// Change an existing score's value, returning the updated record
    async fn update(&self, id: i64, score: i64) -> Result<ScoreRecord>;

    /// Delete a score record
    async fn remove(&self, id: i64) -> Result<()>;

    /// Get fetcher name for logging
    fn name(&self) -> &str;

    /// Check if the scores API is reachable
    async fn is_available(&self) -> bool;
}
