use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::core::ScoreRecord;
use crate::error::{Result, ScoreboardError};
use crate::fetch::{NewScore, ScoresFetcher};

/// Scores API client over HTTP
pub struct HttpScoresFetcher {
    client: Client,
    base_url: String,
}

impl HttpScoresFetcher {
    /// Create a new fetcher against a base endpoint, e.g.
    /// `https://api.example.com/scores`
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn record_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn fetch_list(&self, url: &str) -> Result<Vec<ScoreRecord>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoreboardError::Api {
                status: status.as_u16(),
                message: format!("GET {} failed", url),
            });
        }

        let rows: Vec<Value> = response.json().await?;
        Ok(coerce_records(rows))
    }
}

/// Coerce raw API rows into score records, dropping rows that cannot be
/// ranked (missing or non-numeric `score`, missing `id`) instead of
/// failing the whole fetch
fn coerce_records(rows: Vec<Value>) -> Vec<ScoreRecord> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<ScoreRecord>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Dropping malformed score row: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl ScoresFetcher for HttpScoresFetcher {
    async fn fetch_all(&self) -> Result<Vec<ScoreRecord>> {
        let records = self.fetch_list(&self.base_url).await?;
        tracing::debug!("Fetched {} score records", records.len());
        Ok(records)
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Vec<ScoreRecord>> {
        let url = format!("{}?email={}", self.base_url, urlencoding::encode(email));
        self.fetch_list(&url).await
    }

    async fn add(&self, score: NewScore) -> Result<ScoreRecord> {
        let response = self
            .client
            .post(&self.base_url)
            .json(&score)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoreboardError::Api {
                status: status.as_u16(),
                message: "Score submission rejected".to_string(),
            });
        }

        Ok(response.json().await?)
    }

    async fn update(&self, id: i64, score: i64) -> Result<ScoreRecord> {
        let response = self
            .client
            .put(self.record_url(id))
            .json(&serde_json::json!({ "score": score }))
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScoreboardError::ScoreNotFound(id));
        }
        if !status.is_success() {
            return Err(ScoreboardError::Api {
                status: status.as_u16(),
                message: format!("Score {} update rejected", id),
            });
        }

        Ok(response.json().await?)
    }

    async fn remove(&self, id: i64) -> Result<()> {
        let response = self.client.delete(self.record_url(id)).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScoreboardError::ScoreNotFound(id));
        }
        if !status.is_success() {
            return Err(ScoreboardError::Api {
                status: status.as_u16(),
                message: format!("Score {} delete rejected", id),
            });
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }

    async fn is_available(&self) -> bool {
        self.fetch_all().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_drops_malformed_rows() {
        let rows = vec![
            json!({"id": 1, "username": "al", "score": 50}),
            json!({"id": 2, "username": "bo", "score": "not a number"}),
            json!({"username": "no-id", "score": 10}),
            json!({"id": 4, "username": "cy", "score": 90}),
        ];

        let records = coerce_records(rows);
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 4]);
    }

    #[test]
    fn test_coerce_keeps_rows_with_missing_optionals() {
        let rows = vec![json!({"id": 7, "score": 12})];
        let records = coerce_records(rows);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].username, "");
        assert!(records[0].avatar().is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let fetcher = HttpScoresFetcher::new("https://api.example.com/scores/").unwrap();
        assert_eq!(fetcher.record_url(3), "https://api.example.com/scores/3");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_all_live() {
        let base = std::env::var("SCORES_API_URL").expect("SCORES_API_URL not set");
        let fetcher = HttpScoresFetcher::new(base).unwrap();
        let records = fetcher.fetch_all().await.unwrap();
        assert!(records.iter().all(|r| r.id >= 0));
    }
}
