use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Deserialize a score from int or numeric string (older API rows stored
/// the value as a string)
fn deserialize_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ScoreValue {
        Int(i64),
        String(String),
    }

    match ScoreValue::deserialize(deserializer)? {
        ScoreValue::Int(i) => Ok(i),
        ScoreValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::custom(format!("Invalid score string: {}", s))),
    }
}

/// A single score submission as returned by the scores API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Unique record ID assigned by the API
    pub id: i64,

    /// Display name of the submitter; not unique across records
    #[serde(default)]
    pub username: String,

    /// The ranking key
    #[serde(deserialize_with = "deserialize_score")]
    pub score: i64,

    /// Avatar image URL; absent or empty renders a placeholder
    #[serde(default)]
    pub photo_url: Option<String>,

    /// ISO 8601 submission timestamp, display only
    #[serde(rename = "createdAt", default)]
    pub created_at: String,

    /// Owner's email, used for the server-side "my scores" filter
    #[serde(default)]
    pub email: String,
}

impl ScoreRecord {
    /// Create a new ScoreRecord with required fields
    pub fn new(id: i64, username: impl Into<String>, score: i64) -> Self {
        Self {
            id,
            username: username.into(),
            score,
            photo_url: None,
            created_at: Utc::now().to_rfc3339(),
            email: String::new(),
        }
    }

    /// Avatar URL if one is set; empty strings count as unset
    pub fn avatar(&self) -> Option<&str> {
        self.photo_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Submission date formatted for display ("YYYY-MM-DD"), falling back
    /// to the raw timestamp when it does not parse
    pub fn submitted_date(&self) -> String {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.date_naive())
            .or_else(|_| self.created_at.parse::<NaiveDate>())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}
