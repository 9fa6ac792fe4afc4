//! # Scoreboard Engine
//!
//! Leaderboard engine for the Scoreboard web app:
//! - Remote scores API client (list, submit, edit, delete)
//! - Pure ranked/filtered/bounded leaderboard views
//! - Optimistic score-list state applied after confirmed API calls
//! - Social share links
//! - Profile management delegated to an external identity provider
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scoreboard_engine::{FilterState, HttpScoresFetcher, ScoreboardEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = Arc::new(HttpScoresFetcher::new("https://api.example.com/scores")?);
//!     let engine = ScoreboardEngine::new(fetcher);
//!
//!     let filter = FilterState::new("ada", None);
//!     let view = engine.leaderboard(&filter).await?;
//!
//!     for entry in &view.entries {
//!         println!("#{} {} - {}", entry.rank, entry.record.username, entry.record.score);
//!     }
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod profile;
pub mod ranking;
pub mod share;
pub mod state;

// Re-export primary types
pub use crate::core::{LeaderboardView, RankedEntry, ScoreRecord};
pub use engine::ScoreboardEngine;
pub use error::{Result, ScoreboardError};
pub use fetch::{HttpScoresFetcher, NewScore, ScoresFetcher};
pub use profile::{AvatarImage, HttpIdentityProvider, IdentityProvider, ProfileUpdate};
pub use ranking::{ranked_view, FilterState, RankPolicy, DISPLAY_LIMIT};
pub use share::{share_url, ShareTarget};
pub use state::{ScoreListAction, ScoreListState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
