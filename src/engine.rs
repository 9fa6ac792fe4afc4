use std::sync::Arc;
use std::time::Instant;

use crate::core::{LeaderboardView, ScoreRecord};
use crate::error::{Result, ScoreboardError};
use crate::fetch::{NewScore, ScoresFetcher};
use crate::profile::{AvatarImage, IdentityProvider, ProfileUpdate};
use crate::ranking::{self, FilterState, RankPolicy};
use crate::state::{ScoreListAction, ScoreListState};

/// Main scoreboard orchestrator: fetches records, derives leaderboard
/// views, and drives score mutations through the local list state
pub struct ScoreboardEngine {
    fetcher: Arc<dyn ScoresFetcher>,
    identity: Option<Arc<dyn IdentityProvider>>,
    policy: RankPolicy,
}

impl ScoreboardEngine {
    pub fn new(fetcher: Arc<dyn ScoresFetcher>) -> Self {
        Self {
            fetcher,
            identity: None,
            policy: RankPolicy::default(),
        }
    }

    /// Set the rank numbering policy
    pub fn with_policy(mut self, policy: RankPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attach an identity provider for profile operations
    pub fn with_identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(provider);
        self
    }

    pub fn policy(&self) -> RankPolicy {
        self.policy
    }

    /// Fetch all records and derive the leaderboard view for the given
    /// filter
    pub async fn leaderboard(&self, filter: &FilterState) -> Result<LeaderboardView> {
        let start = Instant::now();

        let records = self.fetcher.fetch_all().await?;
        let view = self.build_view(&records, filter, start);

        tracing::debug!(
            total = view.total_records,
            matching = view.matching_records,
            shown = view.entries.len(),
            "Leaderboard view computed"
        );
        Ok(view)
    }

    /// Like [`leaderboard`](Self::leaderboard), but a fetch failure
    /// degrades to an empty view instead of an error, so the page can
    /// render its empty state while the failure is logged
    pub async fn leaderboard_or_empty(&self, filter: &FilterState) -> LeaderboardView {
        let start = Instant::now();

        let records = match self.fetcher.fetch_all().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Scores fetch failed, rendering empty leaderboard: {}", e);
                Vec::new()
            }
        };

        self.build_view(&records, filter, start)
    }

    fn build_view(
        &self,
        records: &[ScoreRecord],
        filter: &FilterState,
        start: Instant,
    ) -> LeaderboardView {
        let entries = ranking::ranked_view(records, filter, self.policy);
        let matching_records = records
            .iter()
            .filter(|r| ranking::matches_filter(r, filter))
            .count();

        LeaderboardView {
            entries,
            total_records: records.len(),
            matching_records,
            policy: self.policy,
            latency_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }

    /// Fetch one user's scores into a fresh list state
    pub async fn my_scores(&self, email: &str) -> Result<ScoreListState> {
        let records = self.fetcher.fetch_by_email(email).await?;
        Ok(ScoreListState::new(records))
    }

    /// Submit a new score. The list state is updated only once the API
    /// confirms the record; on failure it is left untouched.
    pub async fn submit_score(
        &self,
        state: &mut ScoreListState,
        score: NewScore,
    ) -> Result<ScoreRecord> {
        let stored = self.fetcher.add(score).await?;
        state.apply(ScoreListAction::Added(stored.clone()));

        tracing::info!(id = stored.id, score = stored.score, "Score submitted");
        Ok(stored)
    }

    /// Change an existing score's value, syncing the list state on
    /// success only
    pub async fn edit_score(
        &self,
        state: &mut ScoreListState,
        id: i64,
        score: i64,
    ) -> Result<ScoreRecord> {
        let updated = self.fetcher.update(id, score).await?;
        state.apply(ScoreListAction::Updated(updated.clone()));

        tracing::info!(id, score, "Score updated");
        Ok(updated)
    }

    /// Delete a score, syncing the list state on success only
    pub async fn remove_score(&self, state: &mut ScoreListState, id: i64) -> Result<()> {
        self.fetcher.remove(id).await?;
        state.apply(ScoreListAction::Removed(id));

        tracing::info!(id, "Score removed");
        Ok(())
    }

    /// Forward a profile update to the identity provider
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        self.identity()?.update_profile(update).await
    }

    /// Forward an avatar upload to the identity provider
    pub async fn set_avatar(&self, image: AvatarImage) -> Result<()> {
        self.identity()?.set_avatar(image).await
    }

    fn identity(&self) -> Result<&Arc<dyn IdentityProvider>> {
        self.identity.as_ref().ok_or_else(|| {
            ScoreboardError::Identity("No identity provider configured".to_string())
        })
    }
}
