use serde::{Deserialize, Serialize};

use crate::core::ScoreRecord;
use crate::ranking::RankPolicy;

/// A score record paired with its computed leaderboard position
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based position in the ranking order
    pub rank: usize,

    #[serde(flatten)]
    pub record: ScoreRecord,
}

impl RankedEntry {
    pub fn new(rank: usize, record: ScoreRecord) -> Self {
        Self { rank, record }
    }
}

/// Leaderboard response with display entries and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardView {
    /// Ranked, filtered entries, at most `ranking::DISPLAY_LIMIT` of them
    pub entries: Vec<RankedEntry>,

    /// Total records fetched, before any filtering
    pub total_records: usize,

    /// Records passing the filter, before truncation
    pub matching_records: usize,

    /// Rank numbering policy used to build the view
    pub policy: RankPolicy,

    /// Time spent fetching and ranking, in milliseconds
    pub latency_ms: f64,
}

impl LeaderboardView {
    /// True when the upstream list itself was empty (or the fetch was
    /// substituted with an empty list); distinct from a filter matching
    /// nothing
    pub fn is_empty_upstream(&self) -> bool {
        self.total_records == 0
    }

    /// True when records exist but none pass the current filter
    pub fn no_matches(&self) -> bool {
        self.total_records > 0 && self.matching_records == 0
    }

    /// Message for an empty table, mirroring the page copy
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.is_empty_upstream() {
            Some("No scores submitted yet")
        } else if self.no_matches() {
            Some("User not in the leaderboard")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(total: usize, matching: usize) -> LeaderboardView {
        LeaderboardView {
            entries: Vec::new(),
            total_records: total,
            matching_records: matching,
            policy: RankPolicy::Unfiltered,
            latency_ms: 0.1,
        }
    }

    #[test]
    fn test_empty_upstream_vs_no_matches() {
        assert_eq!(view(0, 0).empty_message(), Some("No scores submitted yet"));
        assert_eq!(
            view(8, 0).empty_message(),
            Some("User not in the leaderboard")
        );
        assert_eq!(view(8, 3).empty_message(), None);
    }

    #[test]
    fn test_ranked_entry_serializes_flat() {
        let entry = RankedEntry::new(2, ScoreRecord::new(9, "al", 50));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["rank"], 2);
        assert_eq!(json["username"], "al");
        assert_eq!(json["score"], 50);
    }
}
