pub mod view;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use view::{matches_filter, ranked_view};

/// Maximum number of entries a leaderboard view ever displays
pub const DISPLAY_LIMIT: usize = 15;

/// Transient search criteria applied to the ranking order before display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive literal substring matched against `username`;
    /// empty matches everything
    #[serde(default)]
    pub search_term: String,

    /// Inclusive lower bound on `score`; `Some(0)` is a real bound,
    /// `None` means no bound
    #[serde(default)]
    pub min_score: Option<i64>,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, min_score: Option<i64>) -> Self {
        Self {
            search_term: search_term.into(),
            min_score,
        }
    }
}

/// How rank numbers relate to the filter.
///
/// Two revisions of the leaderboard page numbered ranks differently, so
/// the choice is a policy rather than a constant: `Unfiltered` keeps the
/// record's position in the full sorted list even when the filter narrows
/// the display, `Filtered` renumbers within the visible set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankPolicy {
    /// Rank is the position in the full sorted list (the default)
    #[default]
    Unfiltered,
    /// Rank is the position within the filtered sequence
    Filtered,
}

impl FromStr for RankPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unfiltered" => Ok(RankPolicy::Unfiltered),
            "filtered" => Ok(RankPolicy::Filtered),
            other => Err(format!(
                "Unknown rank policy '{}', expected 'unfiltered' or 'filtered'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_policy_parse() {
        assert_eq!("filtered".parse::<RankPolicy>(), Ok(RankPolicy::Filtered));
        assert_eq!(
            "UNFILTERED".parse::<RankPolicy>(),
            Ok(RankPolicy::Unfiltered)
        );
        assert!("best".parse::<RankPolicy>().is_err());
    }

    #[test]
    fn test_filter_state_default_matches_everything() {
        let filter = FilterState::default();
        assert!(filter.search_term.is_empty());
        assert!(filter.min_score.is_none());
    }
}
