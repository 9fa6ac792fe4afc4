//! Pure derivation of the displayed leaderboard from raw score records.
//!
//! Ranking order is score descending with a stable sort, so records with
//! equal scores keep their fetch order. Ties get distinct consecutive
//! ranks rather than shared competition ranks. The filter narrows the
//! visible set; whether it also renumbers ranks is a [`RankPolicy`]
//! decision. The result is truncated to [`DISPLAY_LIMIT`] entries.

use crate::core::{RankedEntry, ScoreRecord};
use crate::ranking::{FilterState, RankPolicy, DISPLAY_LIMIT};

/// Whether a record passes the display filter.
///
/// The search term is a literal substring, matched case-insensitively
/// against `username`; regex metacharacters have no special meaning.
pub fn matches_filter(record: &ScoreRecord, filter: &FilterState) -> bool {
    let name_match = filter.search_term.is_empty()
        || record
            .username
            .to_lowercase()
            .contains(&filter.search_term.to_lowercase());

    let score_match = match filter.min_score {
        Some(min) => record.score >= min,
        None => true,
    };

    name_match && score_match
}

/// Derive the bounded, ranked, filtered display list.
///
/// Total over all inputs: empty records or a filter matching nothing
/// yield an empty vec, never an error. Performs no I/O and mutates
/// nothing; safe to re-run on every keystroke.
pub fn ranked_view(
    records: &[ScoreRecord],
    filter: &FilterState,
    policy: RankPolicy,
) -> Vec<RankedEntry> {
    // Stable sort over borrowed records avoids cloning the whole list
    let mut ordered: Vec<&ScoreRecord> = records.iter().collect();
    ordered.sort_by_key(|record| std::cmp::Reverse(record.score));

    let filtered = ordered
        .into_iter()
        .enumerate()
        .filter(|(_, record)| matches_filter(record, filter));

    match policy {
        RankPolicy::Unfiltered => filtered
            .take(DISPLAY_LIMIT)
            .map(|(position, record)| RankedEntry::new(position + 1, record.clone()))
            .collect(),
        RankPolicy::Filtered => filtered
            .take(DISPLAY_LIMIT)
            .enumerate()
            .map(|(visible, (_, record))| RankedEntry::new(visible + 1, record.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, username: &str, score: i64) -> ScoreRecord {
        ScoreRecord::new(id, username, score)
    }

    fn sample() -> Vec<ScoreRecord> {
        vec![
            record(1, "al", 50),
            record(2, "bo", 90),
            record(3, "cy", 90),
        ]
    }

    #[test]
    fn test_sorted_descending_with_ranks() {
        let entries = ranked_view(&sample(), &FilterState::default(), RankPolicy::Unfiltered);

        let order: Vec<&str> = entries.iter().map(|e| e.record.username.as_str()).collect();
        assert_eq!(order, ["bo", "cy", "al"]);

        let ranks: Vec<usize> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        // bo (id 2) was fetched before cy (id 3); both score 90
        let entries = ranked_view(&sample(), &FilterState::default(), RankPolicy::Unfiltered);
        assert_eq!(entries[0].record.id, 2);
        assert_eq!(entries[1].record.id, 3);
    }

    #[test]
    fn test_search_keeps_unfiltered_rank() {
        let filter = FilterState::new("a", None);
        let entries = ranked_view(&sample(), &filter, RankPolicy::Unfiltered);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].record.username, "al");
        assert_eq!(entries[0].rank, 3);
    }

    #[test]
    fn test_search_renumbers_under_filtered_policy() {
        let filter = FilterState::new("a", None);
        let entries = ranked_view(&sample(), &filter, RankPolicy::Filtered);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].record.username, "al");
        assert_eq!(entries[0].rank, 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = vec![record(1, "Alice", 10), record(2, "BOB", 20)];
        let entries = ranked_view(
            &records,
            &FilterState::new("bob", None),
            RankPolicy::Unfiltered,
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].record.username, "BOB");
    }

    #[test]
    fn test_search_term_is_literal_not_regex() {
        let records = vec![record(1, "plain", 10), record(2, "dot.*star", 20)];

        // As a regex ".*" would match both names; as a literal it only
        // matches the name containing those two characters
        let wildcard = ranked_view(
            &records,
            &FilterState::new(".*", None),
            RankPolicy::Unfiltered,
        );
        assert_eq!(wildcard.len(), 1);
        assert_eq!(wildcard[0].record.username, "dot.*star");
    }

    #[test]
    fn test_min_score_bound_is_inclusive() {
        let filter = FilterState::new("", Some(60));
        let entries = ranked_view(&sample(), &filter, RankPolicy::Unfiltered);

        let order: Vec<&str> = entries.iter().map(|e| e.record.username.as_str()).collect();
        assert_eq!(order, ["bo", "cy"]);

        let exact = FilterState::new("", Some(90));
        assert_eq!(
            ranked_view(&sample(), &exact, RankPolicy::Unfiltered).len(),
            2
        );
    }

    #[test]
    fn test_min_score_zero_is_a_real_bound() {
        let records = vec![record(1, "zed", 0), record(2, "neg", -5)];
        let filter = FilterState::new("", Some(0));
        let entries = ranked_view(&records, &filter, RankPolicy::Unfiltered);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].record.username, "zed");
    }

    #[test]
    fn test_empty_records_give_empty_view() {
        assert!(ranked_view(&[], &FilterState::default(), RankPolicy::Unfiltered).is_empty());
        assert!(ranked_view(&[], &FilterState::new("x", Some(3)), RankPolicy::Filtered).is_empty());
    }

    #[test]
    fn test_filter_matching_nothing_gives_empty_view() {
        let filter = FilterState::new("nobody", None);
        assert!(ranked_view(&sample(), &filter, RankPolicy::Unfiltered).is_empty());
    }

    #[test]
    fn test_bounded_to_display_limit() {
        let records: Vec<ScoreRecord> = (0..20)
            .map(|i| record(i, &format!("user{}", i), 1000 - i))
            .collect();

        let entries = ranked_view(&records, &FilterState::default(), RankPolicy::Unfiltered);
        assert_eq!(entries.len(), DISPLAY_LIMIT);

        // The 15 highest scores, strictly descending
        assert_eq!(entries[0].record.score, 1000);
        assert_eq!(entries[DISPLAY_LIMIT - 1].record.score, 1000 - 14);
        assert!(entries.windows(2).all(|w| w[0].record.score > w[1].record.score));
    }

    #[test]
    fn test_ranks_are_consecutive_without_gaps() {
        let records: Vec<ScoreRecord> =
            (0..10).map(|i| record(i, "same", 42)).collect();
        let entries = ranked_view(&records, &FilterState::default(), RankPolicy::Unfiltered);

        let ranks: Vec<usize> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicate_usernames_are_not_deduplicated() {
        let records = vec![record(1, "al", 10), record(2, "al", 30)];
        let entries = ranked_view(&records, &FilterState::default(), RankPolicy::Unfiltered);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let records = sample();
        let filter = FilterState::new("o", Some(10));
        let first = ranked_view(&records, &filter, RankPolicy::Unfiltered);
        let second = ranked_view(&records, &filter, RankPolicy::Unfiltered);
        assert_eq!(first, second);
    }
}
