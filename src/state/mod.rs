//! Local score-list state, kept consistent with the server by applying
//! actions only after the corresponding API call has succeeded.

use serde::{Deserialize, Serialize};

use crate::core::ScoreRecord;

/// A user's score list as currently displayed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreListState {
    records: Vec<ScoreRecord>,
}

/// State transitions mirroring the scores API mutations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreListAction {
    /// A new record was stored; append it
    Added(ScoreRecord),
    /// An existing record changed; replace it by ID
    Updated(ScoreRecord),
    /// A record was deleted; drop it by ID
    Removed(i64),
}

impl ScoreListState {
    pub fn new(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&ScoreRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Apply a confirmed transition. `Updated` and `Removed` with an ID
    /// not present are no-ops rather than errors; the server is the
    /// source of truth and the list simply stays as it was.
    pub fn apply(&mut self, action: ScoreListAction) {
        match action {
            ScoreListAction::Added(record) => self.records.push(record),
            ScoreListAction::Updated(record) => {
                if let Some(existing) = self.records.iter_mut().find(|r| r.id == record.id) {
                    *existing = record;
                }
            }
            ScoreListAction::Removed(id) => self.records.retain(|r| r.id != id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, score: i64) -> ScoreRecord {
        ScoreRecord::new(id, "al", score)
    }

    #[test]
    fn test_added_appends_in_order() {
        let mut state = ScoreListState::default();
        state.apply(ScoreListAction::Added(record(1, 10)));
        state.apply(ScoreListAction::Added(record(2, 20)));

        let ids: Vec<i64> = state.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_updated_replaces_by_id() {
        let mut state = ScoreListState::new(vec![record(1, 10), record(2, 20)]);
        state.apply(ScoreListAction::Updated(record(2, 99)));

        assert_eq!(state.get(2).unwrap().score, 99);
        assert_eq!(state.get(1).unwrap().score, 10);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_updated_unknown_id_is_noop() {
        let mut state = ScoreListState::new(vec![record(1, 10)]);
        let before = state.clone();
        state.apply(ScoreListAction::Updated(record(9, 99)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_removed_drops_by_id() {
        let mut state = ScoreListState::new(vec![record(1, 10), record(2, 20)]);
        state.apply(ScoreListAction::Removed(1));

        assert_eq!(state.len(), 1);
        assert!(state.get(1).is_none());
    }

    #[test]
    fn test_removed_unknown_id_is_noop() {
        let mut state = ScoreListState::new(vec![record(1, 10)]);
        state.apply(ScoreListAction::Removed(42));
        assert_eq!(state.len(), 1);
    }
}
