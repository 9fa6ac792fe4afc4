pub mod leaderboard_view;
pub mod score_record;

pub use leaderboard_view::{LeaderboardView, RankedEntry};
pub use score_record::ScoreRecord;
