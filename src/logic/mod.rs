//! Pure computations over store snapshots: bracket state, standings, history.

mod bracket;
mod history;
mod leaderboard;

pub use bracket::{
    auto_resolve_byes, champion, current_round, find_pending_bye_matches, group_by_round,
    is_round_advance_eligible, round_status, ByeResolution, RoundStatus,
};
pub use history::{match_history, MatchHistoryEntry};
pub use leaderboard::{compute_leaderboard, leaderboard_csv, LeaderboardEntry};
