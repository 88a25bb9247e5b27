//! Single-elimination tournament tracker: library with models, bracket and
//! leaderboard logic, and the entity store seam.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    auto_resolve_byes, champion, compute_leaderboard, current_round, find_pending_bye_matches,
    group_by_round, is_round_advance_eligible, leaderboard_csv, match_history, round_status,
    ByeResolution, LeaderboardEntry, MatchHistoryEntry, RoundStatus,
};
pub use models::{
    GameMatch, InputMalformed, MatchId, MatchPayload, MatchStatus, Player, PlayerId, PlayerPayload,
    Tournament, TournamentId, TournamentPayload, TournamentStatus,
};
pub use store::{
    fetch_tournament_view, EntityStore, MemoryStore, StoreDocument, StoreError, TournamentView,
};
