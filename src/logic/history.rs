//! Per-tournament match history with nicks resolved.

use crate::models::{GameMatch, MatchId, MatchStatus, Player, PlayerId};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchHistoryEntry {
    pub match_id: MatchId,
    pub round: u32,
    pub position: u32,
    pub player1_id: Option<PlayerId>,
    pub player1_nick: Option<String>,
    pub player2_id: Option<PlayerId>,
    pub player2_nick: Option<String>,
    pub winner_id: Option<PlayerId>,
    /// Only set once the match is resolved.
    pub winner_nick: Option<String>,
    pub status: MatchStatus,
}

/// Matches ordered by round then position. Ids missing from `players` get no nick.
pub fn match_history(players: &[Player], matches: &[GameMatch]) -> Vec<MatchHistoryEntry> {
    let nicks: HashMap<PlayerId, &str> = players.iter().map(|p| (p.id, p.nick.as_str())).collect();
    let nick = |id: Option<PlayerId>| id.and_then(|id| nicks.get(&id)).map(|n| n.to_string());

    let mut ordered: Vec<&GameMatch> = matches.iter().collect();
    ordered.sort_by_key(|m| (m.round, m.position));
    ordered
        .into_iter()
        .map(|m| MatchHistoryEntry {
            match_id: m.id,
            round: m.round,
            position: m.position,
            player1_id: m.player1_id,
            player1_nick: nick(m.player1_id),
            player2_id: m.player2_id,
            player2_nick: nick(m.player2_id),
            winner_id: m.winner_id,
            winner_nick: if m.is_resolved() { nick(m.winner_id) } else { None },
            status: m.status,
        })
        .collect()
}
