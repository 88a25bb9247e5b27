//! Global standings across every tournament.

use crate::models::{GameMatch, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the standings.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub nick: String,
    pub wins: u32,
    pub defeats: u32,
}

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    wins: u32,
    defeats: u32,
}

/// Wins and defeats for every player in `players`, best first.
///
/// A win is any resolved match naming the player as winner. A defeat needs a
/// resolved match with both slots filled, so byes and ghosts never charge
/// one. Ids not in the roster are dropped. Ordering is wins descending, then
/// defeats ascending; the sort is stable so remaining ties keep roster order.
pub fn compute_leaderboard(players: &[Player], matches: &[GameMatch]) -> Vec<LeaderboardEntry> {
    let mut tallies: HashMap<PlayerId, Tally> =
        players.iter().map(|p| (p.id, Tally::default())).collect();

    for m in matches.iter().filter(|m| m.is_resolved()) {
        let Some(winner) = m.winner_id else {
            continue;
        };
        if let Some(t) = tallies.get_mut(&winner) {
            t.wins += 1;
        }
        if let (Some(p1), Some(p2)) = (m.player1_id, m.player2_id) {
            for loser in [p1, p2].into_iter().filter(|&p| p != winner) {
                if let Some(t) = tallies.get_mut(&loser) {
                    t.defeats += 1;
                }
            }
        }
    }

    let mut entries: Vec<LeaderboardEntry> = players
        .iter()
        .map(|p| {
            let t = tallies.get(&p.id).copied().unwrap_or_default();
            LeaderboardEntry {
                player_id: p.id,
                nick: p.nick.clone(),
                wins: t.wins,
                defeats: t.defeats,
            }
        })
        .collect();
    entries.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.defeats.cmp(&b.defeats)));
    entries
}

/// Standings as CSV with a `nick,wins,defeats` header.
pub fn leaderboard_csv(entries: &[LeaderboardEntry]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["nick", "wins", "defeats"])?;
    for e in entries {
        wtr.write_record([e.nick.clone(), e.wins.to_string(), e.defeats.to_string()])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
