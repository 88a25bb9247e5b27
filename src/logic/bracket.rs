//! Bracket state: round completeness, byes waiting for resolution, and the
//! champion once the final round is played.
//!
//! Everything here reads a snapshot of one tournament's matches. Nothing is
//! mutated; after resolving byes the caller refetches before evaluating again.

use crate::models::{GameMatch, MatchId, MatchStatus, PlayerId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Highest round present. Matches without a placeable round are ignored.
pub fn current_round(matches: &[GameMatch]) -> Option<u32> {
    matches.iter().map(|m| m.round).filter(|&r| r >= 1).max()
}

/// True when every match of the current round is resolved or a ghost.
///
/// An unresolved bye still blocks: it has to be resolved like any other match.
/// A malformed match in the current round blocks as well.
pub fn is_round_advance_eligible(matches: &[GameMatch]) -> bool {
    let Some(round) = current_round(matches) else {
        return false;
    };
    let mut current = matches.iter().filter(|m| m.round == round).peekable();
    current.peek().is_some()
        && current.all(|m| m.is_well_formed() && (m.is_resolved() || m.is_ghost()))
}

/// Pending matches with exactly one assigned player, in input order.
pub fn find_pending_bye_matches(matches: &[GameMatch]) -> Vec<GameMatch> {
    matches.iter().filter(|m| is_pending_bye(m)).cloned().collect()
}

fn is_pending_bye(m: &GameMatch) -> bool {
    if !m.is_well_formed() {
        log::debug!("Skipping malformed match {} in bye detection", m.id);
        return false;
    }
    m.status == MatchStatus::Pending && m.is_bye()
}

/// Outcome of one bye resolution attempt.
#[derive(Debug)]
pub struct ByeResolution<T, E> {
    pub match_id: MatchId,
    pub winner_id: PlayerId,
    pub outcome: Result<T, E>,
}

impl<T, E> ByeResolution<T, E> {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Call `resolve` once per pending bye with its lone player as winner.
///
/// Calls are independent: a failure is recorded against its match and the
/// remaining byes are still attempted. Entries that are not pending byes are
/// skipped. The input is not patched; refetch once all calls have settled.
pub fn auto_resolve_byes<T, E, F>(
    bye_matches: &[GameMatch],
    mut resolve: F,
) -> Vec<ByeResolution<T, E>>
where
    F: FnMut(MatchId, PlayerId) -> Result<T, E>,
    E: std::fmt::Display,
{
    bye_matches
        .iter()
        .filter_map(|m| {
            let winner_id = match m.bye_player() {
                Some(p) if is_pending_bye(m) => p,
                _ => {
                    log::debug!("Match {} is not a pending bye, not resolving", m.id);
                    return None;
                }
            };
            let outcome = resolve(m.id, winner_id);
            if let Err(e) = &outcome {
                log::warn!("Could not resolve bye match {} for player {}: {}", m.id, winner_id, e);
            }
            Some(ByeResolution {
                match_id: m.id,
                winner_id,
                outcome,
            })
        })
        .collect()
}

/// Progress of the current round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundStatus {
    pub round: u32,
    pub total: usize,
    pub resolved: usize,
    pub ghosts: usize,
    /// Unresolved matches with at least one player (byes included).
    pub pending: usize,
    pub pending_byes: usize,
    pub eligible: bool,
}

/// Summary of the current round, or `None` for an empty bracket.
pub fn round_status(matches: &[GameMatch]) -> Option<RoundStatus> {
    let round = current_round(matches)?;
    let current: Vec<_> = matches.iter().filter(|m| m.round == round).collect();
    let pending = |m: &&&GameMatch| !m.is_resolved() && !m.is_ghost();
    Some(RoundStatus {
        round,
        total: current.len(),
        resolved: current.iter().filter(|m| m.is_resolved()).count(),
        ghosts: current.iter().filter(|m| !m.is_resolved() && m.is_ghost()).count(),
        pending: current.iter().filter(pending).count(),
        pending_byes: current.iter().filter(pending).filter(|m| m.is_bye()).count(),
        eligible: is_round_advance_eligible(matches),
    })
}

/// Winner of the final: the current round is complete and holds a single
/// resolved match.
pub fn champion(matches: &[GameMatch]) -> Option<PlayerId> {
    if !is_round_advance_eligible(matches) {
        return None;
    }
    let round = current_round(matches)?;
    let mut current = matches.iter().filter(|m| m.round == round);
    match (current.next(), current.next()) {
        (Some(m), None) if m.is_resolved() => m.winner_id,
        _ => None,
    }
}

/// Bracket columns: rounds ascending, each sorted by position.
pub fn group_by_round(matches: &[GameMatch]) -> Vec<(u32, Vec<GameMatch>)> {
    let mut rounds: BTreeMap<u32, Vec<GameMatch>> = BTreeMap::new();
    for m in matches.iter().filter(|m| m.round >= 1) {
        rounds.entry(m.round).or_default().push(m.clone());
    }
    rounds
        .into_iter()
        .map(|(round, mut ms)| {
            ms.sort_by_key(|m| m.position);
            (round, ms)
        })
        .collect()
}
