//! Bracket match and its resolution status.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the entity store.
pub type MatchId = i64;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Pending,
    Resolved,
}

/// One slot of the bracket: a round/position pair with up to two players.
///
/// A match with exactly one assigned player is a *bye*; a match with none is a
/// *ghost* waiting for winners of the previous round to be propagated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-based stage index.
    pub round: u32,
    /// 1-based, unique within a round.
    pub position: u32,
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    pub winner_id: Option<PlayerId>,
    pub status: MatchStatus,
}

impl GameMatch {
    /// Pending match at `round`/`position` with the given slots.
    pub fn new(
        id: MatchId,
        tournament_id: TournamentId,
        round: u32,
        position: u32,
        player1_id: Option<PlayerId>,
        player2_id: Option<PlayerId>,
    ) -> Self {
        Self {
            id,
            tournament_id,
            round,
            position,
            player1_id,
            player2_id,
            winner_id: None,
            status: MatchStatus::Pending,
        }
    }

    /// Same match, resolved in favour of `winner_id`.
    pub fn resolved(mut self, winner_id: PlayerId) -> Self {
        self.winner_id = Some(winner_id);
        self.status = MatchStatus::Resolved;
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.status == MatchStatus::Resolved
    }

    pub fn is_ghost(&self) -> bool {
        self.player1_id.is_none() && self.player2_id.is_none()
    }

    pub fn is_bye(&self) -> bool {
        self.player1_id.is_some() != self.player2_id.is_some()
    }

    /// The lone player of a bye match.
    pub fn bye_player(&self) -> Option<PlayerId> {
        match (self.player1_id, self.player2_id) {
            (Some(p), None) | (None, Some(p)) => Some(p),
            _ => None,
        }
    }

    /// Assigned slots, player 1 first.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> {
        self.player1_id.into_iter().chain(self.player2_id)
    }

    /// Whether the match can be placed in a bracket and its winner reference
    /// agrees with its status and slots.
    pub fn is_well_formed(&self) -> bool {
        if self.round == 0 || self.position == 0 {
            return false;
        }
        match (self.status, self.winner_id) {
            (MatchStatus::Pending, None) => true,
            (MatchStatus::Resolved, Some(w)) => self.is_ghost() || self.players().any(|p| p == w),
            _ => false,
        }
    }
}
