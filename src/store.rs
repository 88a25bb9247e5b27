//! Entity store seam: read snapshots in, winner updates out.
//!
//! The core never talks to a store directly. Callers fetch with an
//! [`EntityStore`], hand the snapshots to the pure functions in `logic`, and
//! route bye resolutions back through [`EntityStore::set_match_winner`].

use crate::models::{
    GameMatch, InputMalformed, MatchId, MatchPayload, MatchStatus, Player, PlayerId, PlayerPayload,
    Tournament, TournamentId, TournamentPayload,
};
use serde::{Deserialize, Serialize};

/// Errors surfaced by store operations. Passed to callers as-is; never retried here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    TournamentNotFound(TournamentId),
    MatchNotFound(MatchId),
    PlayerNotFound(PlayerId),
    /// Inactive players cannot enter tournaments.
    InactivePlayer(PlayerId),
    AlreadyRegistered {
        tournament_id: TournamentId,
        player_id: PlayerId,
    },
    /// The match already has a winner.
    AlreadyResolved(MatchId),
    /// Proposed winner is not assigned to the match.
    WinnerNotInMatch { match_id: MatchId, winner_id: PlayerId },
    /// A stored record failed validation.
    Malformed(InputMalformed),
    /// The store document could not be read at all.
    InvalidDocument(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::TournamentNotFound(id) => write!(f, "Tournament {} not found", id),
            StoreError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            StoreError::PlayerNotFound(id) => write!(f, "Player {} not found", id),
            StoreError::InactivePlayer(id) => {
                write!(f, "Player {} is inactive and cannot join tournaments", id)
            }
            StoreError::AlreadyRegistered {
                tournament_id,
                player_id,
            } => write!(
                f,
                "Player {} is already registered in tournament {}",
                player_id, tournament_id
            ),
            StoreError::AlreadyResolved(id) => write!(f, "Match {} is already resolved", id),
            StoreError::WinnerNotInMatch { match_id, winner_id } => write!(
                f,
                "Player {} is not one of the players of match {}",
                winner_id, match_id
            ),
            StoreError::Malformed(e) => write!(f, "Malformed record: {}", e),
            StoreError::InvalidDocument(msg) => write!(f, "Invalid store document: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<InputMalformed> for StoreError {
    fn from(e: InputMalformed) -> Self {
        StoreError::Malformed(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidDocument(e.to_string())
    }
}

/// Operations the tracker needs from wherever entities live.
pub trait EntityStore {
    fn list_tournaments(&self) -> Result<Vec<Tournament>, StoreError>;

    fn get_tournament(&self, id: TournamentId) -> Result<Tournament, StoreError>;

    fn list_players(&self) -> Result<Vec<Player>, StoreError>;

    /// Matches of one tournament, ordered by round then position.
    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, StoreError>;

    /// Players registered in one tournament.
    fn list_participants(&self, tournament_id: TournamentId) -> Result<Vec<Player>, StoreError>;

    /// Resolve a match in favour of `winner_id` and return the updated match.
    fn set_match_winner(
        &mut self,
        match_id: MatchId,
        winner_id: PlayerId,
    ) -> Result<GameMatch, StoreError>;

    fn get_player(&self, id: PlayerId) -> Result<Player, StoreError> {
        self.list_players()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(StoreError::PlayerNotFound(id))
    }

    /// Every match of every tournament, flattened.
    fn list_all_matches(&self) -> Result<Vec<GameMatch>, StoreError> {
        let mut all = Vec::new();
        for t in self.list_tournaments()? {
            all.extend(self.list_matches(t.id)?);
        }
        Ok(all)
    }
}

/// Tournament detail: the tournament, then its participants, then its matches.
#[derive(Clone, Debug, Serialize)]
pub struct TournamentView {
    pub tournament: Tournament,
    pub participants: Vec<Player>,
    pub matches: Vec<GameMatch>,
}

/// Fetch a tournament view in declared order, stopping at the first failure.
pub fn fetch_tournament_view<S: EntityStore + ?Sized>(
    store: &S,
    id: TournamentId,
) -> Result<TournamentView, StoreError> {
    let tournament = store.get_tournament(id)?;
    let participants = store.list_participants(id)?;
    let matches = store.list_matches(id)?;
    Ok(TournamentView {
        tournament,
        participants,
        matches,
    })
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ParticipantPayload {
    pub tournament_id: i64,
    pub player_id: i64,
}

/// On-disk / over-the-wire snapshot of a whole store.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub players: Vec<PlayerPayload>,
    #[serde(default)]
    pub tournaments: Vec<TournamentPayload>,
    #[serde(default)]
    pub participants: Vec<ParticipantPayload>,
    #[serde(default)]
    pub matches: Vec<MatchPayload>,
}

/// Store held entirely in memory, validated on load.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    players: Vec<Player>,
    tournaments: Vec<Tournament>,
    participants: Vec<(TournamentId, PlayerId)>,
    matches: Vec<GameMatch>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON [`StoreDocument`].
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let doc: StoreDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn from_document(doc: StoreDocument) -> Result<Self, StoreError> {
        let players = doc
            .players
            .into_iter()
            .map(Player::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let tournaments = doc
            .tournaments
            .into_iter()
            .map(Tournament::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let matches = doc
            .matches
            .into_iter()
            .map(GameMatch::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let participants = doc
            .participants
            .into_iter()
            .map(|p| (p.tournament_id, p.player_id))
            .collect();
        Ok(Self {
            players,
            tournaments,
            participants,
            matches,
        })
    }

    pub fn insert_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn insert_tournament(&mut self, tournament: Tournament) {
        self.tournaments.push(tournament);
    }

    /// Register an active player in a tournament, at most once.
    pub fn add_participant(
        &mut self,
        tournament_id: TournamentId,
        player_id: PlayerId,
    ) -> Result<(), StoreError> {
        self.ensure_tournament(tournament_id)?;
        let player = self
            .players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(StoreError::PlayerNotFound(player_id))?;
        if !player.active {
            return Err(StoreError::InactivePlayer(player_id));
        }
        if self.participants.contains(&(tournament_id, player_id)) {
            return Err(StoreError::AlreadyRegistered {
                tournament_id,
                player_id,
            });
        }
        self.participants.push((tournament_id, player_id));
        Ok(())
    }

    pub fn insert_match(&mut self, m: GameMatch) {
        self.matches.push(m);
    }

    fn ensure_tournament(&self, id: TournamentId) -> Result<(), StoreError> {
        if self.tournaments.iter().any(|t| t.id == id) {
            Ok(())
        } else {
            Err(StoreError::TournamentNotFound(id))
        }
    }
}

impl EntityStore for MemoryStore {
    fn list_tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        Ok(self.tournaments.clone())
    }

    fn get_tournament(&self, id: TournamentId) -> Result<Tournament, StoreError> {
        self.tournaments
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::TournamentNotFound(id))
    }

    fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.clone())
    }

    fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, StoreError> {
        self.ensure_tournament(tournament_id)?;
        let mut matches: Vec<GameMatch> = self
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.position));
        Ok(matches)
    }

    fn list_participants(&self, tournament_id: TournamentId) -> Result<Vec<Player>, StoreError> {
        self.ensure_tournament(tournament_id)?;
        Ok(self
            .players
            .iter()
            .filter(|p| self.participants.contains(&(tournament_id, p.id)))
            .cloned()
            .collect())
    }

    fn set_match_winner(
        &mut self,
        match_id: MatchId,
        winner_id: PlayerId,
    ) -> Result<GameMatch, StoreError> {
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(StoreError::MatchNotFound(match_id))?;
        if m.status == MatchStatus::Resolved {
            return Err(StoreError::AlreadyResolved(match_id));
        }
        if !m.players().any(|p| p == winner_id) {
            return Err(StoreError::WinnerNotInMatch { match_id, winner_id });
        }
        m.winner_id = Some(winner_id);
        m.status = MatchStatus::Resolved;
        Ok(m.clone())
    }
}
