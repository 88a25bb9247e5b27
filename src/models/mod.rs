//! Entities of the tracker: players, bracket matches, tournaments, and the
//! store payloads they are parsed from.

mod error;
mod game;
mod payload;
mod player;
mod tournament;

pub use error::InputMalformed;
pub use game::{GameMatch, MatchId, MatchStatus};
pub use payload::{MatchPayload, PlayerPayload, TournamentPayload};
pub use player::{Player, PlayerId};
pub use tournament::{Tournament, TournamentId, TournamentStatus};
