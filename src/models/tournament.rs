//! Tournament entity.

use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the entity store.
pub type TournamentId = i64;

/// Lifecycle of a tournament as reported by the store.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Participants can still be registered.
    #[default]
    Draft,
    /// Bracket exists and rounds are being played.
    Generated,
    /// A champion has been recorded.
    Finished,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
    pub winner_id: Option<PlayerId>,
}

impl Tournament {
    /// Draft tournament created now.
    pub fn new(id: TournamentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: TournamentStatus::Draft,
            created_at: Utc::now(),
            winner_id: None,
        }
    }
}
