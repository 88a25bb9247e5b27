//! Player entity.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the entity store.
pub type PlayerId = i64;

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub nick: String,
    pub logo_url: Option<String>,
    /// Gates entry into future tournaments; has no effect on past results.
    pub active: bool,
}

impl Player {
    /// Active player with no logo.
    pub fn new(id: PlayerId, nick: impl Into<String>) -> Self {
        Self {
            id,
            nick: nick.into(),
            logo_url: None,
            active: true,
        }
    }
}
