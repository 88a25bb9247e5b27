//! Loosely-typed store payloads and their validation into entities.
//!
//! The store speaks snake_case JSON with nullable fields everywhere. Nothing
//! reaches the core until it has been converted with `TryFrom`, which fails
//! fast on the first shape mismatch.

use crate::models::error::InputMalformed;
use crate::models::game::{GameMatch, MatchStatus};
use crate::models::player::Player;
use crate::models::tournament::{Tournament, TournamentStatus};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PlayerPayload {
    pub id: Option<i64>,
    pub nick: Option<String>,
    #[serde(default, alias = "logoUrl")]
    pub logo_url: Option<String>,
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MatchPayload {
    pub id: Option<i64>,
    pub tournament_id: Option<i64>,
    pub round: Option<i64>,
    pub position: Option<i64>,
    #[serde(default)]
    pub player1_id: Option<i64>,
    #[serde(default)]
    pub player2_id: Option<i64>,
    #[serde(default)]
    pub winner_id: Option<i64>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TournamentPayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub winner_id: Option<i64>,
}

fn required<T>(
    value: Option<T>,
    entity: &'static str,
    field: &'static str,
) -> Result<T, InputMalformed> {
    value.ok_or(InputMalformed::MissingField { entity, field })
}

fn positive(value: i64, field: &'static str) -> Result<u32, InputMalformed> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or(InputMalformed::InvalidValue {
            field,
            value: value.to_string(),
        })
}

fn non_negative(value: i64, field: &'static str) -> Result<i64, InputMalformed> {
    if value < 0 {
        return Err(InputMalformed::InvalidValue {
            field,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn optional_id(value: Option<i64>, field: &'static str) -> Result<Option<i64>, InputMalformed> {
    value.map(|v| non_negative(v, field)).transpose()
}

impl MatchStatus {
    pub fn parse(s: &str) -> Result<Self, InputMalformed> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(MatchStatus::Pending),
            "RESOLVED" => Ok(MatchStatus::Resolved),
            _ => Err(InputMalformed::UnknownStatus(s.to_string())),
        }
    }
}

impl TournamentStatus {
    pub fn parse(s: &str) -> Result<Self, InputMalformed> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(TournamentStatus::Draft),
            "GENERATED" => Ok(TournamentStatus::Generated),
            "FINISHED" => Ok(TournamentStatus::Finished),
            _ => Err(InputMalformed::UnknownStatus(s.to_string())),
        }
    }
}

/// RFC 3339, or a naive timestamp taken as UTC.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, InputMalformed> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|t| t.and_utc())
        .map_err(|_| InputMalformed::InvalidValue {
            field: "created_at",
            value: s.to_string(),
        })
}

impl TryFrom<PlayerPayload> for Player {
    type Error = InputMalformed;

    fn try_from(p: PlayerPayload) -> Result<Self, Self::Error> {
        let nick = required(p.nick, "player", "nick")?;
        if nick.trim().is_empty() {
            return Err(InputMalformed::InvalidValue {
                field: "nick",
                value: nick,
            });
        }
        Ok(Player {
            id: non_negative(required(p.id, "player", "id")?, "id")?,
            nick,
            logo_url: p.logo_url.filter(|u| !u.is_empty()),
            active: p.active.unwrap_or(true),
        })
    }
}

impl TryFrom<MatchPayload> for GameMatch {
    type Error = InputMalformed;

    fn try_from(p: MatchPayload) -> Result<Self, Self::Error> {
        let id = non_negative(required(p.id, "match", "id")?, "id")?;
        let status = MatchStatus::parse(&required(p.status, "match", "status")?)?;
        let m = GameMatch {
            id,
            tournament_id: non_negative(
                required(p.tournament_id, "match", "tournament_id")?,
                "tournament_id",
            )?,
            round: positive(required(p.round, "match", "round")?, "round")?,
            position: positive(required(p.position, "match", "position")?, "position")?,
            player1_id: optional_id(p.player1_id, "player1_id")?,
            player2_id: optional_id(p.player2_id, "player2_id")?,
            winner_id: optional_id(p.winner_id, "winner_id")?,
            status,
        };
        if !m.is_well_formed() {
            return Err(InputMalformed::InconsistentWinner { match_id: id });
        }
        Ok(m)
    }
}

impl TryFrom<TournamentPayload> for Tournament {
    type Error = InputMalformed;

    fn try_from(p: TournamentPayload) -> Result<Self, Self::Error> {
        let status = match p.status {
            Some(s) => TournamentStatus::parse(&s)?,
            None => TournamentStatus::Draft,
        };
        Ok(Tournament {
            id: non_negative(required(p.id, "tournament", "id")?, "id")?,
            name: required(p.name, "tournament", "name")?,
            status,
            created_at: parse_timestamp(&required(p.created_at, "tournament", "created_at")?)?,
            winner_id: optional_id(p.winner_id, "winner_id")?,
        })
    }
}
