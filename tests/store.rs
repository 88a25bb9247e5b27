//! Integration tests for payload validation and the in-memory store.

use bracket_tracker::{
    compute_leaderboard, fetch_tournament_view, EntityStore, GameMatch, InputMalformed,
    MatchPayload, MatchStatus, MemoryStore, Player, PlayerPayload, StoreError, TournamentStatus,
};

const DOCUMENT: &str = r#"{
  "players": [
    { "id": 1, "nick": "Ryu", "logo_url": "https://img/ryu.png", "active": true },
    { "id": 2, "nick": "Ken", "logoUrl": null, "active": false },
    { "id": 3, "nick": "Chun" }
  ],
  "tournaments": [
    { "id": 10, "name": "Spring Cup", "status": "GENERATED", "created_at": "2024-03-01T18:30:00", "winner_id": null },
    { "id": 11, "name": "Summer Cup", "status": "DRAFT", "created_at": "2024-06-01T10:00:00Z" }
  ],
  "participants": [
    { "tournament_id": 10, "player_id": 1 },
    { "tournament_id": 10, "player_id": 2 },
    { "tournament_id": 10, "player_id": 3 }
  ],
  "matches": [
    { "id": 101, "tournament_id": 10, "round": 1, "position": 2, "player1_id": 3, "player2_id": null, "winner_id": null, "status": "PENDING" },
    { "id": 100, "tournament_id": 10, "round": 1, "position": 1, "player1_id": 1, "player2_id": 2, "winner_id": 1, "status": "RESOLVED" }
  ]
}"#;

fn match_payload() -> MatchPayload {
    MatchPayload {
        id: Some(1),
        tournament_id: Some(1),
        round: Some(1),
        position: Some(1),
        player1_id: Some(1),
        player2_id: Some(2),
        winner_id: None,
        status: Some("PENDING".to_string()),
    }
}

#[test]
fn parses_document() {
    let store = MemoryStore::from_json(DOCUMENT).unwrap();
    let players = store.list_players().unwrap();
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].logo_url.as_deref(), Some("https://img/ryu.png"));
    assert!(!players[1].active);
    assert!(players[2].active);

    let t = store.get_tournament(10).unwrap();
    assert_eq!(t.status, TournamentStatus::Generated);
    assert_eq!(t.created_at.to_rfc3339(), "2024-03-01T18:30:00+00:00");

    let matches = store.list_matches(10).unwrap();
    let ids: Vec<_> = matches.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![100, 101]);
    assert_eq!(matches[0].status, MatchStatus::Resolved);
}

#[test]
fn missing_field_is_malformed() {
    let mut p = match_payload();
    p.round = None;
    assert_eq!(
        GameMatch::try_from(p),
        Err(InputMalformed::MissingField {
            entity: "match",
            field: "round"
        })
    );
}

#[test]
fn non_positive_round_is_malformed() {
    let mut p = match_payload();
    p.position = Some(0);
    assert!(matches!(
        GameMatch::try_from(p),
        Err(InputMalformed::InvalidValue { field: "position", .. })
    ));
}

#[test]
fn unknown_status_is_malformed() {
    let mut p = match_payload();
    p.status = Some("PLAYED".to_string());
    assert_eq!(
        GameMatch::try_from(p),
        Err(InputMalformed::UnknownStatus("PLAYED".to_string()))
    );
}

#[test]
fn winner_must_agree_with_status_and_slots() {
    let mut resolved_without_winner = match_payload();
    resolved_without_winner.status = Some("RESOLVED".to_string());
    assert_eq!(
        GameMatch::try_from(resolved_without_winner),
        Err(InputMalformed::InconsistentWinner { match_id: 1 })
    );

    let mut outsider = match_payload();
    outsider.status = Some("RESOLVED".to_string());
    outsider.winner_id = Some(7);
    assert!(GameMatch::try_from(outsider).is_err());

    let mut ok = match_payload();
    ok.status = Some("resolved".to_string());
    ok.winner_id = Some(2);
    assert_eq!(GameMatch::try_from(ok).unwrap().winner_id, Some(2));
}

#[test]
fn blank_nick_is_malformed() {
    let p = PlayerPayload {
        id: Some(1),
        nick: Some("  ".to_string()),
        ..Default::default()
    };
    assert!(Player::try_from(p).is_err());
}

#[test]
fn bad_document_is_rejected() {
    assert!(matches!(
        MemoryStore::from_json("{ not json"),
        Err(StoreError::InvalidDocument(_))
    ));
    let bad_match = r#"{ "matches": [ { "id": 1, "tournament_id": 1, "round": -1, "position": 1, "status": "PENDING" } ] }"#;
    assert!(matches!(MemoryStore::from_json(bad_match), Err(StoreError::Malformed(_))));
}

#[test]
fn set_match_winner_validates() {
    let mut store = MemoryStore::from_json(DOCUMENT).unwrap();
    assert_eq!(store.set_match_winner(999, 1), Err(StoreError::MatchNotFound(999)));
    assert_eq!(store.set_match_winner(100, 2), Err(StoreError::AlreadyResolved(100)));
    assert_eq!(
        store.set_match_winner(101, 1),
        Err(StoreError::WinnerNotInMatch {
            match_id: 101,
            winner_id: 1
        })
    );
    let m = store.set_match_winner(101, 3).unwrap();
    assert_eq!(m.status, MatchStatus::Resolved);
    assert_eq!(m.winner_id, Some(3));
}

#[test]
fn unknown_tournament_is_not_found() {
    let store = MemoryStore::from_json(DOCUMENT).unwrap();
    assert_eq!(store.list_matches(42), Err(StoreError::TournamentNotFound(42)));
    assert!(matches!(
        fetch_tournament_view(&store, 42),
        Err(StoreError::TournamentNotFound(42))
    ));
}

#[test]
fn tournament_view_collects_participants_and_matches() {
    let store = MemoryStore::from_json(DOCUMENT).unwrap();
    let view = fetch_tournament_view(&store, 10).unwrap();
    assert_eq!(view.tournament.name, "Spring Cup");
    assert_eq!(view.participants.len(), 3);
    assert_eq!(view.matches.len(), 2);
    assert!(fetch_tournament_view(&store, 11).unwrap().participants.is_empty());
}

#[test]
fn leaderboard_over_all_tournaments() {
    let mut store = MemoryStore::from_json(DOCUMENT).unwrap();
    store.add_participant(11, 3).unwrap();
    store.insert_match(GameMatch::new(200, 11, 1, 1, Some(3), Some(1)).resolved(3));
    assert_eq!(store.list_participants(11).unwrap().len(), 1);

    let players = store.list_players().unwrap();
    let all = store.list_all_matches().unwrap();
    assert_eq!(all.len(), 3);
    let board = compute_leaderboard(&players, &all);
    let rows: Vec<_> = board.iter().map(|e| (e.nick.as_str(), e.wins, e.defeats)).collect();
    // Inactive players keep their history.
    assert_eq!(rows, vec![("Chun", 1, 0), ("Ryu", 1, 1), ("Ken", 0, 1)]);
}

#[test]
fn negative_ids_are_malformed() {
    let mut p = match_payload();
    p.player1_id = Some(-7);
    assert!(matches!(
        GameMatch::try_from(p),
        Err(InputMalformed::InvalidValue { field: "player1_id", .. })
    ));

    let mut p = match_payload();
    p.tournament_id = Some(-1);
    assert!(matches!(
        GameMatch::try_from(p),
        Err(InputMalformed::InvalidValue { field: "tournament_id", .. })
    ));

    let mut p = match_payload();
    p.status = Some("RESOLVED".to_string());
    p.winner_id = Some(-2);
    assert!(matches!(
        GameMatch::try_from(p),
        Err(InputMalformed::InvalidValue { field: "winner_id", .. })
    ));

    let player = PlayerPayload {
        id: Some(-3),
        nick: Some("Akuma".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        Player::try_from(player),
        Err(InputMalformed::InvalidValue { field: "id", .. })
    ));

    let doc = r#"{ "tournaments": [ { "id": -1, "name": "Cup", "created_at": "2024-01-01T00:00:00Z" } ] }"#;
    assert!(matches!(MemoryStore::from_json(doc), Err(StoreError::Malformed(_))));
}

#[test]
fn add_participant_rejects_invalid_registrations() {
    let mut store = MemoryStore::from_json(DOCUMENT).unwrap();
    assert_eq!(store.add_participant(42, 1), Err(StoreError::TournamentNotFound(42)));
    assert_eq!(store.add_participant(11, 999), Err(StoreError::PlayerNotFound(999)));
    assert_eq!(store.add_participant(11, 2), Err(StoreError::InactivePlayer(2)));
    assert_eq!(store.add_participant(11, 1), Ok(()));
    assert_eq!(
        store.add_participant(11, 1),
        Err(StoreError::AlreadyRegistered {
            tournament_id: 11,
            player_id: 1
        })
    );
    let ids: Vec<_> = store.list_participants(11).unwrap().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn get_player_by_id() {
    let store = MemoryStore::from_json(DOCUMENT).unwrap();
    assert_eq!(store.get_player(3).unwrap().nick, "Chun");
    assert_eq!(store.get_player(999), Err(StoreError::PlayerNotFound(999)));
}
