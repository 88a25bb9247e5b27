//! Single binary web server exposing bracket state and standings over REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DATA_FILE (JSON store snapshot loaded at startup).

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use bracket_tracker::{
    auto_resolve_byes, champion, compute_leaderboard, fetch_tournament_view,
    find_pending_bye_matches, group_by_round, leaderboard_csv, match_history, round_status,
    EntityStore, GameMatch, MatchId, MemoryStore, PlayerId, StoreError, TournamentId,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// The store snapshot shared by all workers.
type AppState = Data<RwLock<MemoryStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    winner_id: PlayerId,
}

#[derive(Serialize)]
struct BracketRound {
    round: u32,
    matches: Vec<GameMatch>,
}

#[derive(Serialize)]
struct RoundResponse {
    status: Option<bracket_tracker::RoundStatus>,
    pending_byes: Vec<GameMatch>,
    champion: Option<PlayerId>,
}

#[derive(Serialize)]
struct ByeResolutionResponse {
    match_id: MatchId,
    winner_id: PlayerId,
    ok: bool,
    error: Option<String>,
}

fn store_error(e: &StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::TournamentNotFound(_)
        | StoreError::MatchNotFound(_)
        | StoreError::PlayerNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracket-tracker",
    })
}

/// Standings over every player and every match of every tournament.
#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = store
        .list_players()
        .and_then(|players| Ok(compute_leaderboard(&players, &store.list_all_matches()?)));
    match result {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(e) => store_error(&e),
    }
}

#[get("/api/leaderboard.csv")]
async fn api_leaderboard_csv(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entries = match store
        .list_players()
        .and_then(|players| Ok(compute_leaderboard(&players, &store.list_all_matches()?)))
    {
        Ok(entries) => entries,
        Err(e) => return store_error(&e),
    };
    match leaderboard_csv(&entries) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => {
            log::error!("Failed to write leaderboard CSV: {}", e);
            HttpResponse::InternalServerError().body("csv error")
        }
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.list_players() {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => store_error(&e),
    }
}

#[get("/api/players/{id}")]
async fn api_get_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.get_player(path.id) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => store_error(&e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.list_tournaments() {
        Ok(ts) => HttpResponse::Ok().json(ts),
        Err(e) => store_error(&e),
    }
}

/// Tournament with its participants and matches.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match fetch_tournament_view(&*store, path.id) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => store_error(&e),
    }
}

#[get("/api/tournaments/{id}/bracket")]
async fn api_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.list_matches(path.id) {
        Ok(matches) => {
            let rounds: Vec<BracketRound> = group_by_round(&matches)
                .into_iter()
                .map(|(round, matches)| BracketRound { round, matches })
                .collect();
            HttpResponse::Ok().json(rounds)
        }
        Err(e) => store_error(&e),
    }
}

#[get("/api/tournaments/{id}/history")]
async fn api_history(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = store
        .list_matches(path.id)
        .and_then(|matches| Ok(match_history(&store.list_players()?, &matches)));
    match result {
        Ok(history) => HttpResponse::Ok().json(history),
        Err(e) => store_error(&e),
    }
}

/// Current round progress, byes awaiting resolution, and the champion if decided.
#[get("/api/tournaments/{id}/round")]
async fn api_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let store = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.list_matches(path.id) {
        Ok(matches) => HttpResponse::Ok().json(RoundResponse {
            status: round_status(&matches),
            pending_byes: find_pending_bye_matches(&matches),
            champion: champion(&matches),
        }),
        Err(e) => store_error(&e),
    }
}

/// Resolve every pending bye of the tournament. Each bye is reported separately.
#[post("/api/tournaments/{id}/byes/resolve")]
async fn api_resolve_byes(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let byes = match store.list_matches(path.id) {
        Ok(matches) => find_pending_bye_matches(&matches),
        Err(e) => return store_error(&e),
    };
    let results: Vec<ByeResolutionResponse> =
        auto_resolve_byes(&byes, |match_id, winner_id| store.set_match_winner(match_id, winner_id))
            .into_iter()
            .map(|r| ByeResolutionResponse {
                match_id: r.match_id,
                winner_id: r.winner_id,
                ok: r.outcome.is_ok(),
                error: r.outcome.err().map(|e| e.to_string()),
            })
            .collect();
    log::info!(
        "Tournament {}: resolved {} of {} byes",
        path.id,
        results.iter().filter(|r| r.ok).count(),
        results.len()
    );
    HttpResponse::Ok().json(results)
}

#[post("/api/matches/{id}/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    let mut store = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match store.set_match_winner(path.id, body.winner_id) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => store_error(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "data/tracker.json".to_string()
}

/// Load the store snapshot; a missing file starts empty.
async fn load_store(path: &str) -> std::io::Result<MemoryStore> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Data file {} not found, starting with an empty store", path);
            return Ok(MemoryStore::new());
        }
        Err(e) => return Err(e),
    };
    MemoryStore::from_json(&json)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file());

    let store = load_store(&data_file).await?;
    let state = Data::new(RwLock::new(store));

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_leaderboard)
            .service(api_leaderboard_csv)
            .service(api_list_players)
            .service(api_get_player)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_bracket)
            .service(api_history)
            .service(api_round)
            .service(api_resolve_byes)
            .service(api_set_match_winner)
    })
    .bind(bind)?
    .run()
    .await
}
