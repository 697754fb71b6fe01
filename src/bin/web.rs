//! Championship manager REST API binary.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Notification collaborator via env: NOTIFY_URL, NOTIFY_APP_ID, NOTIFY_API_KEY
//! (falls back to a log-only sender when unset).

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use champion_system_web::{
    build_bracket, compute_standings, generate_group_games, generate_opening_bracket,
    qualifier_target, select_qualifiers, try_advance, Championship, ChampionshipId,
    ChampionshipStore, Dispatcher, EngineError, Format, Game, GameId, HttpNotifier, InMemoryStore,
    LogNotifier, NotificationSender, NotifierConfig, Phase, Player, PointsRule, Standing, Status,
    StoreError, Team, TeamId,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Shared state: the record store, the notification dispatcher, and the
/// points rule used by every standings computation.
struct AppState {
    store: InMemoryStore,
    dispatcher: Dispatcher,
    points: PointsRule,
}

type State = Data<AppState>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateChampionshipBody {
    name: String,
    #[serde(default = "default_qualified_count")]
    qualified_count: usize,
    admin_user_id: String,
    #[serde(default)]
    format: Format,
    starts_on: Option<NaiveDate>,
    ends_on: Option<NaiveDate>,
}

fn default_qualified_count() -> usize {
    8
}

#[derive(Deserialize)]
struct SetStatusBody {
    status: Status,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    owner_user_id: Option<String>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    document: String,
    birth_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
struct GameResultBody {
    home_score: u32,
    away_score: u32,
}

/// Path segment: championship id (e.g. /api/championships/{id})
#[derive(Deserialize)]
struct ChampionshipPath {
    id: ChampionshipId,
}

/// Path segment: team id (e.g. /api/teams/{id})
#[derive(Deserialize)]
struct TeamPath {
    id: TeamId,
}

/// Path segment: game id (e.g. /api/games/{id})
#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

/// Map an engine error to a response: store misses are 404, concurrent-write
/// conflicts 409, everything else a user-actionable 400.
fn engine_error(e: EngineError) -> HttpResponse {
    match &e {
        EngineError::Store(StoreError::NotFound(_)) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() }))
        }
        EngineError::Store(StoreError::Conflict(_)) => {
            HttpResponse::Conflict().json(serde_json::json!({ "error": e.to_string() }))
        }
        _ => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn store_error(e: StoreError) -> HttpResponse {
    engine_error(EngineError::Store(e))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "champion-system-web",
    })
}

/// Create a championship (scheduled, group phase, no teams yet).
#[post("/api/championships")]
async fn api_create_championship(state: State, body: Json<CreateChampionshipBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Championship name must not be empty" }));
    }
    if body.qualified_count == 0 {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Qualified count must be a positive integer" }));
    }
    let mut championship =
        Championship::new(body.name.trim(), body.qualified_count, body.admin_user_id);
    championship.format = body.format;
    championship.current_phase = body.format.opening_phase();
    championship.starts_on = body.starts_on;
    championship.ends_on = body.ends_on;
    match state.store.insert_championship(championship.clone()) {
        Ok(()) => HttpResponse::Ok().json(championship),
        Err(e) => store_error(e),
    }
}

/// Get a championship by id (404 if not found).
#[get("/api/championships/{id}")]
async fn api_get_championship(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    match state.store.championship(path.id) {
        Ok(c) => HttpResponse::Ok().json(c),
        Err(e) => store_error(e),
    }
}

/// Change a championship's lifecycle status (e.g. scheduled -> active).
#[put("/api/championships/{id}/status")]
async fn api_set_status(state: State, path: Path<ChampionshipPath>, body: Json<SetStatusBody>) -> HttpResponse {
    match state.store.set_status(path.id, body.status) {
        Ok(()) => match state.store.championship(path.id) {
            Ok(c) => HttpResponse::Ok().json(c),
            Err(e) => store_error(e),
        },
        Err(e) => store_error(e),
    }
}

/// Soft delete: mark a championship inactive (never physically removed).
#[delete("/api/championships/{id}")]
async fn api_deactivate_championship(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    match state.store.set_status(path.id, Status::Inactive) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error(e),
    }
}

/// Register a team to a championship (unapproved until the admin approves it).
#[post("/api/championships/{id}/teams")]
async fn api_add_team(state: State, path: Path<ChampionshipPath>, body: Json<AddTeamBody>) -> HttpResponse {
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Team name must not be empty" }));
    }
    let mut team = Team::new(body.name.trim());
    team.championship_id = Some(path.id);
    team.owner_user_id = body.owner_user_id.clone();
    match state.store.insert_team(team.clone()) {
        Ok(()) => HttpResponse::Ok().json(team),
        Err(e) => store_error(e),
    }
}

/// Bulk team import from a CSV body: one `name[,owner_user_id]` row per team.
#[post("/api/championships/{id}/teams/import")]
async fn api_import_teams(state: State, path: Path<ChampionshipPath>, body: web::Bytes) -> HttpResponse {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_ref());

    let mut created: Vec<Team> = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": format!("Invalid CSV: {}", e) }))
            }
        };
        let name = record.get(0).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        let mut team = Team::new(name);
        team.championship_id = Some(path.id);
        team.owner_user_id = record
            .get(1)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        if let Err(e) = state.store.insert_team(team.clone()) {
            return store_error(e);
        }
        created.push(team);
    }
    HttpResponse::Ok().json(created)
}

/// List a championship's teams.
#[get("/api/championships/{id}/teams")]
async fn api_list_teams(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    match state.store.teams(path.id) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => store_error(e),
    }
}

/// Approve a team for participation.
#[put("/api/teams/{id}/approve")]
async fn api_approve_team(state: State, path: Path<TeamPath>) -> HttpResponse {
    let mut team = match state.store.team(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(e),
    };
    team.approve();
    match state.store.update_team(team.clone()) {
        Ok(()) => HttpResponse::Ok().json(team),
        Err(e) => store_error(e),
    }
}

/// Add a player to a team.
#[post("/api/teams/{id}/players")]
async fn api_add_player(state: State, path: Path<TeamPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    if body.name.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Player name must not be empty" }));
    }
    let mut player = Player::new(path.id, body.name.trim(), body.document.trim());
    player.birth_date = body.birth_date;
    match state.store.insert_player(player.clone()) {
        Ok(()) => HttpResponse::Ok().json(player),
        Err(e) => store_error(e),
    }
}

/// List a team's players.
#[get("/api/teams/{id}/players")]
async fn api_list_players(state: State, path: Path<TeamPath>) -> HttpResponse {
    match state.store.players(path.id) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => store_error(e),
    }
}

/// Generate the current phase's fixtures over the approved teams: a group
/// round-robin, or the opening bracket for knockout-only championships.
/// Regenerating replaces unplayed fixtures; 409 once any result is recorded.
#[post("/api/championships/{id}/games/generate")]
async fn api_generate_games(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    let championship = match state.store.championship(path.id) {
        Ok(c) => c,
        Err(e) => return store_error(e),
    };
    let teams = match state.store.teams(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(e),
    };
    let generated = if championship.current_phase == Phase::Groups {
        generate_group_games(&championship, &teams)
    } else {
        generate_opening_bracket(&championship, &teams)
    };
    let games = match generated {
        Ok(g) => g,
        Err(e) => return engine_error(e),
    };
    match state
        .store
        .replace_games(path.id, championship.current_phase, games.clone())
    {
        Ok(()) => HttpResponse::Ok().json(games),
        Err(e) => store_error(e),
    }
}

/// List the current phase's games.
#[get("/api/championships/{id}/games")]
async fn api_list_games(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    let championship = match state.store.championship(path.id) {
        Ok(c) => c,
        Err(e) => return store_error(e),
    };
    match state.store.games(path.id, championship.current_phase) {
        Ok(games) => HttpResponse::Ok().json(games),
        Err(e) => store_error(e),
    }
}

/// Record a game's final score (409 once finished - scores are immutable).
#[put("/api/games/{id}/result")]
async fn api_record_result(state: State, path: Path<GamePath>, body: Json<GameResultBody>) -> HttpResponse {
    match state.store.record_result(path.id, body.home_score, body.away_score) {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => store_error(e),
    }
}

/// Current-phase standings over the results recorded so far.
fn current_standings(state: &AppState, id: ChampionshipId) -> Result<(Championship, Vec<Standing>, Vec<Game>), EngineError> {
    let championship = state.store.championship(id)?;
    let games = state.store.games(id, championship.current_phase)?;
    let finished: Vec<Game> = games.into_iter().filter(|g| g.finished).collect();
    let standings = compute_standings(&finished, &state.points)?;
    Ok((championship, standings, finished))
}

/// Standings read model for the current phase.
#[get("/api/championships/{id}/standings")]
async fn api_standings(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    match current_standings(&state, path.id) {
        Ok((_, standings, _)) => HttpResponse::Ok().json(standings),
        Err(e) => engine_error(e),
    }
}

/// Qualifier read model: who advances if the phase ended now.
#[get("/api/championships/{id}/qualifiers")]
async fn api_qualifiers(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    let (championship, standings, games) = match current_standings(&state, path.id) {
        Ok(v) => v,
        Err(e) => return engine_error(e),
    };
    let count = qualifier_target(
        championship.current_phase,
        championship.qualified_count,
        standings.len(),
    );
    match select_qualifiers(&standings, &games, count, &state.points) {
        Ok(qualified) => HttpResponse::Ok().json(qualified),
        Err(e) => engine_error(e),
    }
}

/// Preview of the next phase's bracket (not persisted).
#[get("/api/championships/{id}/bracket")]
async fn api_bracket_preview(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    let (championship, standings, games) = match current_standings(&state, path.id) {
        Ok(v) => v,
        Err(e) => return engine_error(e),
    };
    let target = match championship.current_phase.next() {
        Some(p) => p,
        None => return engine_error(EngineError::AlreadyClosed),
    };
    let count = qualifier_target(
        championship.current_phase,
        championship.qualified_count,
        standings.len(),
    );
    let qualified = match select_qualifiers(&standings, &games, count, &state.points) {
        Ok(q) => q,
        Err(e) => return engine_error(e),
    };
    match build_bracket(path.id, &qualified, target, None) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => engine_error(e),
    }
}

/// Advance the championship to its next phase - the sole mutating engine
/// entry point. On success the transition is already committed; notification
/// delivery is fire-and-forget and its failure only logs a warning.
#[post("/api/championships/{id}/advance")]
async fn api_advance(state: State, path: Path<ChampionshipPath>) -> HttpResponse {
    let event = match try_advance(&state.store, path.id, &state.points) {
        Ok(event) => event,
        Err(e) => return engine_error(e),
    };

    let name = state
        .store
        .championship(path.id)
        .map(|c| c.name)
        .unwrap_or_default();
    let recipients: Vec<String> = state
        .store
        .teams(path.id)
        .map(|teams| teams.into_iter().filter_map(|t| t.owner_user_id).collect())
        .unwrap_or_default();

    let dispatcher = state.dispatcher.clone();
    let event_to_send = event.clone();
    actix_web::rt::spawn(async move {
        let outcome =
            web::block(move || dispatcher.dispatch_transition(&event_to_send, &name, recipients))
                .await;
        match outcome {
            Ok(Ok(n)) => log::info!("Phase transition notification delivered to {} recipient(s)", n),
            Ok(Err(e)) => log::warn!("Phase transition notification failed: {}", e),
            Err(e) => log::warn!("Notification task error: {}", e),
        }
    });

    HttpResponse::Ok().json(event)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Build the notification sender from env; log-only when unconfigured.
fn build_sender() -> Arc<dyn NotificationSender> {
    let url = std::env::var("NOTIFY_URL").ok();
    let app_id = std::env::var("NOTIFY_APP_ID").ok();
    let api_key = std::env::var("NOTIFY_API_KEY").ok();
    match (url, app_id, api_key) {
        (Some(api_url), Some(app_id), Some(api_key)) => {
            log::info!("Push notifications enabled");
            Arc::new(HttpNotifier::new(NotifierConfig { api_url, app_id, api_key }))
        }
        _ => {
            log::info!("NOTIFY_* env not set; notifications will only be logged");
            Arc::new(LogNotifier)
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState {
        store: InMemoryStore::new(),
        dispatcher: Dispatcher::new(build_sender()),
        points: PointsRule::default(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_championship)
            .service(api_get_championship)
            .service(api_set_status)
            .service(api_deactivate_championship)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_list_teams)
            .service(api_approve_team)
            .service(api_add_player)
            .service(api_list_players)
            .service(api_generate_games)
            .service(api_list_games)
            .service(api_record_result)
            .service(api_standings)
            .service(api_qualifiers)
            .service(api_bracket_preview)
            .service(api_advance)
    })
    .bind(bind)?
    .run()
    .await
}
