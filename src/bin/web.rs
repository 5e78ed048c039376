//! Single binary web server: JSON API over the scoring logic and the user store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, KICKOFF_GRACE_MINUTES (time-based fixture completion, default 120).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use fpl_team_web::logic::{
    available_bench_slots, current_round_status, suggest_formation_fix, DEFAULT_KICKOFF_GRACE_MINUTES,
    DEFAULT_ROUND,
};
use fpl_team_web::store::{register_user, save_team};
use fpl_team_web::{
    calculate_gameweek_points, compute_season_points, process_automatic_substitutions,
    simulate_gameweek, validate_formation, CompletionPolicy, Fixture, GameweekEntry,
    InMemoryUserRepository, JoinConfig, Lineup, Player, PlayerId, Position, Round, RoundStatus,
    SavedPlayer, SavedTeam, StoreError, UserId, UserRepository,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type Repo = Data<dyn UserRepository>;
type Policy = Data<CompletionPolicy>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CurrentRoundBody {
    rounds: Vec<Round>,
    fixtures: Vec<Fixture>,
    /// Defaults to the server clock.
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct CurrentRoundResponse {
    current_round: u32,
    status: Option<RoundStatus>,
    match_progress: String,
    date_range: String,
}

#[derive(Deserialize)]
struct PositionsBody {
    positions: Vec<Position>,
}

#[derive(Deserialize)]
struct LineupBody {
    starting: Vec<Player>,
    bench: Vec<Player>,
}

#[derive(Deserialize)]
struct GameweekViewBody {
    starting: Vec<Player>,
    bench: Vec<Player>,
    #[serde(default)]
    round_finished: bool,
}

#[derive(Deserialize)]
struct SeasonBody {
    gameweeks: Vec<GameweekEntry>,
    #[serde(default)]
    join: JoinConfig,
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    team_name: String,
}

#[derive(Deserialize)]
struct SaveTeamBody {
    starting: Vec<SavedPlayer>,
    bench: Vec<SavedPlayer>,
    #[serde(default)]
    captain_id: Option<PlayerId>,
    #[serde(default)]
    vice_captain_id: Option<PlayerId>,
}

/// Path segment: user id (e.g. /api/users/{id})
#[derive(Deserialize)]
struct UserPath {
    id: UserId,
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message.to_string() }))
}

fn store_error(e: StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::UserNotFound(_) => HttpResponse::NotFound().json(body),
        StoreError::DuplicateEmail => HttpResponse::BadRequest().json(body),
        StoreError::LockPoisoned => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fpl-team-web",
    })
}

/// Resolve the current round from the schedule and fixture list.
#[post("/api/gameweek/current")]
async fn api_current_round(policy: Policy, body: Json<CurrentRoundBody>) -> HttpResponse {
    let now = body.now.unwrap_or_else(Utc::now);
    let status = current_round_status(&policy, &body.rounds, &body.fixtures, now);
    let current_round = status.as_ref().map(|s| s.round_id).unwrap_or(DEFAULT_ROUND);
    log::debug!("Resolved current round {} at {}", current_round, now);
    HttpResponse::Ok().json(CurrentRoundResponse {
        current_round,
        match_progress: status
            .as_ref()
            .map(|s| s.match_progress())
            .unwrap_or_else(|| "No fixtures".to_string()),
        date_range: status
            .as_ref()
            .map(|s| s.date_range_label())
            .unwrap_or_else(|| "TBD".to_string()),
        status,
    })
}

/// Validate a starting XI and suggest fixes when it breaks the rules.
#[post("/api/formation/validate")]
async fn api_validate_formation(body: Json<PositionsBody>) -> HttpResponse {
    let report = validate_formation(&body.positions);
    let suggestions = suggest_formation_fix(&report.counts);
    HttpResponse::Ok().json(serde_json::json!({
        "report": report,
        "suggestions": suggestions,
    }))
}

/// Remaining bench room per position for a starting XI.
#[post("/api/formation/bench-slots")]
async fn api_bench_slots(body: Json<PositionsBody>) -> HttpResponse {
    HttpResponse::Ok().json(available_bench_slots(&body.positions))
}

/// Apply automatic substitutions to a submitted lineup.
#[post("/api/substitutions")]
async fn api_substitutions(body: Json<LineupBody>) -> HttpResponse {
    let body = body.into_inner();
    match Lineup::new(body.starting, body.bench) {
        Ok(lineup) => HttpResponse::Ok().json(process_automatic_substitutions(
            &lineup.starting,
            &lineup.bench,
        )),
        Err(e) => bad_request(e),
    }
}

/// Round points for a lineup, after substitutions and captaincy.
#[post("/api/gameweek/points")]
async fn api_gameweek_points(body: Json<LineupBody>) -> HttpResponse {
    let body = body.into_inner();
    match Lineup::new(body.starting, body.bench) {
        Ok(lineup) => HttpResponse::Ok().json(calculate_gameweek_points(&lineup.starting, &lineup.bench)),
        Err(e) => bad_request(e),
    }
}

/// Team to display: substitutions only once the round has finished.
#[post("/api/gameweek/view")]
async fn api_gameweek_view(body: Json<GameweekViewBody>) -> HttpResponse {
    let body = body.into_inner();
    match Lineup::new(body.starting, body.bench) {
        Ok(lineup) => HttpResponse::Ok().json(simulate_gameweek(
            &lineup.starting,
            &lineup.bench,
            body.round_finished,
        )),
        Err(e) => bad_request(e),
    }
}

/// Season total with per-gameweek breakdowns (chips, transfer hits, join offset).
#[post("/api/season/points")]
async fn api_season_points(body: Json<SeasonBody>) -> HttpResponse {
    match compute_season_points(&body.gameweeks, &body.join) {
        Ok(season) => HttpResponse::Ok().json(season),
        Err(e) => bad_request(e),
    }
}

/// Register a user (email must be unused).
#[post("/api/users")]
async fn api_register_user(repo: Repo, body: Json<RegisterBody>) -> HttpResponse {
    if body.email.trim().is_empty() {
        return bad_request("Email is required");
    }
    match register_user(repo.get_ref(), &body.email, &body.team_name, Utc::now()) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => store_error(e),
    }
}

#[get("/api/users/{id}")]
async fn api_get_user(repo: Repo, path: Path<UserPath>) -> HttpResponse {
    match repo.get_by_id(path.id) {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => store_error(StoreError::UserNotFound(path.id)),
        Err(e) => store_error(e),
    }
}

/// Save a user's team after checking squad shape, formation, and armbands.
#[put("/api/users/{id}/team")]
async fn api_save_team(repo: Repo, path: Path<UserPath>, body: Json<SaveTeamBody>) -> HttpResponse {
    let body = body.into_inner();
    let team = SavedTeam {
        starting: body.starting,
        bench: body.bench,
        captain_id: body.captain_id,
        vice_captain_id: body.vice_captain_id,
        formation: String::new(),
        saved_at: Utc::now(),
    };
    let team = match team.validate() {
        Ok(t) => t,
        Err(e) => return bad_request(e),
    };
    match save_team(repo.get_ref(), path.id, team, Utc::now()) {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "saved_at": user.updated_at,
            "saved_team": user.saved_team,
        })),
        Err(e) => store_error(e),
    }
}

#[get("/api/users/{id}/team")]
async fn api_get_team(repo: Repo, path: Path<UserPath>) -> HttpResponse {
    match repo.get_by_id(path.id) {
        Ok(Some(user)) => HttpResponse::Ok().json(serde_json::json!({ "saved_team": user.saved_team })),
        Ok(None) => store_error(StoreError::UserNotFound(path.id)),
        Err(e) => store_error(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let grace_minutes: i64 = std::env::var("KICKOFF_GRACE_MINUTES")
        .ok()
        .and_then(|m| m.parse().ok())
        .unwrap_or(DEFAULT_KICKOFF_GRACE_MINUTES);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Fixtures complete {} minutes after kickoff", grace_minutes);

    let repo: Repo = Data::from(Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>);
    let policy: Policy = Data::new(CompletionPolicy::from_minutes(grace_minutes));

    HttpServer::new(move || {
        App::new()
            .app_data(repo.clone())
            .app_data(policy.clone())
            .service(api_health)
            .service(api_current_round)
            .service(api_validate_formation)
            .service(api_bench_slots)
            .service(api_substitutions)
            .service(api_gameweek_points)
            .service(api_gameweek_view)
            .service(api_season_points)
            .service(api_register_user)
            .service(api_get_user)
            .service(api_save_team)
            .service(api_get_team)
    })
    .bind(bind)?
    .run()
    .await
}
