//! Single binary JSON API around the scheduler: one schedule (plus results) per tournament id.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! SCHEDULER_SEED (u64) makes tournaments created without an explicit seed reproducible.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use pickleball_scheduler::{
    generate_schedule, insert_player, printable_schedule, regenerate_schedule, MatchResult,
    Schedule, ScheduleError, ScheduleId, ScheduleMode, ScheduleSettings, Scorecard, Team,
    EXPORT_FILE_NAME,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Earlier schedules kept per tournament when regenerating.
const HISTORY_LIMIT: usize = 3;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Per-tournament entry: current schedule, results, earlier schedules, its own RNG.
struct TournamentEntry {
    schedule: Schedule,
    scorecard: Scorecard,
    history: Vec<Schedule>,
    rng: StdRng,
    last_activity: Instant,
}

/// In-memory state: tournaments by schedule id of their first generation.
struct AppState {
    tournaments: RwLock<HashMap<ScheduleId, TournamentEntry>>,
    base_seed: Option<u64>,
}

type SharedState = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct TournamentView<'a> {
    id: ScheduleId,
    schedule: &'a Schedule,
    scorecard: &'a Scorecard,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    players: Vec<String>,
    #[serde(default = "default_rounds")]
    rounds: usize,
    #[serde(default = "default_courts")]
    courts: usize,
    mode: Option<ScheduleMode>,
    #[serde(default = "default_points_per_win")]
    points_per_win: u32,
    seed: Option<u64>,
}

fn default_rounds() -> usize {
    3
}

fn default_courts() -> usize {
    1
}

fn default_points_per_win() -> u32 {
    1
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct RecordResultBody {
    round: usize,
    match_index: usize,
    winner: Option<Team>,
    #[serde(default)]
    team_1_score: u32,
    #[serde(default)]
    team_2_score: u32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: ScheduleId,
}

fn bad_request(e: ScheduleError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Run `f` on the tournament with write access, refreshing its last activity.
fn with_tournament<F>(state: &SharedState, id: ScheduleId, f: F) -> HttpResponse
where
    F: FnOnce(ScheduleId, &mut TournamentEntry) -> HttpResponse,
{
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(id, entry)
        }
        None => not_found(),
    }
}

fn view(id: ScheduleId, entry: &TournamentEntry) -> HttpResponse {
    HttpResponse::Ok().json(TournamentView {
        id,
        schedule: &entry.schedule,
        scorecard: &entry.scorecard,
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pickleball-scheduler",
    })
}

/// Generate a schedule for a new tournament (returns it with id; client keeps the id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: SharedState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut settings = ScheduleSettings::new(body.rounds, body.courts);
    if let Some(mode) = body.mode {
        settings = settings.with_mode(mode);
    }
    let mut rng = match body.seed.or(state.base_seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let schedule = match generate_schedule(&body.players, &settings, &mut rng) {
        Ok(s) => s,
        Err(e) => return bad_request(e),
    };
    let id = schedule.id;
    let mut g = match state.tournaments.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        schedule,
        scorecard: Scorecard::new(body.points_per_win),
        history: Vec::new(),
        rng,
        last_activity: Instant::now(),
    });
    log::info!("Created tournament {} ({} players)", id, entry.schedule.players.len());
    view(id, entry)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |id, entry| view(id, entry))
}

/// Generate a new schedule for the current roster (late entries included) and settings;
/// the old one goes to history.
#[post("/api/tournaments/{id}/regenerate")]
async fn api_regenerate(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |id, entry| {
        let schedule = match regenerate_schedule(&entry.schedule, &mut entry.rng) {
            Ok(s) => s,
            Err(e) => return bad_request(e),
        };
        let previous = std::mem::replace(&mut entry.schedule, schedule);
        entry.history.push(previous);
        if entry.history.len() > HISTORY_LIMIT {
            entry.history.remove(0);
        }
        entry.scorecard = Scorecard::new(entry.scorecard.points_per_win);
        view(id, entry)
    })
}

/// Earlier schedules, most recent first.
#[get("/api/tournaments/{id}/history")]
async fn api_history(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, entry| {
        let recent: Vec<&Schedule> = entry.history.iter().rev().collect();
        HttpResponse::Ok().json(recent)
    })
}

/// Add a late entry to every round of the current schedule.
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: SharedState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |id, entry| {
        match insert_player(&body.name, &mut entry.schedule, &mut entry.rng) {
            Ok(()) => view(id, entry),
            Err(e) => bad_request(e),
        }
    })
}

/// Enter or replace one match result (round and match index are 0-based).
#[put("/api/tournaments/{id}/results")]
async fn api_record_result(
    state: SharedState,
    path: Path<TournamentPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |id, entry| {
        let result = MatchResult {
            winner: body.winner,
            team_1_score: body.team_1_score,
            team_2_score: body.team_2_score,
        };
        match entry
            .scorecard
            .record(&entry.schedule, body.round, body.match_index, result)
        {
            Ok(()) => view(id, entry),
            Err(e) => bad_request(e),
        }
    })
}

#[get("/api/tournaments/{id}/leaderboard")]
async fn api_leaderboard(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, entry| {
        HttpResponse::Ok().json(entry.scorecard.standings(&entry.schedule))
    })
}

#[get("/api/tournaments/{id}/players/summary")]
async fn api_player_summaries(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, entry| {
        HttpResponse::Ok().json(entry.schedule.player_summaries())
    })
}

/// Printable schedule as a plain-text download.
#[get("/api/tournaments/{id}/export")]
async fn api_export(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_, entry| {
        HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ))
            .body(printable_schedule(&entry.schedule))
    })
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
    let base_seed: Option<u64> = std::env::var("SCHEDULER_SEED")
        .ok()
        .and_then(|s| s.parse().ok());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if let Some(seed) = base_seed {
        log::info!("Using fixed scheduler seed {}", seed);
    }

    let state = Data::new(AppState {
        tournaments: RwLock::new(HashMap::new()),
        base_seed,
    });

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.tournaments.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_regenerate)
            .service(api_history)
            .service(api_add_player)
            .service(api_record_result)
            .service(api_leaderboard)
            .service(api_player_summaries)
            .service(api_export)
    })
    .bind(bind)?
    .run()
    .await
}
