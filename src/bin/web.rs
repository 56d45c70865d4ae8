//! Single binary web host for the planner: in-memory tournaments behind a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT. Log level via RUST_LOG.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_planner::{
    close_registration, generate_tournament_fixtures, import_roster, publish_tournament,
    record_match_winner, CapacityBreakdown, ManualSeed, MatchId, ParticipantId, SeedingMethod,
    Tournament, TournamentConstraints, TournamentError, TournamentId,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: tournaments by ID. The write lock serializes every mutation,
/// so fixtures for one tournament are generated and stored exactly once.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    constraints: TournamentConstraints,
}

#[derive(Deserialize)]
struct AddParticipantBody {
    name: String,
}

#[derive(Deserialize)]
struct GenerateFixturesBody {
    #[serde(default)]
    seeding_method: SeedingMethod,
    #[serde(default)]
    manual_seeds: Vec<ManualSeed>,
}

#[derive(Deserialize)]
struct SetMatchWinnerBody {
    match_id: MatchId,
    winner: ParticipantId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id.
#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: ParticipantId,
}

/// Client-facing status for an engine error: 409 for lifecycle conflicts, 404 for unknown ids, else 400.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::InvalidState(_) => HttpResponse::Conflict().json(body),
        TournamentError::ParticipantNotFound(_) | TournamentError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Look up a tournament, refresh its activity time, apply `action`, and answer with the tournament.
fn with_tournament<F>(state: &AppState, id: TournamentId, action: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match action(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-planner",
    })
}

/// Capacity for a set of constraints, with every intermediate figure. Nothing is stored.
#[post("/api/capacity")]
async fn api_capacity(body: Json<TournamentConstraints>) -> HttpResponse {
    match CapacityBreakdown::supported(&body) {
        Ok(breakdown) => HttpResponse::Ok().json(breakdown),
        Err(e) => error_response(&e),
    }
}

/// Create a tournament in Draft; its capacity is computed here and stored with it.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = match Tournament::new(body.name, body.constraints) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let id = tournament.id;
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |_| Ok(()))
}

/// Open registration (Draft only).
#[post("/api/tournaments/{id}/publish")]
async fn api_publish(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, publish_tournament)
}

/// Register a participant (RegistrationOpen only).
#[post("/api/tournaments/{id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.add_participant(body.name.trim()).map(|_| ()))
}

/// Register a CSV roster (`name,seed` header, seed optional). All rows or none.
#[post("/api/tournaments/{id}/participants/import")]
async fn api_import_roster(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |t| import_roster(t, &body).map(|_| ()))
}

/// Remove a participant (RegistrationOpen only).
#[delete("/api/tournaments/{id}/participants/{participant_id}")]
async fn api_remove_participant(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| t.remove_participant(path.participant_id))
}

/// Close registration (RegistrationOpen -> RegistrationClosed).
#[post("/api/tournaments/{id}/close-registration")]
async fn api_close_registration(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, close_registration)
}

/// Seed participants and generate fixtures (RegistrationClosed -> InProgress).
#[post("/api/tournaments/{id}/fixtures")]
async fn api_generate_fixtures(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<GenerateFixturesBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        generate_tournament_fixtures(t, body.seeding_method, &body.manual_seeds, &mut rand::thread_rng())
    })
}

/// Record a match winner and advance it along the bracket (InProgress only).
#[put("/api/tournaments/{id}/matches/winner")]
async fn api_set_match_winner(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetMatchWinnerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        record_match_winner(t, body.match_id, body.winner).map(|_| ())
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
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
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
            .service(api_capacity)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_publish)
            .service(api_add_participant)
            .service(api_import_roster)
            .service(api_remove_participant)
            .service(api_close_registration)
            .service(api_generate_fixtures)
            .service(api_set_match_winner)
    })
    .bind(bind)?
    .run()
    .await
}
