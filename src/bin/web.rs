//! Single binary web server: JSON API for quiz tournaments and quick matches.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, and QUESTION_BANK (path to a .json or .csv question bank).

use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use quiz_tournament_web::{
    answer_quick_match, handle_timeout, start_quick_match, start_tournament, submit_answer,
    timeout_quick_match, tournament_record, BracketError, Match, NewTournament, Player, Question,
    QuestionBank, QuickMatch, RandomSeeding, Tournament, TournamentId, TournamentSettings,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// A hosted game plus last activity time (for auto-cleanup).
struct Entry<T> {
    game: T,
    last_activity: Instant,
}

impl<T> Entry<T> {
    fn new(game: T) -> Self {
        Self {
            game,
            last_activity: Instant::now(),
        }
    }
}

/// In-memory games by id. Every transition holds the write lock, so a game is never
/// mutated by two requests at once.
#[derive(Default)]
struct Sessions {
    tournaments: HashMap<TournamentId, Entry<Tournament>>,
    quick_matches: HashMap<Uuid, Entry<QuickMatch>>,
}

type AppState = Data<RwLock<Sessions>>;

/// Question bank loaded at startup; requests may bring their own questions instead.
type BankState = Data<QuestionBank>;

/// Inactivity threshold: games not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
    questions: usize,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    #[serde(flatten)]
    setup: NewTournament,
    #[serde(default)]
    questions: Option<Vec<Question>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateQuickMatchBody {
    players: Vec<Player>,
    #[serde(default)]
    settings: TournamentSettings,
    #[serde(default)]
    questions: Option<Vec<Question>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerBody {
    participant_id: String,
    option: usize,
    /// Seconds left on the clock when the answer was given.
    #[serde(default)]
    time_remaining: Option<u32>,
}

/// A question as shown to players (without the answer key).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionView<'a> {
    id: &'a str,
    text: &'a str,
    options: &'a [String],
    points: u32,
    time_limit: u32,
}

impl<'a> QuestionView<'a> {
    fn new(q: &'a Question, default_time: u32) -> Self {
        Self {
            id: &q.id,
            text: &q.text,
            options: &q.options,
            points: q.points,
            time_limit: q.time_limit.unwrap_or(default_time),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CurrentView<'a> {
    round: Option<&'static str>,
    current_match: Option<&'a Match>,
    question: Option<QuestionView<'a>>,
    /// 1-based question number within the match.
    question_number: Option<usize>,
    champion: Option<&'a str>,
}

/// Path segment: game id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct GamePath {
    id: Uuid,
}

fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        BracketError::NotFinished => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": format!("No {}", what) }))
}

#[get("/api/health")]
async fn api_health(bank: BankState) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "quiz-tournament-web",
        questions: bank.len(),
    })
}

/// Create a tournament: seeds the bracket and draws its questions.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    bank: BankState,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let own_bank = body.questions.map(QuestionBank::new);
    let bank = own_bank.as_ref().unwrap_or(bank.get_ref());
    let mut rng = rand::thread_rng();
    let tournament = match start_tournament(
        body.setup,
        bank,
        &mut RandomSeeding(rand::thread_rng()),
        &mut rng,
    ) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(tournament.view());
    g.tournaments.insert(tournament.id, Entry::new(tournament));
    response
}

/// Get a tournament by id, without its answer key (404 if not found). Touching it refreshes
/// last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.game.view())
        }
        None => not_found("tournament"),
    }
}

/// Current match and question for the presentation layer.
#[get("/api/tournaments/{id}/current")]
async fn api_current(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("tournament"),
    };
    entry.last_activity = Instant::now();
    let t = &entry.game;
    let current_match = t.current_match();
    HttpResponse::Ok().json(CurrentView {
        round: current_match.map(|m| m.round.label()),
        current_match,
        question: t
            .current_question()
            .map(|q| QuestionView::new(q, t.settings.time_per_question)),
        question_number: current_match.map(|m| m.questions_asked + 1),
        champion: t.bracket.champion.as_deref(),
    })
}

/// Submit an answer for the current question.
#[post("/api/tournaments/{id}/answers")]
async fn api_submit_answer(
    state: AppState,
    path: Path<GamePath>,
    body: Json<AnswerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("tournament"),
    };
    entry.last_activity = Instant::now();
    match submit_answer(
        &mut entry.game,
        &body.participant_id,
        body.option,
        body.time_remaining,
    ) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

/// The clock ran out on the current question.
#[post("/api/tournaments/{id}/timeout")]
async fn api_timeout(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("tournament"),
    };
    entry.last_activity = Instant::now();
    match handle_timeout(&mut entry.game) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

/// Completed bracket and all responses, for archiving (409 until a champion exists).
#[get("/api/tournaments/{id}/record")]
async fn api_record(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get(&path.id) {
        Some(entry) => match tournament_record(&entry.game) {
            Ok(record) => HttpResponse::Ok().json(record),
            Err(e) => error_response(&e),
        },
        None => not_found("tournament"),
    }
}

/// Create a quick match for 2 to 6 players.
#[post("/api/quick-matches")]
async fn api_create_quick_match(
    state: AppState,
    bank: BankState,
    body: Json<CreateQuickMatchBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let own_bank = body.questions.map(QuestionBank::new);
    let bank = own_bank.as_ref().unwrap_or(bank.get_ref());
    let quick_match =
        match start_quick_match(body.players, &body.settings, bank, &mut rand::thread_rng()) {
            Ok(qm) => qm,
            Err(e) => return error_response(&e),
        };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(quick_match.view());
    g.quick_matches.insert(quick_match.id, Entry::new(quick_match));
    response
}

#[get("/api/quick-matches/{id}")]
async fn api_get_quick_match(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.quick_matches.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.game.view())
        }
        None => not_found("quick match"),
    }
}

#[post("/api/quick-matches/{id}/answers")]
async fn api_quick_match_answer(
    state: AppState,
    path: Path<GamePath>,
    body: Json<AnswerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.quick_matches.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("quick match"),
    };
    entry.last_activity = Instant::now();
    match answer_quick_match(
        &mut entry.game,
        &body.participant_id,
        body.option,
        body.time_remaining,
    ) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

#[post("/api/quick-matches/{id}/timeout")]
async fn api_quick_match_timeout(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.quick_matches.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found("quick match"),
    };
    entry.last_activity = Instant::now();
    match timeout_quick_match(&mut entry.game) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn load_question_bank() -> std::io::Result<QuestionBank> {
    let Ok(path) = std::env::var("QUESTION_BANK") else {
        log::warn!("QUESTION_BANK not set; games must supply their own questions");
        return Ok(QuestionBank::default());
    };
    let bank = QuestionBank::from_path(std::path::Path::new(&path))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    log::info!("Loaded {} questions from {}", bank.len(), path);
    Ok(bank)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bank = Data::new(load_question_bank()?);

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Sessions::default()));

    // Background task: every 30 minutes, remove games inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.tournaments.len() + g.quick_matches.len();
            g.tournaments
                .retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            g.quick_matches
                .retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - (g.tournaments.len() + g.quick_matches.len());
            if removed > 0 {
                log::info!("Cleaned up {} inactive game(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(bank.clone())
            .app_data(web::JsonConfig::default().limit(4 * 1024 * 1024))
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_current)
            .service(api_submit_answer)
            .service(api_timeout)
            .service(api_record)
            .service(api_create_quick_match)
            .service(api_get_quick_match)
            .service(api_quick_match_answer)
            .service(api_quick_match_timeout)
    })
    .bind(bind)?
    .run()
    .await
}
