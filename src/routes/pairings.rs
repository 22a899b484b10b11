use actix_web::{web, HttpResponse, Responder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use validator::Validate;

use crate::core::{Optimized, PairingEngine};
use crate::models::{
    ErrorResponse, HealthResponse, PairingRequest, PairingResponse, PastEvent, RecordEventRequest,
    RecordEventResponse,
};
use crate::services::{LeagueStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LeagueStore>,
    pub engine: PairingEngine,
    /// Seed used when a request does not carry one
    pub seed: Option<u64>,
    /// Append generated pairings to the event history
    pub record_history: bool,
}

/// Configure all pairing-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/pairings", web::post().to(create_pairings))
        .route("/players", web::get().to(list_players))
        .route("/events", web::get().to(list_events))
        .route("/events", web::post().to(record_event));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn internal_error(error: &str, message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 500,
    })
}

/// Form teams endpoint
///
/// POST /api/v1/pairings
///
/// Request body:
/// ```json
/// {
///   "playerIds": ["string" | number],
///   "teamSize": 4,
///   "iterations": 100,
///   "seed": 42
/// }
/// ```
async fn create_pairings(
    state: web::Data<AppState>,
    req: web::Json<PairingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for pairing request: {:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let player_ids = req.unique_player_ids();

    let engine = match (req.team_size, req.iterations) {
        (None, None) => state.engine,
        (team_size, iterations) => match PairingEngine::new(
            team_size.unwrap_or(state.engine.team_size()),
            iterations.unwrap_or(state.engine.iterations()),
        ) {
            Ok(engine) => engine,
            Err(e) => return bad_request("Validation failed", e.to_string()),
        },
    };

    let seed = req.seed.or(state.seed).unwrap_or_else(rand::random);
    let store = Arc::clone(&state.store);
    let record_history = state.record_history;

    tracing::info!(
        "Pairing {} players (team size {}, {} iterations, seed {})",
        player_ids.len(),
        engine.team_size(),
        engine.iterations(),
        seed
    );

    let outcome = web::block(move || -> Result<Optimized, StoreError> {
        let players = store.fetch_players(&player_ids)?;
        let past_events = store.fetch_past_events()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let result = engine.generate(players, &past_events, &mut rng);

        if record_history && !result.partition.is_empty() {
            store.record_event(result.partition.to_past_event().stamped())?;
        }

        Ok(result)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => {
            tracing::info!(
                "Formed {} teams (score {}, initial {}, {} improvements)",
                result.partition.team_count(),
                result.score,
                result.initial_score,
                result.improvements
            );

            HttpResponse::Ok().json(PairingResponse {
                teams: result.partition.into_teams(),
                score: result.score,
                initial_score: result.initial_score,
                improvements: result.improvements,
                seed,
            })
        }
        Ok(Err(e @ StoreError::UnknownPlayers(_))) => {
            tracing::info!("Rejected pairing request: {}", e);
            bad_request("Invalid player ids", e.to_string())
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to form pairings: {}", e);
            internal_error("Failed to form pairings", e.to_string())
        }
        Err(e) => {
            tracing::error!("Pairing task failed: {}", e);
            internal_error("Failed to form pairings", e.to_string())
        }
    }
}

/// List the roster with derived tiers
///
/// GET /api/v1/players
async fn list_players(state: web::Data<AppState>) -> impl Responder {
    let store = Arc::clone(&state.store);

    match web::block(move || store.list_players()).await {
        Ok(Ok(players)) => HttpResponse::Ok().json(players),
        Ok(Err(e)) => {
            tracing::error!("Failed to list players: {}", e);
            internal_error("Failed to list players", e.to_string())
        }
        Err(e) => internal_error("Failed to list players", e.to_string()),
    }
}

/// List recorded groupings
///
/// GET /api/v1/events
async fn list_events(state: web::Data<AppState>) -> impl Responder {
    let store = Arc::clone(&state.store);

    match web::block(move || store.fetch_past_events()).await {
        Ok(Ok(events)) => HttpResponse::Ok().json(events),
        Ok(Err(e)) => {
            tracing::error!("Failed to list events: {}", e);
            internal_error("Failed to list events", e.to_string())
        }
        Err(e) => internal_error("Failed to list events", e.to_string()),
    }
}

/// Record a finished grouping so later pairings avoid repeating it
///
/// POST /api/v1/events
///
/// Request body:
/// ```json
/// {
///   "teams": [["1", "2", "3", "4"], ["5", "6", "7", "8"]]
/// }
/// ```
async fn record_event(
    state: web::Data<AppState>,
    req: web::Json<RecordEventRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    if let Err(message) = req.check_teams() {
        return bad_request("Validation failed", message);
    }

    let player_ids = req.player_ids();
    let event = PastEvent::new(req.into_inner().teams).stamped();
    let event_id = event.id.clone().unwrap_or_default();
    let team_count = event.teams.len();
    let store = Arc::clone(&state.store);

    let outcome = web::block(move || -> Result<(), StoreError> {
        store.fetch_players(&player_ids)?;
        store.record_event(event)
    })
    .await;

    match outcome {
        Ok(Ok(())) => {
            tracing::info!("Recorded event {} with {} teams", event_id, team_count);
            HttpResponse::Ok().json(RecordEventResponse {
                success: true,
                event_id,
            })
        }
        Ok(Err(e @ StoreError::UnknownPlayers(_))) => {
            tracing::info!("Rejected event: {}", e);
            bad_request("Invalid player ids", e.to_string())
        }
        Ok(Err(e)) => {
            tracing::error!("Failed to record event: {}", e);
            internal_error("Failed to record event", e.to_string())
        }
        Err(e) => internal_error("Failed to record event", e.to_string()),
    }
}
