use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use league_pairing::config::{Settings, StoreBackend};
use league_pairing::core::PairingEngine;
use league_pairing::routes::{self, handle_json_payload_error, AppState};
use league_pairing::services::{read_league, FileStore, LeagueData, LeagueStore, MemoryStore, StoreError};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match format {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }
}

/// Build the league store selected in the configuration
fn build_store(settings: &Settings) -> Result<Arc<dyn LeagueStore>, StoreError> {
    let default_handicap = settings.pairing.default_handicap;

    match (settings.store.backend, settings.store.path.as_deref()) {
        (StoreBackend::File, Some(path)) => {
            info!("Using file store at {}", path);
            Ok(Arc::new(FileStore::new(path, default_handicap)))
        }
        (StoreBackend::File, None) => Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "store.path is required for the file backend",
        ))),
        (StoreBackend::Memory, Some(path)) => {
            let data = read_league(std::path::Path::new(path))?;
            info!(
                "Using memory store seeded from {} ({} players, {} events)",
                path,
                data.players.len(),
                data.events.len()
            );
            Ok(Arc::new(MemoryStore::new(data, default_handicap)))
        }
        (StoreBackend::Memory, None) => {
            info!("Using empty memory store");
            Ok(Arc::new(MemoryStore::new(LeagueData::default(), default_handicap)))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting league pairing service...");

    let store = build_store(&settings).map_err(|e| {
        error!("Failed to initialize league store: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let engine = PairingEngine::new(settings.pairing.team_size, settings.pairing.iterations)
        .map_err(|e| {
            error!("Invalid pairing configuration: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
        })?;

    info!(
        "Pairing engine initialized (team size {}, {} iterations, record history: {})",
        engine.team_size(),
        engine.iterations(),
        settings.pairing.record_history
    );

    let app_state = AppState {
        store,
        engine,
        seed: settings.pairing.seed,
        record_history: settings.pairing.record_history,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
