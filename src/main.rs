use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use neighborhood_matcher::config::{LoggingSettings, Settings, StorageBackend};
use neighborhood_matcher::routes::{self, AppState};
use neighborhood_matcher::services::{InMemoryStore, NeighborhoodStore, PostgresStore, RankingService};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

async fn build_store(settings: &Settings) -> std::io::Result<Arc<dyn NeighborhoodStore>> {
    let database = &settings.database;

    match database.backend {
        StorageBackend::Memory => {
            let store = match &database.seed_file {
                Some(path) => InMemoryStore::from_seed_file(path).map_err(|e| {
                    error!("Failed to load seed data: {}", e);
                    std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
                })?,
                None => InMemoryStore::new(),
            };
            info!("Using in-memory neighborhood store");
            let store: Arc<dyn NeighborhoodStore> = Arc::new(store);
            Ok(store)
        }
        StorageBackend::Postgres => {
            let store = PostgresStore::from_settings(
                &database.url,
                database.max_connections,
                database.min_connections,
                database.acquire_timeout_secs,
                database.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
            })?;
            info!(
                "PostgreSQL store initialized (max: {} connections)",
                database.max_connections.unwrap_or(10)
            );
            let store: Arc<dyn NeighborhoodStore> = Arc::new(store);
            Ok(store)
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

    init_logging(&settings.logging);

    info!("Starting neighborhood matcher...");

    let store = build_store(&settings).await?;
    let ranking = RankingService::new(store, settings.scoring.unknown_keys);

    info!("Ranking service ready (unknown keys: {:?})", ranking.policy());

    let app_state = AppState { ranking };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();
        let state = app_state.clone();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(|cfg| routes::configure_app(cfg, state))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
