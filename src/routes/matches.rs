use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{CreateNeighborhoodRequest, ErrorResponse, HealthResponse, ListQuery, NewNeighborhood, RankRequest, RecordFilter};
use crate::services::{RankingError, RankingService, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub ranking: RankingService,
}

/// Configure all neighborhood routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match", web::get().to(list_neighborhoods))
        .route("/match", web::post().to(rank_neighborhoods))
        .route("/neighborhoods", web::post().to(create_neighborhood));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.ranking.healthy().await { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn ranking_error_response(context: &str, err: &RankingError) -> HttpResponse {
    match err {
        RankingError::StorageUnavailable(source) => {
            tracing::error!("{}: {}", context, source);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                context,
                err.to_string(),
                500,
            ))
        }
        RankingError::MalformedRequest(_) => {
            tracing::info!("{}: {}", context, err);
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "Malformed request",
                err.to_string(),
                400,
            ))
        }
    }
}

/// List all neighborhoods, unscored
///
/// GET /api/match?name={substring}
async fn list_neighborhoods(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    let filter = match &query.name {
        Some(name) => RecordFilter::name_contains(name.clone()),
        None => RecordFilter::all(),
    };

    match state.ranking.list(&filter).await {
        Ok(records) => {
            tracing::info!("Listing {} neighborhoods", records.len());
            HttpResponse::Ok().json(records)
        }
        Err(e) => ranking_error_response("Failed to fetch neighborhood data", &e),
    }
}

/// Rank neighborhoods against preferences
///
/// POST /api/match
///
/// Request body:
/// ```json
/// { "preferences": ["safety", "cafes"] }
/// ```
///
/// Responds with every neighborhood plus its `score`, highest first.
async fn rank_neighborhoods(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    tracing::info!("Ranking neighborhoods for preferences {:?}", req.preferences);

    match state.ranking.rank(req.preferences.as_slice()).await {
        Ok(ranked) => {
            tracing::info!("Returning {} ranked neighborhoods", ranked.len());
            HttpResponse::Ok().json(ranked)
        }
        Err(e) => ranking_error_response("Failed to rank neighborhoods", &e),
    }
}

/// Create a neighborhood record
///
/// POST /api/neighborhoods
///
/// Request body:
/// ```json
/// { "name": "Oakwood", "safety": 8, "cafes": 6, "parks": 9, "schools": 7, "publicTransport": 5 }
/// ```
async fn create_neighborhood(
    state: web::Data<AppState>,
    req: web::Json<CreateNeighborhoodRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let neighborhood = NewNeighborhood::from(req.into_inner());

    match state.ranking.create(neighborhood).await {
        Ok(record) => {
            tracing::info!("Created neighborhood {} ({})", record.name, record.id);
            HttpResponse::Created().json(record)
        }
        Err(StoreError::InvalidInput(message)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", message, 400))
        }
        Err(e) => {
            tracing::error!("Failed to create neighborhood: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to create neighborhood",
                e.to_string(),
                500,
            ))
        }
    }
}
