// Route exports
pub mod matches;

use crate::models::ErrorResponse;
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::fmt;

pub use matches::AppState;

/// JSON error for rejected payloads and query strings
#[derive(Debug)]
pub struct PayloadError(ErrorResponse);

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for PayloadError {}

impl error::ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Bodies that fail to deserialize are malformed requests, not server errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    PayloadError(ErrorResponse::new(
        "Malformed request",
        format!("Invalid JSON body: {}", err),
        400,
    ))
    .into()
}

pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    PayloadError(ErrorResponse::new(
        "Malformed request",
        format!("Invalid query: {}", err),
        400,
    ))
    .into()
}

/// Register shared state, extractor error handlers and every route
pub fn configure_app(cfg: &mut web::ServiceConfig, state: AppState) {
    cfg.app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .configure(configure_routes);
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(matches::configure),
    );
}
