//! Route definitions for telemetry ingestion.
//!
//! Mounted at `/api` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::ingest;
use crate::state::AppState;

/// Ingestion routes. POST only; other methods get a 405 with an
/// `Allow: POST` header from the method router.
///
/// ```text
/// POST   /error/      -> add_error
/// POST   /response/   -> add_response
/// POST   /request/    -> add_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/error/", post(ingest::add_error))
        .route("/response/", post(ingest::add_response))
        .route("/request/", post(ingest::add_request))
}
