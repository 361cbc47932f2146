pub mod health;
pub mod ingest;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the ingestion and panel route tree.
///
/// Route hierarchy:
///
/// ```text
/// /api/error/                        ingest one exception (POST)
/// /api/response/                     ingest one timing sample (POST)
/// /api/request/                      ingest one request log (POST)
///
/// /panel/projects                    list, create (operator only)
/// /panel/projects/{id}               get, delete
/// /panel/projects/{id}/errors        error reports, newest first
/// /panel/projects/{id}/responses     timing samples, newest first
/// /panel/projects/{id}/requests      request logs, newest first
/// ```
///
/// The ingestion paths keep their trailing slash: that is the wire
/// contract every deployed agent posts to. `/health` is mounted
/// separately at root level by the caller.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/api", ingest::router())
        .nest("/panel", projects::router())
}
