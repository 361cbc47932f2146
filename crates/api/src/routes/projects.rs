//! Route definitions for project management and telemetry review.
//!
//! Mounted at `/panel` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Panel routes (operator only).
///
/// ```text
/// GET    /projects                  -> list_projects
/// POST   /projects                  -> create_project
/// GET    /projects/{id}             -> get_project
/// DELETE /projects/{id}             -> delete_project
/// GET    /projects/{id}/errors      -> list_errors
/// GET    /projects/{id}/responses   -> list_responses
/// GET    /projects/{id}/requests    -> list_requests
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project).delete(projects::delete_project),
        )
        .route("/projects/{id}/errors", get(projects::list_errors))
        .route("/projects/{id}/responses", get(projects::list_responses))
        .route("/projects/{id}/requests", get(projects::list_requests))
}
