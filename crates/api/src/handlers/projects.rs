//! Handlers for project management and telemetry review.
//!
//! These back the panel's data needs as JSON. All endpoints require
//! the operator account (HTTP Basic).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use stardust_core::error::CoreError;
use stardust_core::telemetry::{clamp_limit, clamp_offset};
use stardust_core::types::DbId;
use stardust_db::models::project::CreateProject;
use stardust_db::repositories::{
    ErrorReportRepo, ProjectRepo, RequestLogRepo, ResponseSampleRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Operator;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pagination parameters for telemetry listings.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Ensure a project exists, returning 404 otherwise.
async fn require_project(state: &AppState, id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

// ---------------------------------------------------------------------------
// POST /panel/projects
// ---------------------------------------------------------------------------

/// Register a new reporting project.
pub async fn create_project(
    operator: Operator,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let project = ProjectRepo::create(&state.pool, &input).await?;

    tracing::info!(
        project_id = project.id,
        operator = %operator.username,
        "Project created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

// ---------------------------------------------------------------------------
// GET /panel/projects
// ---------------------------------------------------------------------------

/// List all projects, newest first.
pub async fn list_projects(
    _operator: Operator,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

// ---------------------------------------------------------------------------
// GET /panel/projects/:id
// ---------------------------------------------------------------------------

/// Get a single project by ID.
pub async fn get_project(
    _operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// DELETE /panel/projects/:id
// ---------------------------------------------------------------------------

/// Delete a project and, by cascade, all its telemetry.
pub async fn delete_project(
    operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    tracing::info!(project_id = id, operator = %operator.username, "Project deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /panel/projects/:id/errors | /responses | /requests
// ---------------------------------------------------------------------------

/// List a project's error reports, newest first.
pub async fn list_errors(
    _operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    require_project(&state, id).await?;
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let reports = ErrorReportRepo::list_for_project(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// List a project's response timing samples, newest first.
pub async fn list_responses(
    _operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    require_project(&state, id).await?;
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let samples = ResponseSampleRepo::list_for_project(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: samples }))
}

/// List a project's request logs, newest first.
pub async fn list_requests(
    _operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    require_project(&state, id).await?;
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let logs = RequestLogRepo::list_for_project(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: logs }))
}
