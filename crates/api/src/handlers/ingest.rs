//! Handlers for the telemetry ingestion endpoints.
//!
//! One endpoint per event kind, all with the same contract shape:
//! form-encoded POST, required fields present and non-empty, project
//! resolved by token. A missing or empty field is a 400; an
//! unresolvable token is a 403 and nothing is stored. Each accepted
//! submission creates exactly one row -- there is no deduplication.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::Deserialize;

use stardust_core::error::CoreError;
use stardust_core::telemetry;
use stardust_db::models::error_report::CreateErrorReport;
use stardust_db::models::project::Project;
use stardust_db::models::request_log::CreateRequestLog;
use stardust_db::models::response_sample::CreateResponseSample;
use stardust_db::repositories::{
    ErrorReportRepo, ProjectRepo, RequestLogRepo, ResponseSampleRepo,
};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolve the reporting project from a submitted token.
async fn resolve_project(state: &AppState, token: &str) -> AppResult<Project> {
    ProjectRepo::find_by_token(&state.pool, token)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Forbidden("Unknown project token".into())))
}

// ---------------------------------------------------------------------------
// POST /api/error/
// ---------------------------------------------------------------------------

/// Form payload for an error submission.
///
/// Every field is optional at the serde layer so that an incomplete
/// submission still deserializes; required-field checks run afterwards
/// and produce 400s that name the offending field.
#[derive(Debug, Deserialize)]
pub struct ErrorSubmission {
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub traceback: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Ingest one captured exception.
pub async fn add_error(
    State(state): State<AppState>,
    Form(payload): Form<ErrorSubmission>,
) -> AppResult<impl IntoResponse> {
    let exception = telemetry::require_field("exception", &payload.exception)?;
    let url = telemetry::require_field("url", &payload.url)?;
    let traceback = telemetry::require_field("traceback", &payload.traceback)?;
    let token = telemetry::require_field("token", &payload.token)?;

    let project = resolve_project(&state, token).await?;

    let report = ErrorReportRepo::insert(
        &state.pool,
        &CreateErrorReport {
            project_id: project.id,
            exception: telemetry::truncate_exception(exception).into_owned(),
            url: url.to_string(),
            traceback: telemetry::truncate_traceback(traceback).into_owned(),
        },
    )
    .await?;

    tracing::info!(
        project_id = project.id,
        error_report_id = report.id,
        "Error report ingested",
    );

    Ok(Json(DataResponse { data: report }))
}

// ---------------------------------------------------------------------------
// POST /api/response/
// ---------------------------------------------------------------------------

/// Form payload for a response-timing submission.
#[derive(Debug, Deserialize)]
pub struct ResponseSubmission {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Ingest one request-timing sample.
pub async fn add_response(
    State(state): State<AppState>,
    Form(payload): Form<ResponseSubmission>,
) -> AppResult<impl IntoResponse> {
    let raw_time = telemetry::require_field("time", &payload.time)?;
    let url = telemetry::require_field("url", &payload.url)?;
    let token = telemetry::require_field("token", &payload.token)?;

    let time_secs = telemetry::parse_time_secs(raw_time)?;
    let project = resolve_project(&state, token).await?;

    let sample = ResponseSampleRepo::insert(
        &state.pool,
        &CreateResponseSample {
            project_id: project.id,
            url: url.to_string(),
            time_secs,
        },
    )
    .await?;

    tracing::info!(
        project_id = project.id,
        response_sample_id = sample.id,
        time_secs,
        "Response sample ingested",
    );

    Ok(Json(DataResponse { data: sample }))
}

// ---------------------------------------------------------------------------
// POST /api/request/
// ---------------------------------------------------------------------------

/// Form payload for a request-log submission.
#[derive(Debug, Deserialize)]
pub struct RequestSubmission {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Ingest one inbound-request record.
pub async fn add_request(
    State(state): State<AppState>,
    Form(payload): Form<RequestSubmission>,
) -> AppResult<impl IntoResponse> {
    let url = telemetry::require_field("url", &payload.url)?;
    let token = telemetry::require_field("token", &payload.token)?;

    let project = resolve_project(&state, token).await?;

    let log = RequestLogRepo::insert(
        &state.pool,
        &CreateRequestLog {
            project_id: project.id,
            url: url.to_string(),
        },
    )
    .await?;

    tracing::info!(
        project_id = project.id,
        request_log_id = log.id,
        "Request log ingested",
    );

    Ok(Json(DataResponse { data: log }))
}
