//! Error report entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stardust_core::types::{DbId, Timestamp};

/// One captured unhandled exception, from the `error_reports` table.
/// Immutable once created; listed newest-first.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ErrorReport {
    pub id: DbId,
    pub project_id: DbId,
    pub exception: String,
    pub url: String,
    pub traceback: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new error report. Fields are assumed to already
/// be validated and size-capped by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateErrorReport {
    pub project_id: DbId,
    pub exception: String,
    pub url: String,
    pub traceback: String,
}
