//! Request log entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stardust_core::types::{DbId, Timestamp};

/// One captured inbound request (URL only), from the `request_logs`
/// table. Listed newest-first.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestLog {
    pub id: DbId,
    pub project_id: DbId,
    pub url: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a new request log.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRequestLog {
    pub project_id: DbId,
    pub url: String,
}
