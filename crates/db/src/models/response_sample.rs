//! Response timing sample entity model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stardust_core::types::{DbId, Timestamp};

/// One request-timing sample, from the `response_samples` table.
///
/// `time_secs` holds the elapsed seconds exactly as submitted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResponseSample {
    pub id: DbId,
    pub project_id: DbId,
    pub url: String,
    pub time_secs: f64,
    pub created_at: Timestamp,
}

/// DTO for inserting a new response sample.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponseSample {
    pub project_id: DbId,
    pub url: String,
    pub time_secs: f64,
}
