//! Repository for the `request_logs` table.

use chrono::Utc;
use sqlx::SqlitePool;
use stardust_core::types::DbId;

use crate::models::request_log::{CreateRequestLog, RequestLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, url, created_at";

/// Provides insert and query operations for request logs.
pub struct RequestLogRepo;

impl RequestLogRepo {
    /// Insert a single request log, returning the created row.
    pub async fn insert(
        pool: &SqlitePool,
        input: &CreateRequestLog,
    ) -> Result<RequestLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO request_logs (project_id, url, created_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RequestLog>(&query)
            .bind(input.project_id)
            .bind(&input.url)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List request logs for a project, newest first.
    pub async fn list_for_project(
        pool: &SqlitePool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RequestLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM request_logs
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, RequestLog>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all stored request logs.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM request_logs")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
