//! Repository for the `response_samples` table.

use chrono::Utc;
use sqlx::SqlitePool;
use stardust_core::types::DbId;

use crate::models::response_sample::{CreateResponseSample, ResponseSample};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, url, time_secs, created_at";

/// Provides insert and query operations for response timing samples.
pub struct ResponseSampleRepo;

impl ResponseSampleRepo {
    /// Insert a single response sample, returning the created row.
    pub async fn insert(
        pool: &SqlitePool,
        input: &CreateResponseSample,
    ) -> Result<ResponseSample, sqlx::Error> {
        let query = format!(
            "INSERT INTO response_samples (project_id, url, time_secs, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResponseSample>(&query)
            .bind(input.project_id)
            .bind(&input.url)
            .bind(input.time_secs)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List response samples for a project, newest first.
    pub async fn list_for_project(
        pool: &SqlitePool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ResponseSample>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM response_samples
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ResponseSample>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all stored response samples.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM response_samples")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
