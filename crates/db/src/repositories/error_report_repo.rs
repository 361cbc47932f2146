//! Repository for the `error_reports` table.

use chrono::Utc;
use sqlx::SqlitePool;
use stardust_core::types::DbId;

use crate::models::error_report::{CreateErrorReport, ErrorReport};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, exception, url, traceback, created_at";

/// Provides insert and query operations for error reports.
pub struct ErrorReportRepo;

impl ErrorReportRepo {
    /// Insert a single error report, returning the created row.
    pub async fn insert(
        pool: &SqlitePool,
        input: &CreateErrorReport,
    ) -> Result<ErrorReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO error_reports (project_id, exception, url, traceback, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ErrorReport>(&query)
            .bind(input.project_id)
            .bind(&input.exception)
            .bind(&input.url)
            .bind(&input.traceback)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// List error reports for a project, newest first.
    pub async fn list_for_project(
        pool: &SqlitePool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ErrorReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM error_reports
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ErrorReport>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count all stored error reports.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM error_reports")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
