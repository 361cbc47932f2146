//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stardust_core::types::{DbId, Timestamp};
use validator::Validate;

/// A project row from the `projects` table.
///
/// The `token` is the credential every telemetry submission carries to
/// identify its reporting application.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub url: String,
    pub token: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new project.
///
/// If `token` is omitted, a random UUID v4 token is generated at
/// insert time.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "Project name must not be empty"))]
    pub name: String,
    #[validate(url(message = "Project url must be a valid URL"))]
    pub url: String,
    pub token: Option<String>,
}
