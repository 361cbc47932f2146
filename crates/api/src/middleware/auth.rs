//! HTTP Basic authentication extractor for the panel endpoints.
//!
//! The operator account is configured on the server (`OPERATOR_USERNAME`
//! / `OPERATOR_PASSWORD`); it is a separate identity from the per-project
//! ingestion token carried in telemetry submissions, which the ingestion
//! handlers resolve themselves.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use stardust_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated operator extracted from `Authorization: Basic` credentials.
///
/// Use this as an extractor parameter in any handler that requires the
/// operator account:
///
/// ```ignore
/// async fn my_handler(_operator: Operator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Operator {
    /// The authenticated username.
    pub username: String,
}

impl FromRequestParts<AppState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let encoded = auth_header.strip_prefix("Basic ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Basic <credentials>".into(),
            ))
        })?;

        let decoded = B64
            .decode(encoded.trim())
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Basic credentials are not valid base64".into(),
                ))
            })?;

        let (username, password) = decoded.split_once(':').ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Basic credentials must be username:password".into(),
            ))
        })?;

        if username != state.config.operator_username
            || password != state.config.operator_password
        {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid operator credentials".into(),
            )));
        }

        Ok(Operator {
            username: username.to_string(),
        })
    }
}
