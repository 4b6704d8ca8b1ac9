/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / validation error / auth error / upload error を統一的に変換
 *
 * Body shapes
 * - auth / bad request / server error: {"error": "<message>"}
 * - validation:                        {"errors": [FieldError, ...]}
 * - not found:                         {"message": "<Resource> not found"}
 */
use axum::{
    Json,
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::repos::error::RepoError;
use crate::services::auth::AuthError;
use crate::services::uploads::UploadError;

/// One failed field check, in the `{type, msg, path, location}` shape API
/// clients already parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub msg: &'static str,
    pub path: &'static str,
    pub location: &'static str,
}

impl FieldError {
    pub fn body(path: &'static str, msg: &'static str) -> Self {
        Self {
            kind: "field",
            msg,
            path,
            location: "body",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    BadRequest(String),
    #[error("{resource} not found")]
    NotFound { resource: &'static str },
    #[error("{0}")]
    Conflict(&'static str),
    #[error("File too large")]
    PayloadTooLarge,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            AppError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, json!({ "message": self.to_string() }))
            }
            AppError::Conflict(message) => (StatusCode::CONFLICT, json!({ "error": message })),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "error": self.to_string() }),
            ),
            AppError::Auth(e) => (e.status(), json!({ "error": e.to_string() })),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict("Record already exists"),
            RepoError::ForeignKey => AppError::bad_request("Referenced record does not exist"),
            RepoError::Db(e) => {
                error!(error = %e, "database error");
                AppError::Internal
            }
        }
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::InvalidType(message) => AppError::bad_request(message),
            UploadError::TooLarge => AppError::PayloadTooLarge,
            UploadError::Io(e) => {
                error!(error = %e, "failed to store upload");
                AppError::Internal
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }
        warn!(error = %e, "malformed multipart body");
        AppError::bad_request(e.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        debug!(error = %e, "rejected json body");
        AppError::bad_request(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), 1024 * 1024)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn auth_errors_render_a_flat_error_message() {
        let (status, body) = body_of(AuthError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "Invalid credentials"}));

        let (status, body) = body_of(AuthError::InvalidToken.into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({"error": "Invalid token"}));
    }

    #[tokio::test]
    async fn validation_errors_render_a_list() {
        let err = AppError::Validation(vec![FieldError::body("username", "Invalid value")]);
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"errors": [{"type": "field", "msg": "Invalid value", "path": "username", "location": "body"}]})
        );
    }

    #[tokio::test]
    async fn not_found_names_the_resource() {
        let (status, body) = body_of(AppError::not_found("Human")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Human not found"}));
    }

    #[tokio::test]
    async fn repo_constraint_errors_are_client_errors() {
        let (status, _) = body_of(RepoError::Conflict.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = body_of(RepoError::ForeignKey.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
