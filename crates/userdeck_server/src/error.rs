//! HTTP error mapping for the users API.

use crate::directory::DirectoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use userdeck_core::FieldErrors;

/// Error returned by handlers; renders as `{ "error": ... }`.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("User {0} not found")]
    NotFound(u64),

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Internal server error")]
    Internal(String),
}

impl From<DirectoryError> for HttpError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(id) => HttpError::NotFound(id),
            DirectoryError::Validation(fields) => HttpError::Validation(fields),
            DirectoryError::Poisoned => HttpError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            HttpError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            HttpError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": message, "fields": fields }),
            ),
            HttpError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": message }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
