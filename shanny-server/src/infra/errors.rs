use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use shanny_core::{ContactValidationError, RepositoryError};

pub type AppResult<T> = Result<T, AppError>;

/// Message shown to clients for every internal failure.
pub const SERVER_ERROR: &str = "Server error";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<ContactValidationError> for AppError {
    fn from(err: ContactValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        Self::body_rejected(err.status(), &err.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(err: FormRejection) -> Self {
        Self::body_rejected(err.status(), &err.body_text())
    }
}

impl AppError {
    /// Maps an extractor rejection without echoing its details to the client.
    fn body_rejected(status: StatusCode, detail: &str) -> Self {
        tracing::warn!(error = %detail, "rejected contact payload");
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request body too large.",
            );
        }
        Self::bad_request("Invalid request body.")
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        tracing::error!(error = %err, "contact message storage failed");
        Self::internal()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = ?err, "database operation failed");
        Self::internal()
    }
}
