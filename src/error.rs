use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::reorder::MoveError;

/// Input rejected before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    MissingCredentials,
    EmptyText,
    TextTooLong,
    DueDateFormat,
}

impl Invalid {
    pub fn message(self) -> &'static str {
        match self {
            Invalid::MissingCredentials => "Username and password are required.",
            Invalid::EmptyText => "Task text cannot be empty.",
            Invalid::TextTooLong => "Task text is too long.",
            Invalid::DueDateFormat => "Due date must be in YYYY-MM-DD format.",
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Database(String),
    Internal(String),
    NotFound,
    BadRequest(&'static str),
    Validation(Invalid),
    DuplicateUsername,
    InvalidCredentials,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            AppError::Validation(invalid) => {
                (StatusCode::UNPROCESSABLE_ENTITY, invalid.message().to_string())
            }
            AppError::DuplicateUsername => {
                (StatusCode::CONFLICT, "Username already exists".to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<MoveError> for AppError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::SourceOutOfRange { .. } => AppError::BadRequest("old_index out of range"),
            MoveError::TargetOutOfRange { .. } => AppError::BadRequest("new_index out of range"),
        }
    }
}
