use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const INVALID_TOKEN_MESSAGE: &str = "Password reset token is invalid or has expired.";

/// Outcome of a failed issue or redeem, independent of HTTP.
#[derive(Debug)]
pub enum ResetError {
    NotFound,
    InvalidOrExpired,
    DispatchFailed(String),
    Internal(String),
}

impl std::fmt::Display for ResetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetError::NotFound => write!(f, "account not found"),
            ResetError::InvalidOrExpired => write!(f, "reset token is invalid or has expired"),
            ResetError::DispatchFailed(msg) => write!(f, "mail dispatch failed: {msg}"),
            ResetError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for ResetError {}

impl From<sqlx::Error> for ResetError {
    fn from(err: sqlx::Error) -> Self {
        ResetError::Internal(format!("store: {err}"))
    }
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    InvalidOrExpired,
    DispatchFailed(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::InvalidOrExpired => write!(f, "Bad Request: {INVALID_TOKEN_MESSAGE}"),
            AppError::DispatchFailed(msg) => write!(f, "Dispatch Failed: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "message": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
            AppError::InvalidOrExpired => (
                StatusCode::BAD_REQUEST,
                json!({ "message": INVALID_TOKEN_MESSAGE }),
            ),
            AppError::DispatchFailed(err) => {
                tracing::error!("Mail dispatch failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Error sending email", "error": err }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal server error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<ResetError> for AppError {
    fn from(err: ResetError) -> Self {
        match err {
            ResetError::NotFound => AppError::NotFound("User not found".to_string()),
            ResetError::InvalidOrExpired => AppError::InvalidOrExpired,
            ResetError::DispatchFailed(msg) => AppError::DispatchFailed(msg),
            ResetError::Internal(msg) => AppError::Internal(msg),
        }
    }
}
