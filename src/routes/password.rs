use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::UnknownEmailMode;
use crate::error::{AppError, ResetError};
use crate::state::SharedState;

const RESET_LINK_SENT: &str = "Reset link sent to your email";

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    if req.email.is_empty() {
        return Err(AppError::BadRequest("Email is required".to_string()));
    }

    match state.resets.request_reset(&req.email).await {
        Ok(_) => Ok(MessageResponse::new(RESET_LINK_SENT)),
        Err(err) if state.unknown_email == UnknownEmailMode::Uniform => match err {
            ResetError::NotFound => {
                tracing::debug!("Password reset requested for unknown email");
                Ok(MessageResponse::new(RESET_LINK_SENT))
            }
            ResetError::DispatchFailed(e) => {
                tracing::error!("Failed to send password reset email: {e}");
                Ok(MessageResponse::new(RESET_LINK_SENT))
            }
            other => Err(other.into()),
        },
        Err(err) => Err(err.into()),
    }
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Path(token): Path<String>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Password is required".to_string()));
    }

    state.resets.reset_password(&token, &req.password).await?;

    Ok(MessageResponse::new("Password has been updated"))
}
