// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StoreError;
use crate::services::habits::HabitError;
use crate::services::token::TokenError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid Password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid Token")]
    InvalidToken,

    #[error("Habit not found")]
    HabitNotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            AppError::DuplicateEmail => (StatusCode::FORBIDDEN, None),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, None),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, None),
            AppError::InvalidToken => (StatusCode::FORBIDDEN, None),
            AppError::HabitNotFound => (StatusCode::NOT_FOUND, None),
            AppError::BadRequest(msg) => (StatusCode::UNPROCESSABLE_ENTITY, Some(msg.clone())),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let error = match &self {
            AppError::BadRequest(_) => "Invalid request".to_string(),
            AppError::Database(_) | AppError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            StoreError::Backend(msg) => AppError::Database(msg),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => AppError::InvalidToken,
            TokenError::Signing(e) => AppError::Internal(anyhow::anyhow!("token signing: {}", e)),
        }
    }
}

impl From<HabitError> for AppError {
    fn from(err: HabitError) -> Self {
        match err {
            HabitError::HabitNotFound(_) => AppError::HabitNotFound,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
