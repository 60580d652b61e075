// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::models::{NewUser, UserView};
use crate::services::password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    password: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// Session established by register or login.
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserView,
    pub token: String,
}

/// Create an account and return it with a session token.
async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(mut body): AppJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    body.email = body.email.trim().to_string();
    body.validate()?;

    let password_hash = password::hash_password_blocking(body.password).await?;

    let user = state
        .directory
        .create(NewUser {
            email: body.email,
            password_hash,
            first_name: body.first_name,
            last_name: body.last_name,
        })
        .await
        .inspect_err(|err| {
            if matches!(err, AppError::DuplicateEmail) {
                tracing::info!("Registration rejected: email already registered");
            }
        })?;

    let token = state.tokens.issue(&user.id)?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// Check credentials and return the user with a fresh session token.
async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = state.directory.lookup_by_email(&body.email).await?;

    let valid =
        password::verify_password_blocking(body.password, user.password_hash.clone()).await?;
    if !valid {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.id)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}
