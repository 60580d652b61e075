// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Habit routes (require authentication).
//!
//! Each handler maps its request onto one [`Mutation`] and answers with the
//! lists that mutation can change.

use axum::{
    extract::{Path, State},
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::models::{Habit, HabitFields, User};
use crate::services::Mutation;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/habits/add", post(add_habit))
        .route("/api/habits/done/{habit_id}", post(mark_done))
        .route("/api/habits/edit/{habit_id}", post(edit_habit))
        .route("/api/habits/delete/{habit_id}", post(delete_habit))
        .route("/api/habits/restore/{habit_id}", post(restore_habit))
}

#[derive(Deserialize)]
pub struct HabitRequest {
    habit: HabitFields,
}

#[derive(Deserialize, Validate)]
pub struct MarkDoneRequest {
    #[validate(length(min = 1))]
    date: String,
}

#[derive(Serialize)]
pub struct HabitsResponse {
    pub habits: Vec<Habit>,
}

#[derive(Serialize)]
pub struct HabitListsResponse {
    pub habits: Vec<Habit>,
    pub deleted: Vec<Habit>,
}

impl From<User> for HabitsResponse {
    fn from(user: User) -> Self {
        Self {
            habits: user.habits,
        }
    }
}

impl From<User> for HabitListsResponse {
    fn from(user: User) -> Self {
        Self {
            habits: user.habits,
            deleted: user.deleted,
        }
    }
}

async fn add_habit(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    AppJson(body): AppJson<HabitRequest>,
) -> Result<Json<HabitsResponse>> {
    let user = state
        .habits
        .mutate(&auth.user_id, Mutation::AddHabit(body.habit))
        .await?;
    Ok(Json(user.into()))
}

async fn mark_done(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(habit_id): Path<String>,
    AppJson(body): AppJson<MarkDoneRequest>,
) -> Result<Json<HabitsResponse>> {
    body.validate()?;

    let user = state
        .habits
        .mutate(
            &auth.user_id,
            Mutation::MarkDone {
                habit_id,
                date: body.date,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

async fn edit_habit(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(habit_id): Path<String>,
    AppJson(body): AppJson<HabitRequest>,
) -> Result<Json<HabitsResponse>> {
    let replacement = Habit::replacement(&habit_id, body.habit)
        .map_err(|e| AppError::BadRequest(format!("invalid markedAsDone: {}", e)))?;

    let user = state
        .habits
        .mutate(&auth.user_id, Mutation::EditHabit(replacement))
        .await?;
    Ok(Json(user.into()))
}

async fn delete_habit(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(habit_id): Path<String>,
) -> Result<Json<HabitListsResponse>> {
    let user = state
        .habits
        .mutate(&auth.user_id, Mutation::SoftDelete(habit_id))
        .await?;
    Ok(Json(user.into()))
}

async fn restore_habit(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(habit_id): Path<String>,
) -> Result<Json<HabitListsResponse>> {
    let user = state
        .habits
        .mutate(&auth.user_id, Mutation::Restore(habit_id))
        .await?;
    Ok(Json(user.into()))
}
