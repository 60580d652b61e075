// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Label routes (require authentication).

use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::services::Mutation;
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/labels/add", post(add_label).delete(remove_add_label))
        .route("/api/labels/{label_text}", delete(remove_label))
}

#[derive(Deserialize, Validate)]
pub struct AddLabelRequest {
    #[validate(length(min = 1, max = 100))]
    label: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LabelsResponse {
    pub labels: Vec<String>,
}

/// Append a label.
async fn add_label(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    AppJson(body): AppJson<AddLabelRequest>,
) -> Result<Json<LabelsResponse>> {
    body.validate()?;

    let user = state
        .habits
        .mutate(&auth.user_id, Mutation::AddLabel(body.label))
        .await?;

    Ok(Json(LabelsResponse {
        labels: user.labels,
    }))
}

/// Remove every occurrence of a label.
async fn remove_label(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(label_text): Path<String>,
) -> Result<Json<LabelsResponse>> {
    remove(&state, &auth, label_text).await
}

/// `DELETE /api/labels/add` matches the static add route, not the
/// `{label_text}` one, so the label "add" is removed here.
async fn remove_add_label(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<LabelsResponse>> {
    remove(&state, &auth, "add".to_string()).await
}

async fn remove(
    state: &AppState,
    auth: &AuthUser,
    label: String,
) -> Result<Json<LabelsResponse>> {
    let user = state
        .habits
        .mutate(&auth.user_id, Mutation::RemoveLabel(label))
        .await?;

    Ok(Json(LabelsResponse {
        labels: user.labels,
    }))
}
