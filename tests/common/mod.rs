// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use rehabits::config::Config;
use rehabits::db::{FirestoreDb, MemoryStore};
use rehabits::routes::create_router;
use rehabits::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by an in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::default(),
        Arc::new(MemoryStore::new()),
    ));
    (create_router(state.clone()), state)
}

/// Create a test app whose store is offline (every store call fails).
#[allow(dead_code)]
pub fn create_offline_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        Config::default(),
        Arc::new(FirestoreDb::new_mock()),
    ));
    (create_router(state.clone()), state)
}

/// Send a request and return the status with the parsed JSON body
/// (`Value::Null` for an empty body, a string for non-JSON text).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

/// Register a user and return (user JSON, token).
#[allow(dead_code)]
pub async fn register(app: &Router, email: &str, password: &str) -> (Value, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/register",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");

    let token = body["token"].as_str().expect("token in response").to_string();
    (body["user"].clone(), token)
}

/// Add a habit and return its generated id.
#[allow(dead_code)]
pub async fn add_habit(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/habits/add",
        Some(token),
        Some(serde_json::json!({ "habit": { "name": name } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "add habit failed: {body}");

    body["habits"]
        .as_array()
        .and_then(|habits| habits.last())
        .and_then(|habit| habit["_id"].as_str())
        .expect("habit id")
        .to_string()
}
