//! Shared helpers for router-level integration tests.

#![allow(dead_code)]

use anyhow::Result;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::util::ServiceExt;

use pagesmith::api;
use pagesmith::app_state::AppState;
use pagesmith::persistence::ConfigStore;

/// A fully wired application over an in-memory database.
pub struct TestContext {
    /// Store handle for direct state assertions.
    pub store: ConfigStore,
    /// Router ready for `oneshot` requests.
    pub app: Router,
}

/// Builds a router backed by a fresh in-memory SQLite database.
pub async fn build_test_context() -> Result<TestContext> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = ConfigStore::new(pool);
    store.init_schema().await?;

    let app = Router::new()
        .merge(api::build_router())
        .with_state(AppState {
            store: store.clone(),
        });

    Ok(TestContext { store, app })
}

/// Sends a request with an optional JSON body and returns the status
/// plus the parsed JSON response (Null for empty bodies).
pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

/// Sends a GET request and returns the status plus the raw UTF-8 body.
pub async fn request_text(app: &Router, uri: &str) -> Result<(StatusCode, String)> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())?;
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

/// Asserts the standard error envelope shape and numeric code.
pub fn assert_error_code(body: &Value, code: u64) {
    assert_eq!(
        body.pointer("/error/code").and_then(Value::as_u64),
        Some(code),
        "unexpected error body: {body}"
    );
    assert!(
        body.pointer("/error/message")
            .and_then(Value::as_str)
            .is_some_and(|m| !m.is_empty()),
        "error message missing: {body}"
    );
}
