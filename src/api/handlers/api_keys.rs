//! API key handlers: create, list, get, deactivate.
//!
//! Keys are append-only: there is no update or delete, only a one-way
//! deactivation flip.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ApiKeyListResponse, ApiKeyResponse, CreateApiKeyRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PagesmithError};

/// `POST /keys` — Register a new API key.
///
/// The request carries the key hash, never the plaintext key.
///
/// # Errors
///
/// Returns [`PagesmithError::DuplicateKeyHash`] when a key with the
/// same hash already exists, or [`PagesmithError::InvalidRequest`] when
/// a required field is empty.
#[utoipa::path(
    post,
    path = "/api/v1/keys",
    tag = "ApiKeys",
    summary = "Create an API key",
    description = "Stores a new API key record from a pre-hashed key. The hash must be unique.",
    request_body = CreateApiKeyRequest,
    responses(
        (status = 201, description = "Key created", body = ApiKeyResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "A key with this hash already exists", body = ErrorResponse),
    )
)]
pub async fn create_key(
    State(state): State<AppState>,
    Json(req): Json<CreateApiKeyRequest>,
) -> Result<impl IntoResponse, PagesmithError> {
    if req.name.trim().is_empty() {
        return Err(PagesmithError::InvalidRequest(
            "name must not be empty".to_string(),
        ));
    }
    if req.key_hash.trim().is_empty() {
        return Err(PagesmithError::InvalidRequest(
            "key_hash must not be empty".to_string(),
        ));
    }

    let id = state.store.create_api_key(&req.into()).await?;
    let key = state
        .store
        .get_api_key(id)
        .await?
        .ok_or_else(|| PagesmithError::Internal("key missing after insert".to_string()))?;

    tracing::info!(id, name = %key.name, "api key created");
    Ok((StatusCode::CREATED, Json(ApiKeyResponse::from(key))))
}

/// `GET /keys` — List all API keys, newest first.
///
/// # Errors
///
/// Returns a storage error on read failure.
#[utoipa::path(
    get,
    path = "/api/v1/keys",
    tag = "ApiKeys",
    summary = "List API keys",
    description = "Returns every stored key ordered by creation time descending.",
    responses(
        (status = 200, description = "Key list", body = ApiKeyListResponse),
    )
)]
pub async fn list_keys(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PagesmithError> {
    let keys = state.store.list_api_keys().await?;
    let total = keys.len() as u32;
    let data: Vec<ApiKeyResponse> = keys.into_iter().map(ApiKeyResponse::from).collect();
    Ok(Json(ApiKeyListResponse { data, total }))
}

/// `GET /keys/:id` — Get a single API key.
///
/// # Errors
///
/// Returns [`PagesmithError::ApiKeyNotFound`] if no key has that ID.
#[utoipa::path(
    get,
    path = "/api/v1/keys/{id}",
    tag = "ApiKeys",
    summary = "Get an API key",
    description = "Returns the key with the given ID.",
    params(
        ("id" = i64, Path, description = "Key ID"),
    ),
    responses(
        (status = 200, description = "Key details", body = ApiKeyResponse),
        (status = 404, description = "Key not found", body = ErrorResponse),
    )
)]
pub async fn get_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, PagesmithError> {
    let key = state
        .store
        .get_api_key(id)
        .await?
        .ok_or(PagesmithError::ApiKeyNotFound(id))?;
    Ok(Json(ApiKeyResponse::from(key)))
}

/// `POST /keys/:id/deactivate` — Permanently deactivate a key.
///
/// Deactivation is idempotent and, matching the store's unconditional
/// update, succeeds even for IDs that do not exist.
///
/// # Errors
///
/// Returns a storage error on write failure.
#[utoipa::path(
    post,
    path = "/api/v1/keys/{id}/deactivate",
    tag = "ApiKeys",
    summary = "Deactivate an API key",
    description = "Flips the key's is_active flag to false. Irreversible. Unknown IDs are accepted and leave the table unchanged.",
    params(
        ("id" = i64, Path, description = "Key ID"),
    ),
    responses(
        (status = 204, description = "Key deactivated"),
    )
)]
pub async fn deactivate_key(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, PagesmithError> {
    state.store.deactivate_api_key(id).await?;
    tracing::info!(id, "api key deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// API key management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/keys", post(create_key).get(list_keys))
        .route("/keys/{id}", get(get_key))
        .route("/keys/{id}/deactivate", post(deactivate_key))
}
