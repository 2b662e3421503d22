//! Blog settings handlers: read and replace.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{SettingsResponse, UpdateSettingsRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PagesmithError};

/// `GET /settings` — Current blog settings.
///
/// # Errors
///
/// Returns [`PagesmithError::SettingsNotFound`] when no settings have
/// been saved yet.
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "Settings",
    summary = "Get blog settings",
    description = "Returns the stored blog settings. The settings table holds at most one record.",
    responses(
        (status = 200, description = "Stored settings", body = SettingsResponse),
        (status = 404, description = "No settings saved yet", body = ErrorResponse),
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PagesmithError> {
    let settings = state
        .store
        .get_settings()
        .await?
        .ok_or(PagesmithError::SettingsNotFound)?;
    Ok(Json(SettingsResponse::from(settings)))
}

/// `PUT /settings` — Replace the blog settings.
///
/// The previous record, if any, is discarded entirely; there is no
/// partial update.
///
/// # Errors
///
/// Returns [`PagesmithError::InvalidRequest`] when a required field is
/// empty, or a storage error on write failure.
#[utoipa::path(
    put,
    path = "/api/v1/settings",
    tag = "Settings",
    summary = "Replace blog settings",
    description = "Replaces the stored settings with the request body. Write semantics are replace, not merge.",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings stored", body = SettingsResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, PagesmithError> {
    if req.blog_title.trim().is_empty() {
        return Err(PagesmithError::InvalidRequest(
            "blog_title must not be empty".to_string(),
        ));
    }
    if req.blog_description.trim().is_empty() {
        return Err(PagesmithError::InvalidRequest(
            "blog_description must not be empty".to_string(),
        ));
    }
    if req.github_repo.trim().is_empty() {
        return Err(PagesmithError::InvalidRequest(
            "github_repo must not be empty".to_string(),
        ));
    }

    state.store.save_settings(&req.into()).await?;
    let stored = state
        .store
        .get_settings()
        .await?
        .ok_or_else(|| PagesmithError::Internal("settings missing after save".to_string()))?;

    tracing::info!(blog_title = %stored.blog_title, "blog settings replaced");
    Ok(Json(SettingsResponse::from(stored)))
}

/// Blog settings routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}
