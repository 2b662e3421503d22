//! Deployment configuration handlers: read and replace.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{DeploymentResponse, UpdateDeploymentRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, PagesmithError};

/// `GET /deployment` — Current deployment configuration.
///
/// # Errors
///
/// Returns [`PagesmithError::DeploymentConfigNotFound`] when no
/// configuration has been saved yet.
#[utoipa::path(
    get,
    path = "/api/v1/deployment",
    tag = "Deployment",
    summary = "Get deployment configuration",
    description = "Returns the stored GitHub Pages deployment configuration.",
    responses(
        (status = 200, description = "Stored configuration", body = DeploymentResponse),
        (status = 404, description = "No configuration saved yet", body = ErrorResponse),
    )
)]
pub async fn get_deployment(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PagesmithError> {
    let config = state
        .store
        .get_deployment_config()
        .await?
        .ok_or(PagesmithError::DeploymentConfigNotFound)?;
    Ok(Json(DeploymentResponse::from(config)))
}

/// `PUT /deployment` — Replace the deployment configuration.
///
/// # Errors
///
/// Returns [`PagesmithError::InvalidRequest`] when `target_repo` is
/// empty, or a storage error on write failure.
#[utoipa::path(
    put,
    path = "/api/v1/deployment",
    tag = "Deployment",
    summary = "Replace deployment configuration",
    description = "Replaces the stored deployment configuration with the request body.",
    request_body = UpdateDeploymentRequest,
    responses(
        (status = 200, description = "Configuration stored", body = DeploymentResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn update_deployment(
    State(state): State<AppState>,
    Json(req): Json<UpdateDeploymentRequest>,
) -> Result<impl IntoResponse, PagesmithError> {
    if req.target_repo.trim().is_empty() {
        return Err(PagesmithError::InvalidRequest(
            "target_repo must not be empty".to_string(),
        ));
    }

    state.store.save_deployment_config(&req.into()).await?;
    let stored = state
        .store
        .get_deployment_config()
        .await?
        .ok_or_else(|| {
            PagesmithError::Internal("deployment config missing after save".to_string())
        })?;

    tracing::info!(target_repo = %stored.target_repo, "deployment configuration replaced");
    Ok(Json(DeploymentResponse::from(stored)))
}

/// Deployment configuration routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/deployment", get(get_deployment).put(update_deployment))
}
