//! REST endpoint handlers organized by resource.

pub mod api_keys;
pub mod deployment;
pub mod settings;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(settings::routes())
        .merge(api_keys::routes())
        .merge(deployment::routes())
}
