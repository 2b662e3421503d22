//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All JSON endpoints are mounted under `/api/v1`; the HTML console and
//! the liveness endpoint live at the root.

pub mod dto;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

/// OpenAPI document covering every JSON endpoint.
#[derive(Debug, utoipa::OpenApi)]
#[openapi(
    paths(
        handlers::system::health_handler,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::api_keys::create_key,
        handlers::api_keys::list_keys,
        handlers::api_keys::get_key,
        handlers::api_keys::deactivate_key,
        handlers::deployment::get_deployment,
        handlers::deployment::update_deployment,
    ),
    tags(
        (name = "System", description = "Liveness and console"),
        (name = "Settings", description = "Blog settings (singleton record)"),
        (name = "ApiKeys", description = "API key management"),
        (name = "Deployment", description = "GitHub Pages deployment configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete router with all REST endpoints.
///
/// With the `swagger-ui` feature enabled (default), interactive API
/// docs are served at `/docs`.
#[must_use]
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/docs")
            .url("/api-docs/openapi.json", <ApiDoc as utoipa::OpenApi>::openapi()),
    );

    router
}
