//! System endpoints: HTML console landing page and liveness check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::error::PagesmithError;

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    phase: String,
}

/// `GET /health` — Service liveness.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns a fixed liveness payload with the current development phase.",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            phase: "1".to_string(),
        }),
    )
}

/// `GET /` — HTML console landing page.
///
/// Renders the stored blog title and description, falling back to the
/// service name while no settings are saved.
///
/// # Errors
///
/// Returns a storage error if reading the settings fails.
pub async fn home_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, PagesmithError> {
    let settings = state.store.get_settings().await?;
    let title = settings
        .as_ref()
        .map_or("Pagesmith", |s| s.blog_title.as_str());
    let description = settings.as_ref().map_or(
        "A static site blog manager with GitHub Pages deployment",
        |s| s.blog_description.as_str(),
    );

    let title = escape_html(title);
    let description = escape_html(description);
    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html>
  <head><title>{title}</title></head>
  <body>
    <div style="text-align: center; margin-top: 50px;">
      <h1>{title}</h1>
      <p>{description}</p>
      <p>Status: Phase 1 Development in Progress</p>
    </div>
  </body>
</html>
"#
    )))
}

/// Minimal HTML entity escaping for user-controlled text nodes.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<b>"A & B"</b>"#),
            "&lt;b&gt;&quot;A &amp; B&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain title"), "plain title");
    }
}
