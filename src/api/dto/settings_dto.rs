//! Blog settings DTOs for the read and replace endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::{BlogSettings, NewBlogSettings};

/// Request body for `PUT /api/v1/settings`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    /// Blog title shown on the rendered site.
    pub blog_title: String,
    /// Short description of the blog.
    pub blog_description: String,
    /// Source repository in `owner/repo` form.
    pub github_repo: String,
    /// Branch holding the blog sources. Defaults to `main`.
    #[serde(default = "default_github_branch")]
    pub github_branch: String,
    /// Public GitHub Pages URL, if known.
    #[serde(default)]
    pub github_pages_url: Option<String>,
    /// Theme identifier. Defaults to `default`.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Additional CSS appended to the theme.
    #[serde(default)]
    pub custom_css: Option<String>,
}

/// Response body for settings endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    /// Blog title shown on the rendered site.
    pub blog_title: String,
    /// Short description of the blog.
    pub blog_description: String,
    /// Source repository in `owner/repo` form.
    pub github_repo: String,
    /// Branch holding the blog sources.
    pub github_branch: String,
    /// Public GitHub Pages URL, if known.
    pub github_pages_url: Option<String>,
    /// Theme identifier.
    pub theme: String,
    /// Additional CSS appended to the theme.
    pub custom_css: Option<String>,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

fn default_github_branch() -> String {
    "main".to_string()
}

fn default_theme() -> String {
    "default".to_string()
}

impl From<UpdateSettingsRequest> for NewBlogSettings {
    fn from(req: UpdateSettingsRequest) -> Self {
        Self {
            blog_title: req.blog_title,
            blog_description: req.blog_description,
            github_repo: req.github_repo,
            github_branch: req.github_branch,
            github_pages_url: req.github_pages_url,
            theme: req.theme,
            custom_css: req.custom_css,
        }
    }
}

impl From<BlogSettings> for SettingsResponse {
    fn from(s: BlogSettings) -> Self {
        Self {
            blog_title: s.blog_title,
            blog_description: s.blog_description,
            github_repo: s.github_repo,
            github_branch: s.github_branch,
            github_pages_url: s.github_pages_url,
            theme: s.theme,
            custom_css: s.custom_css,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
