//! Deployment configuration DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::{DeploymentConfig, NewDeploymentConfig};

/// Request body for `PUT /api/v1/deployment`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateDeploymentRequest {
    /// Repository the built site is pushed to.
    pub target_repo: String,
    /// Branch the built site is pushed to. Defaults to `gh-pages`.
    #[serde(default = "default_target_branch")]
    pub target_branch: String,
    /// Shell command that builds the site. Defaults to `npm run build`.
    #[serde(default = "default_build_command")]
    pub build_command: String,
    /// Custom domain served by GitHub Pages, if any.
    #[serde(default)]
    pub custom_domain: Option<String>,
    /// Whether pushes trigger deployment automatically. Defaults to true.
    #[serde(default = "default_auto_deploy")]
    pub auto_deploy: bool,
}

/// Response body for deployment configuration endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeploymentResponse {
    /// Repository the built site is pushed to.
    pub target_repo: String,
    /// Branch the built site is pushed to.
    pub target_branch: String,
    /// Shell command that builds the site.
    pub build_command: String,
    /// Custom domain served by GitHub Pages, if any.
    pub custom_domain: Option<String>,
    /// Whether pushes trigger deployment automatically.
    pub auto_deploy: bool,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last write time.
    pub updated_at: DateTime<Utc>,
}

fn default_target_branch() -> String {
    "gh-pages".to_string()
}

fn default_build_command() -> String {
    "npm run build".to_string()
}

fn default_auto_deploy() -> bool {
    true
}

impl From<UpdateDeploymentRequest> for NewDeploymentConfig {
    fn from(req: UpdateDeploymentRequest) -> Self {
        Self {
            target_repo: req.target_repo,
            target_branch: req.target_branch,
            build_command: req.build_command,
            custom_domain: req.custom_domain,
            auto_deploy: req.auto_deploy,
        }
    }
}

impl From<DeploymentConfig> for DeploymentResponse {
    fn from(c: DeploymentConfig) -> Self {
        Self {
            target_repo: c.target_repo,
            target_branch: c.target_branch,
            build_command: c.build_command,
            custom_domain: c.custom_domain,
            auto_deploy: c.auto_deploy,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
