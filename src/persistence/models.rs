//! Row models for the configuration store.
//!
//! Each record type comes in two flavors: a `New*` struct describing
//! what the caller wants persisted, and the full struct mirroring a
//! stored row including identifiers and store-assigned timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog settings as provided by the caller. Timestamps are assigned by
/// the store on write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewBlogSettings {
    /// Blog title shown on the rendered site.
    pub blog_title: String,
    /// Short description of the blog.
    pub blog_description: String,
    /// Source repository in `owner/repo` form (not validated).
    pub github_repo: String,
    /// Branch holding the blog sources.
    pub github_branch: String,
    /// Public GitHub Pages URL, if known.
    pub github_pages_url: Option<String>,
    /// Theme identifier.
    pub theme: String,
    /// Additional CSS appended to the theme.
    pub custom_css: Option<String>,
}

/// A stored blog settings row (singleton table).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlogSettings {
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
    /// Row creation time, set by the store.
    pub created_at: DateTime<Utc>,
    /// Last write time, set by the store.
    pub updated_at: DateTime<Utc>,
}

/// An API key as provided by the caller.
///
/// The `key_hash` is assumed to be pre-hashed; the store never hashes.
/// New keys are always stored active with a creation timestamp assigned
/// at insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewApiKey {
    /// Human-readable key name.
    pub name: String,
    /// Hash of the key material (unique across all rows).
    pub key_hash: String,
    /// Ordered permission strings, stored as JSON text.
    pub permissions: Vec<String>,
}

/// A stored API key row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiKey {
    /// Auto-assigned row ID.
    pub id: i64,
    /// Human-readable key name.
    pub name: String,
    /// Hash of the key material.
    pub key_hash: String,
    /// Ordered permission strings.
    pub permissions: Vec<String>,
    /// Whether the key is usable. Flips to `false` once, irreversibly.
    pub is_active: bool,
    /// Row creation time, set by the store.
    pub created_at: DateTime<Utc>,
}

/// Deployment configuration as provided by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDeploymentConfig {
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
}

/// A stored deployment configuration row (singleton table).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeploymentConfig {
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
    /// Row creation time, set by the store.
    pub created_at: DateTime<Utc>,
    /// Last write time, set by the store.
    pub updated_at: DateTime<Utc>,
}
