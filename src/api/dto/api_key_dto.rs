//! API key DTOs for create, get, and list operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::persistence::{ApiKey, NewApiKey};

/// Request body for `POST /api/v1/keys`.
///
/// `key_hash` carries the hash of the key material; the service never
/// sees or stores the plaintext key.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateApiKeyRequest {
    /// Human-readable key name.
    pub name: String,
    /// Hash of the key material (unique across all keys).
    pub key_hash: String,
    /// Ordered permission strings. Defaults to empty.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// A single API key in responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiKeyResponse {
    /// Auto-assigned key ID.
    pub id: i64,
    /// Human-readable key name.
    pub name: String,
    /// Hash of the key material.
    pub key_hash: String,
    /// Ordered permission strings.
    pub permissions: Vec<String>,
    /// Whether the key is usable.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Response body for `GET /api/v1/keys`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiKeyListResponse {
    /// Keys ordered newest first.
    pub data: Vec<ApiKeyResponse>,
    /// Total number of keys.
    pub total: u32,
}

impl From<CreateApiKeyRequest> for NewApiKey {
    fn from(req: CreateApiKeyRequest) -> Self {
        Self {
            name: req.name,
            key_hash: req.key_hash,
            permissions: req.permissions,
        }
    }
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(k: ApiKey) -> Self {
        Self {
            id: k.id,
            name: k.name,
            key_hash: k.key_hash,
            permissions: k.permissions,
            is_active: k.is_active,
            created_at: k.created_at,
        }
    }
}
