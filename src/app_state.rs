//! Shared application state injected into all Axum handlers.

use crate::persistence::ConfigStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// [`ConfigStore`] wraps a connection pool and is cheap to clone, so no
/// extra `Arc` wrapping is needed here.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration store for all persisted records.
    pub store: ConfigStore,
}
