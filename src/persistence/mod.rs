//! Persistence layer: SQLite-backed configuration store.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: [`ConfigStore`] over `sqlx::SqlitePool`
//!
//! The store exclusively owns all persisted rows; no other component
//! touches the database directly.

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{
    ApiKey, BlogSettings, DeploymentConfig, NewApiKey, NewBlogSettings, NewDeploymentConfig,
};
pub use schema::SQLITE_INIT;
pub use sqlite::ConfigStore;
