//! # pagesmith
//!
//! Web console and REST API for managing a statically generated blog
//! published to GitHub Pages.
//!
//! The service persists three configuration records (blog settings, API
//! keys, and deployment configuration) in SQLite and exposes a thin HTTP
//! surface over them. All durable state lives behind the
//! [`persistence::ConfigStore`]; handlers never touch the database
//! directly.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser, API consumers)
//!     │
//!     ├── HTML console + REST handlers (api/)
//!     │
//!     ├── ConfigStore (persistence/)
//!     │
//!     └── SQLite
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod persistence;
