//! SQL DDL for initializing the configuration store.
//!
//! SQLite-first design. Timestamps are stored as RFC 3339 text and
//! booleans as 0/1 integers; the `permissions` column holds a JSON
//! array serialized as text.

/// SQLite schema for the three configuration tables.
///
/// `settings` and `deployment_config` are singleton tables: at most one
/// logical row exists at any time, enforced by the store's
/// replace-on-write transaction rather than a schema constraint.
/// `api_keys` is append-only with a UNIQUE constraint on `key_hash`.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    id INTEGER PRIMARY KEY,
    blog_title TEXT NOT NULL,
    blog_description TEXT NOT NULL,
    github_repo TEXT NOT NULL,
    github_branch TEXT NOT NULL DEFAULT 'main',
    github_pages_url TEXT NULL,
    theme TEXT NOT NULL DEFAULT 'default',
    custom_css TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS api_keys (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    key_hash TEXT NOT NULL UNIQUE,
    permissions TEXT NOT NULL, -- JSON array, serialized as text
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS deployment_config (
    id INTEGER PRIMARY KEY,
    target_repo TEXT NOT NULL,
    target_branch TEXT NOT NULL DEFAULT 'gh-pages',
    build_command TEXT NOT NULL DEFAULT 'npm run build',
    custom_domain TEXT NULL,
    auto_deploy INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
