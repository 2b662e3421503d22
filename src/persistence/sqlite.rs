//! SQLite implementation of the configuration store.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use super::models::{
    ApiKey, BlogSettings, DeploymentConfig, NewApiKey, NewBlogSettings, NewDeploymentConfig,
};
use super::schema::SQLITE_INIT;
use crate::config::AppConfig;
use crate::error::PagesmithError;

/// Alias for the SQLite connection pool used throughout the crate.
pub type SqlitePool = Pool<Sqlite>;

/// SQLite-backed store for blog settings, API keys, and deployment
/// configuration.
///
/// Connections are acquired from the pool per operation; every write is
/// a single statement or a single explicit transaction, so there are no
/// partial-failure states to recover from.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    pool: SqlitePool,
}

impl ConfigStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the inner pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Opens a connection pool from the configured database URL and
    /// wraps it in a store. The database file is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] if the URL cannot be parsed
    /// or the pool cannot connect.
    pub async fn connect(config: &AppConfig) -> Result<Self, PagesmithError> {
        let options =
            SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect_with(options)
            .await?;
        Ok(Self::new(pool))
    }

    /// Initializes the schema by executing the bundled DDL.
    ///
    /// Idempotent: every statement is `CREATE TABLE IF NOT EXISTS`, so
    /// re-running against a current schema is a no-op. There is no
    /// migration support.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on unrecoverable storage
    /// errors (disk, permissions).
    pub async fn init_schema(&self) -> Result<(), PagesmithError> {
        // sqlx::query executes one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ── Blog settings (singleton table) ─────────────────────────────

    /// Replaces the stored blog settings with `settings`.
    ///
    /// The delete and insert run in one transaction so concurrent
    /// readers never observe an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on storage failure.
    pub async fn save_settings(&self, settings: &NewBlogSettings) -> Result<(), PagesmithError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM settings").execute(&mut *tx).await?;

        sqlx::query(
            r#"
            INSERT INTO settings (
                blog_title, blog_description, github_repo, github_branch,
                github_pages_url, theme, custom_css, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&settings.blog_title)
        .bind(&settings.blog_description)
        .bind(&settings.github_repo)
        .bind(&settings.github_branch)
        .bind(&settings.github_pages_url)
        .bind(&settings.theme)
        .bind(&settings.custom_css)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Returns the stored blog settings, or `None` when none have been
    /// saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on storage failure.
    pub async fn get_settings(&self) -> Result<Option<BlogSettings>, PagesmithError> {
        let row = sqlx::query(
            r#"SELECT blog_title, blog_description, github_repo, github_branch,
               github_pages_url, theme, custom_css, created_at, updated_at
               FROM settings LIMIT 1"#,
        )
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_settings).transpose()
    }

    // ── API keys ────────────────────────────────────────────────────

    /// Inserts a new API key and returns its auto-assigned ID.
    ///
    /// The key is stored active with a creation timestamp assigned
    /// here; the caller provides an already-hashed key.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::DuplicateKeyHash`] when `key_hash`
    /// collides with an existing row (no row is added), or
    /// [`PagesmithError::Database`] on other storage failures.
    pub async fn create_api_key(&self, key: &NewApiKey) -> Result<i64, PagesmithError> {
        let permissions_json = serde_json::to_string(&key.permissions)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO api_keys (name, key_hash, permissions, is_active, created_at)
            VALUES (?, ?, ?, 1, ?)
            "#,
        )
        .bind(&key.name)
        .bind(&key.key_hash)
        .bind(&permissions_json)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(result.last_insert_rowid())
    }

    /// Returns the API key with the given ID, or `None` if no such row.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on storage failure.
    pub async fn get_api_key(&self, id: i64) -> Result<Option<ApiKey>, PagesmithError> {
        let row = sqlx::query(
            r#"SELECT id, name, key_hash, permissions, is_active, created_at
               FROM api_keys WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_api_key).transpose()
    }

    /// Returns all API keys, newest first.
    ///
    /// Rows are ordered by creation time descending; the row ID breaks
    /// ties between keys created at the same instant.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on storage failure.
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>, PagesmithError> {
        let rows = sqlx::query(
            r#"SELECT id, name, key_hash, permissions, is_active, created_at
               FROM api_keys ORDER BY created_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_api_key).collect()
    }

    /// Marks the API key with the given ID inactive.
    ///
    /// The update is unconditional: a missing ID is a silent no-op, not
    /// an error, and deactivating an already-inactive key leaves it
    /// unchanged. There is no way to re-activate a key.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on storage failure.
    pub async fn deactivate_api_key(&self, id: i64) -> Result<(), PagesmithError> {
        sqlx::query("UPDATE api_keys SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ── Deployment configuration (singleton table) ──────────────────

    /// Replaces the stored deployment configuration with `config`.
    ///
    /// Same transactional replace-on-write as [`Self::save_settings`].
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on storage failure.
    pub async fn save_deployment_config(
        &self,
        config: &NewDeploymentConfig,
    ) -> Result<(), PagesmithError> {
        let now = Utc::now().to_rfc3339();
        let auto_deploy = i64::from(config.auto_deploy);
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM deployment_config")
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO deployment_config (
                target_repo, target_branch, build_command, custom_domain,
                auto_deploy, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&config.target_repo)
        .bind(&config.target_branch)
        .bind(&config.build_command)
        .bind(&config.custom_domain)
        .bind(auto_deploy)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Returns the stored deployment configuration, or `None` when none
    /// has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`PagesmithError::Database`] on storage failure.
    pub async fn get_deployment_config(
        &self,
    ) -> Result<Option<DeploymentConfig>, PagesmithError> {
        let row = sqlx::query(
            r#"SELECT target_repo, target_branch, build_command, custom_domain,
               auto_deploy, created_at, updated_at
               FROM deployment_config LIMIT 1"#,
        )
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_deployment_config).transpose()
    }

    // ── Row mapping ─────────────────────────────────────────────────

    fn row_to_settings(row: SqliteRow) -> Result<BlogSettings, PagesmithError> {
        Ok(BlogSettings {
            blog_title: row.try_get("blog_title")?,
            blog_description: row.try_get("blog_description")?,
            github_repo: row.try_get("github_repo")?,
            github_branch: row.try_get("github_branch")?,
            github_pages_url: row.try_get("github_pages_url")?,
            theme: row.try_get("theme")?,
            custom_css: row.try_get("custom_css")?,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
        })
    }

    fn row_to_api_key(row: SqliteRow) -> Result<ApiKey, PagesmithError> {
        let permissions_json: String = row.try_get("permissions")?;
        let permissions: Vec<String> = serde_json::from_str(&permissions_json)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let is_active: i64 = row.try_get("is_active")?;

        Ok(ApiKey {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            key_hash: row.try_get("key_hash")?,
            permissions,
            is_active: is_active != 0,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
        })
    }

    fn row_to_deployment_config(row: SqliteRow) -> Result<DeploymentConfig, PagesmithError> {
        let auto_deploy: i64 = row.try_get("auto_deploy")?;
        Ok(DeploymentConfig {
            target_repo: row.try_get("target_repo")?,
            target_branch: row.try_get("target_branch")?,
            build_command: row.try_get("build_command")?,
            custom_domain: row.try_get("custom_domain")?,
            auto_deploy: auto_deploy != 0,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
        })
    }
}

/// Parses a stored RFC 3339 timestamp back into a UTC datetime.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, PagesmithError> {
    Ok(DateTime::parse_from_rfc3339(s)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc))
}

/// Maps a unique-constraint violation to the dedicated duplicate-key
/// error so callers can react to it; everything else stays a plain
/// database error.
fn map_unique_violation(e: sqlx::Error) -> PagesmithError {
    match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            PagesmithError::DuplicateKeyHash
        }
        other => PagesmithError::Database(other),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn make_store() -> ConfigStore {
        let Ok(pool) = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
        else {
            panic!("in-memory pool should connect");
        };
        let store = ConfigStore::new(pool);
        let Ok(()) = store.init_schema().await else {
            panic!("schema init failed");
        };
        store
    }

    fn sample_settings() -> NewBlogSettings {
        NewBlogSettings {
            blog_title: "My Blog".to_string(),
            blog_description: "Notes on things".to_string(),
            github_repo: "alice/blog".to_string(),
            github_branch: "main".to_string(),
            github_pages_url: Some("https://alice.github.io/blog".to_string()),
            theme: "default".to_string(),
            custom_css: None,
        }
    }

    fn sample_key(name: &str, hash: &str) -> NewApiKey {
        NewApiKey {
            name: name.to_string(),
            key_hash: hash.to_string(),
            permissions: vec!["read".to_string(), "write".to_string()],
        }
    }

    async fn count_rows(store: &ConfigStore, table: &str) -> i64 {
        let query = format!("SELECT COUNT(*) FROM {table}");
        let Ok(row) = sqlx::query_as::<_, (i64,)>(&query)
            .fetch_one(store.pool())
            .await
        else {
            panic!("count query failed");
        };
        row.0
    }

    #[tokio::test]
    async fn connect_creates_missing_database_file() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let db_path = dir.path().join("blog.db");
        let Ok(listen_addr) = "127.0.0.1:0".parse::<std::net::SocketAddr>() else {
            panic!("addr parse failed");
        };
        let config = AppConfig {
            listen_addr,
            database_url: format!("sqlite:{}", db_path.display()),
            database_max_connections: 1,
            database_connect_timeout_secs: 5,
            request_timeout_secs: 30,
        };

        let Ok(store) = ConfigStore::connect(&config).await else {
            panic!("connect should create the database file");
        };
        let Ok(()) = store.init_schema().await else {
            panic!("schema init failed");
        };
        let Ok(()) = store.save_settings(&sample_settings()).await else {
            panic!("save failed");
        };
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let store = make_store().await;
        let Ok(()) = store.init_schema().await else {
            panic!("re-running schema init should be a no-op");
        };
    }

    #[tokio::test]
    async fn settings_absent_before_first_write() {
        let store = make_store().await;
        let Ok(settings) = store.get_settings().await else {
            panic!("read failed");
        };
        assert!(settings.is_none());
    }

    #[tokio::test]
    async fn settings_round_trip_all_fields() {
        let store = make_store().await;
        let input = sample_settings();
        let Ok(()) = store.save_settings(&input).await else {
            panic!("save failed");
        };

        let Ok(Some(stored)) = store.get_settings().await else {
            panic!("expected stored settings");
        };
        assert_eq!(stored.blog_title, input.blog_title);
        assert_eq!(stored.blog_description, input.blog_description);
        assert_eq!(stored.github_repo, input.github_repo);
        assert_eq!(stored.github_branch, input.github_branch);
        assert_eq!(stored.github_pages_url, input.github_pages_url);
        assert_eq!(stored.theme, input.theme);
        assert_eq!(stored.custom_css, input.custom_css);
    }

    #[tokio::test]
    async fn second_settings_write_replaces_single_row() {
        let store = make_store().await;
        let Ok(()) = store.save_settings(&sample_settings()).await else {
            panic!("first save failed");
        };

        let mut second = sample_settings();
        second.blog_title = "Renamed".to_string();
        second.theme = "dark".to_string();
        let Ok(()) = store.save_settings(&second).await else {
            panic!("second save failed");
        };

        assert_eq!(count_rows(&store, "settings").await, 1);
        let Ok(Some(stored)) = store.get_settings().await else {
            panic!("expected stored settings");
        };
        assert_eq!(stored.blog_title, "Renamed");
        assert_eq!(stored.theme, "dark");
    }

    #[tokio::test]
    async fn list_keys_newest_first() {
        let store = make_store().await;
        let Ok(first_id) = store.create_api_key(&sample_key("older", "hash-1")).await else {
            panic!("first key failed");
        };
        let Ok(second_id) = store.create_api_key(&sample_key("newer", "hash-2")).await else {
            panic!("second key failed");
        };

        let Ok(keys) = store.list_api_keys().await else {
            panic!("list failed");
        };
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.first().map(|k| k.id), Some(second_id));
        assert_eq!(keys.last().map(|k| k.id), Some(first_id));
    }

    #[tokio::test]
    async fn list_keys_empty_without_rows() {
        let store = make_store().await;
        let Ok(keys) = store.list_api_keys().await else {
            panic!("list failed");
        };
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn duplicate_key_hash_rejected_without_insert() {
        let store = make_store().await;
        let Ok(_) = store.create_api_key(&sample_key("first", "same-hash")).await else {
            panic!("first key failed");
        };

        let Err(err) = store.create_api_key(&sample_key("second", "same-hash")).await else {
            panic!("expected duplicate hash rejection");
        };
        assert!(matches!(err, PagesmithError::DuplicateKeyHash));
        assert_eq!(count_rows(&store, "api_keys").await, 1);
    }

    #[tokio::test]
    async fn created_key_round_trips() {
        let store = make_store().await;
        let input = sample_key("deploy-bot", "abc123");
        let Ok(id) = store.create_api_key(&input).await else {
            panic!("create failed");
        };

        let Ok(Some(key)) = store.get_api_key(id).await else {
            panic!("expected stored key");
        };
        assert_eq!(key.name, input.name);
        assert_eq!(key.key_hash, input.key_hash);
        assert_eq!(key.permissions, input.permissions);
        assert!(key.is_active);
    }

    #[tokio::test]
    async fn get_key_absent_for_unknown_id() {
        let store = make_store().await;
        let Ok(key) = store.get_api_key(42).await else {
            panic!("read failed");
        };
        assert!(key.is_none());
    }

    #[tokio::test]
    async fn deactivate_flips_flag_and_is_idempotent() {
        let store = make_store().await;
        let Ok(id) = store.create_api_key(&sample_key("k", "h")).await else {
            panic!("create failed");
        };

        let Ok(()) = store.deactivate_api_key(id).await else {
            panic!("deactivate failed");
        };
        let Ok(Some(key)) = store.get_api_key(id).await else {
            panic!("expected stored key");
        };
        assert!(!key.is_active);

        let Ok(()) = store.deactivate_api_key(id).await else {
            panic!("second deactivate failed");
        };
        let Ok(Some(key)) = store.get_api_key(id).await else {
            panic!("expected stored key");
        };
        assert!(!key.is_active);
    }

    #[tokio::test]
    async fn deactivate_unknown_id_is_silent_noop() {
        let store = make_store().await;
        let Ok(id) = store.create_api_key(&sample_key("k", "h")).await else {
            panic!("create failed");
        };

        let Ok(()) = store.deactivate_api_key(id + 999).await else {
            panic!("deactivating an unknown id must not error");
        };
        let Ok(Some(key)) = store.get_api_key(id).await else {
            panic!("expected stored key");
        };
        assert!(key.is_active);
        assert_eq!(count_rows(&store, "api_keys").await, 1);
    }

    #[tokio::test]
    async fn deployment_config_round_trips() {
        let store = make_store().await;
        let input = NewDeploymentConfig {
            target_repo: "alice/blog-site".to_string(),
            target_branch: "gh-pages".to_string(),
            build_command: "npm run build".to_string(),
            custom_domain: Some("myblog.com".to_string()),
            auto_deploy: false,
        };
        let Ok(()) = store.save_deployment_config(&input).await else {
            panic!("save failed");
        };

        let Ok(Some(stored)) = store.get_deployment_config().await else {
            panic!("expected stored config");
        };
        assert_eq!(stored.target_repo, input.target_repo);
        assert_eq!(stored.target_branch, input.target_branch);
        assert_eq!(stored.build_command, input.build_command);
        assert_eq!(stored.custom_domain, Some("myblog.com".to_string()));
        assert!(!stored.auto_deploy);
    }

    #[tokio::test]
    async fn deployment_config_absent_before_first_write() {
        let store = make_store().await;
        let Ok(config) = store.get_deployment_config().await else {
            panic!("read failed");
        };
        assert!(config.is_none());
    }
}
