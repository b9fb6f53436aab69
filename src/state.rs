use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::auth::resolver::{BearerIdResolver, CredentialResolver};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub auth: Arc<dyn CredentialResolver>,
    pub started: Instant,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        if let Some(dir) = Path::new(&config.database_path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).context("create data directory")?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(10)
            .connect_with(options)
            .await
            .context("connect to database")?;

        Ok(Self::from_parts(db, config))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        let auth = Arc::new(BearerIdResolver::new(db.clone())) as Arc<dyn CredentialResolver>;
        Self {
            db,
            config,
            auth,
            started: Instant::now(),
        }
    }

    /// In-memory state for tests: one-connection pool so every query sees the
    /// same database, with migrations already applied.
    #[cfg(test)]
    pub async fn test() -> Self {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("migrations");

        let config = Arc::new(AppConfig {
            database_path: ":memory:".into(),
            allow_registration: true,
        });
        Self::from_parts(db, config)
    }
}
