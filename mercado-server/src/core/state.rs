//! Shared application state

use shared::AppError;
use sqlx::SqlitePool;

use crate::core::config::Config;
use crate::db::DbService;

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct ServerState {
    /// Database service (connection pool + migrations)
    pub db: DbService,
    /// JWT signing secret
    pub jwt_secret: String,
}

impl ServerState {
    /// Initialize state from configuration: opens the pool and applies
    /// pending migrations.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            db,
            jwt_secret: config.jwt_secret.clone(),
        })
    }

    /// Convenience accessor for the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
