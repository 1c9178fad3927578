use std::{fmt, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::error::{CatalogError, Result};

/// Owns the connection pool shared by every PostgreSQL repository.
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| CatalogError::Internal(format!("Database connection failed: {}", e)))?;

        info!(
            "Database pool initialized with max_connections={}",
            max_connections
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| CatalogError::Internal(format!("Failed to run migrations: {}", e)))?;
        info!("Database migrations applied");
        Ok(())
    }
}
