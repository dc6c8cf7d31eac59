//! Connection pool setup.

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use atelier_core::errors::DomainError;
use atelier_shared::config::DatabaseConfig;

/// Builds the MySQL connection pool from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DomainError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to connect to database: {e}"),
        })?;

    info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}
