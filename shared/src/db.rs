//! Database connection management.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::{Config, DatabaseCredentials, Error, Result};

/// Create a database connection pool.
pub async fn create_pool(config: &Config, credentials: &DatabaseCredentials) -> Result<PgPool> {
    let host = credentials.host.as_deref().unwrap_or(&config.db_host);
    let port = credentials.port.unwrap_or(5432);
    let dbname = credentials.dbname.as_deref().unwrap_or(&config.db_name);

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        credentials.username, credentials.password, host, port, dbname
    );

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&database_url)
        .await
        .map_err(Error::Database)?;

    Ok(pool)
}
