// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Build the PostgreSQL pool shared by every booking repository

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Initialize the PostgreSQL connection pool
/// DOCUMENTATION: Called once at startup in main.rs; handlers receive the
/// pool through web::Data. Booking and tour writes run whole transactions on
/// one connection, so a couple of connections stay warm at all times.
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing booking database pool: {}", config.database_url);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        // Catalog pages hit the pool on every request; keep a floor warm
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Idle connections survive 10 minutes of quiet
        .idle_timeout(Duration::from_secs(600))
        // Recycle connections hourly
        .max_lifetime(Duration::from_secs(3600))
        .connect(&config.database_url)
        .await?;

    // Fail startup early when the database is unreachable
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!(
        "Booking database pool ready (max {} connections)",
        config.db_max_connections
    );
    Ok(pool)
}
