//! Data-access layer for the Inkstone platform.
//!
//! `models` holds row structs and DTOs, `repositories` holds the
//! zero-sized structs that execute the SQL.

use sqlx::postgres::PgPoolOptions;

use inkstone_core::config::DatabaseConfig;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Create a connection pool from a [`DatabaseConfig`].
pub async fn create_pool_from_config(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}
