//! Repository for the `storage_configs` reference table.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::storage::{CreateStorageConfig, StorageConfig, UpdateStorageConfig};

/// Column list for `storage_configs` queries.
const COLUMNS: &str = "id, name, driver, bucket, endpoint, base_url, \
    is_default, is_active, created_at, updated_at";

/// Provides CRUD operations for storage backend configs.
pub struct StorageConfigRepo;

impl StorageConfigRepo {
    /// Insert a new config, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStorageConfig,
    ) -> Result<StorageConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO storage_configs (name, driver, bucket, endpoint, base_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageConfig>(&query)
            .bind(&input.name)
            .bind(&input.driver)
            .bind(&input.bucket)
            .bind(&input.endpoint)
            .bind(&input.base_url)
            .fetch_one(pool)
            .await
    }

    /// Find a config by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<StorageConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storage_configs WHERE id = $1");
        sqlx::query_as::<_, StorageConfig>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every config.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<StorageConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM storage_configs ORDER BY id");
        sqlx::query_as::<_, StorageConfig>(&query)
            .fetch_all(pool)
            .await
    }

    /// The active default config, if one is marked.
    pub async fn get_default(pool: &PgPool) -> Result<Option<StorageConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM storage_configs \
             WHERE is_default = true AND is_active = true \
             LIMIT 1"
        );
        sqlx::query_as::<_, StorageConfig>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Update a config. Returns the updated row, or `None` if not found.
    ///
    /// Marking a config default runs in a transaction that unsets the
    /// previous default first.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStorageConfig,
    ) -> Result<Option<StorageConfig>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_default == Some(true) {
            sqlx::query(
                "UPDATE storage_configs SET is_default = false, updated_at = NOW() \
                 WHERE is_default = true AND id <> $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE storage_configs SET \
                name = COALESCE($1, name), \
                driver = COALESCE($2, driver), \
                bucket = COALESCE($3, bucket), \
                endpoint = COALESCE($4, endpoint), \
                base_url = COALESCE($5, base_url), \
                is_default = COALESCE($6, is_default), \
                is_active = COALESCE($7, is_active), \
                updated_at = NOW() \
             WHERE id = $8 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, StorageConfig>(&query)
            .bind(&input.name)
            .bind(&input.driver)
            .bind(&input.bucket)
            .bind(&input.endpoint)
            .bind(&input.base_url)
            .bind(input.is_default)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if updated.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a config. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM storage_configs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
