//! Repository for the key-value `settings` table.
//!
//! Settings are read on demand, never cached in-process. Writes are
//! best-effort: a failed `set` is logged and reported as `false`.

use sqlx::PgPool;

use crate::models::setting::Setting;

/// Column list for `settings` queries.
const COLUMNS: &str = "key, value, updated_at";

/// Provides the configuration store.
pub struct SettingRepo;

impl SettingRepo {
    /// The value for a key, if present.
    pub async fn get(pool: &PgPool, key: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// The value for a key, or a default when absent.
    pub async fn get_or(pool: &PgPool, key: &str, default: &str) -> Result<String, sqlx::Error> {
        Ok(Self::get(pool, key).await?.unwrap_or_else(|| default.to_string()))
    }

    /// The full row, including the last update time.
    pub async fn find(pool: &PgPool, key: &str) -> Result<Option<Setting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE key = $1");
        sqlx::query_as::<_, Setting>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a key, best-effort. Failures are logged and collapse to
    /// `false`.
    pub async fn set(pool: &PgPool, key: &str, value: &str) -> bool {
        let result = sqlx::query(
            "INSERT INTO settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(pool)
        .await;

        match result {
            Ok(_) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to write setting");
                false
            }
        }
    }

    /// Remove a key. Returns `true` if it existed.
    pub async fn remove(pool: &PgPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
