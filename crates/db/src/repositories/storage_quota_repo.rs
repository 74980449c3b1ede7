//! Repository for the `user_storage_quotas` table.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::storage::StorageQuota;

/// Column list for `user_storage_quotas` queries.
const COLUMNS: &str = "id, user_id, used_space, total_quota, created_at, updated_at";

/// Provides usage counters for per-user storage quotas. `used_space` is
/// only ever adjusted additively, never recomputed from stored objects.
pub struct StorageQuotaRepo;

impl StorageQuotaRepo {
    /// Fetch a user's quota row, creating it on first use with the given
    /// default total.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
        default_quota: i64,
    ) -> Result<StorageQuota, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_storage_quotas (user_id, total_quota) VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageQuota>(&query)
            .bind(user_id)
            .bind(default_quota)
            .fetch_one(pool)
            .await
    }

    /// Find a quota row without creating it.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<StorageQuota>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_storage_quotas WHERE user_id = $1");
        sqlx::query_as::<_, StorageQuota>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Charge bytes against the quota, returning the updated row.
    ///
    /// Enforcement of `used <= total` is the caller's policy decision;
    /// the counter itself accepts the write.
    pub async fn add_usage(
        pool: &PgPool,
        user_id: DbId,
        bytes: i64,
    ) -> Result<Option<StorageQuota>, sqlx::Error> {
        let query = format!(
            "UPDATE user_storage_quotas \
             SET used_space = used_space + $2, updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageQuota>(&query)
            .bind(user_id)
            .bind(bytes)
            .fetch_optional(pool)
            .await
    }

    /// Release bytes back to the quota, clamped at zero.
    pub async fn release_usage(
        pool: &PgPool,
        user_id: DbId,
        bytes: i64,
    ) -> Result<Option<StorageQuota>, sqlx::Error> {
        let query = format!(
            "UPDATE user_storage_quotas \
             SET used_space = GREATEST(0, used_space - $2), updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageQuota>(&query)
            .bind(user_id)
            .bind(bytes)
            .fetch_optional(pool)
            .await
    }

    /// Replace the total quota (e.g. after a membership change).
    pub async fn set_total_quota(
        pool: &PgPool,
        user_id: DbId,
        total_quota: i64,
    ) -> Result<Option<StorageQuota>, sqlx::Error> {
        let query = format!(
            "UPDATE user_storage_quotas \
             SET total_quota = $2, updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StorageQuota>(&query)
            .bind(user_id)
            .bind(total_quota)
            .fetch_optional(pool)
            .await
    }
}
