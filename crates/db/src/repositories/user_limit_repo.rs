//! Repository for per-feature usage limits.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_limit::UserLimit;

/// Column list for `user_limits` queries.
const COLUMNS: &str =
    "id, user_id, feature, used_count, max_count, resets_at, created_at, updated_at";

/// Provides usage counters with a `-1 = unlimited` sentinel.
pub struct UserLimitRepo;

impl UserLimitRepo {
    /// Fetch the limit row for a (user, feature) pair, creating it with
    /// the given cap on first use.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
        feature: &str,
        default_max: i32,
    ) -> Result<UserLimit, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_limits (user_id, feature, max_count) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, feature) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserLimit>(&query)
            .bind(user_id)
            .bind(feature)
            .bind(default_max)
            .fetch_one(pool)
            .await
    }

    /// Whether the user can still use the feature.
    pub async fn has_access(
        pool: &PgPool,
        user_id: DbId,
        feature: &str,
        default_max: i32,
    ) -> Result<bool, sqlx::Error> {
        let limit = Self::get_or_create(pool, user_id, feature, default_max).await?;
        Ok(limit.has_access())
    }

    /// Count one use of the feature, returning the updated row.
    pub async fn increment_usage(
        pool: &PgPool,
        user_id: DbId,
        feature: &str,
    ) -> Result<Option<UserLimit>, sqlx::Error> {
        let query = format!(
            "UPDATE user_limits \
             SET used_count = used_count + 1, updated_at = NOW() \
             WHERE user_id = $1 AND feature = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserLimit>(&query)
            .bind(user_id)
            .bind(feature)
            .fetch_optional(pool)
            .await
    }

    /// Replace the cap for a (user, feature) pair, e.g. after a
    /// membership change.
    pub async fn set_max(
        pool: &PgPool,
        user_id: DbId,
        feature: &str,
        max_count: i32,
    ) -> Result<Option<UserLimit>, sqlx::Error> {
        let query = format!(
            "UPDATE user_limits \
             SET max_count = $3, updated_at = NOW() \
             WHERE user_id = $1 AND feature = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserLimit>(&query)
            .bind(user_id)
            .bind(feature)
            .bind(max_count)
            .fetch_optional(pool)
            .await
    }

    /// Zero the usage counter (periodic reset), stamping the reset time.
    pub async fn reset(
        pool: &PgPool,
        user_id: DbId,
        feature: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_limits \
             SET used_count = 0, resets_at = NOW(), updated_at = NOW() \
             WHERE user_id = $1 AND feature = $2",
        )
        .bind(user_id)
        .bind(feature)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
