//! Repositories for membership levels, user memberships, and the
//! membership purchase ledger.

use chrono::{Duration, Utc};
use inkstone_core::order::order_no;
use inkstone_core::pagination::{Page, PageParams};
use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::membership::{
    CreateMembershipLevel, CreateMembershipPurchase, MembershipLevel, MembershipPurchase,
    UpdateMembershipLevel, UserMembership, MEMBERSHIP_ACTIVE, MEMBERSHIP_EXPIRED,
};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `membership_levels` queries.
const LEVEL_COLUMNS: &str = "id, name, level, price, duration_days, token_grant, \
    storage_quota, benefits, is_active, created_at, updated_at";

/// Column list for `user_memberships` queries.
const MEMBERSHIP_COLUMNS: &str =
    "id, user_id, level_id, status, started_at, expires_at, created_at, updated_at";

/// Column list for `membership_purchases` queries.
const PURCHASE_COLUMNS: &str =
    "id, order_no, user_id, level_id, level_name, amount, duration_days, created_at";

// ---------------------------------------------------------------------------
// MembershipLevelRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for membership levels (reference data).
pub struct MembershipLevelRepo;

impl MembershipLevelRepo {
    /// Insert a new level, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMembershipLevel,
    ) -> Result<MembershipLevel, sqlx::Error> {
        let query = format!(
            "INSERT INTO membership_levels \
                (name, level, price, duration_days, token_grant, storage_quota, benefits) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {LEVEL_COLUMNS}"
        );
        sqlx::query_as::<_, MembershipLevel>(&query)
            .bind(&input.name)
            .bind(input.level)
            .bind(input.price)
            .bind(input.duration_days)
            .bind(input.token_grant.unwrap_or(0))
            .bind(input.storage_quota.unwrap_or(0))
            .bind(
                input
                    .benefits
                    .clone()
                    .unwrap_or_else(|| serde_json::json!({})),
            )
            .fetch_one(pool)
            .await
    }

    /// Find a level by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MembershipLevel>, sqlx::Error> {
        let query = format!("SELECT {LEVEL_COLUMNS} FROM membership_levels WHERE id = $1");
        sqlx::query_as::<_, MembershipLevel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every level, lowest tier first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MembershipLevel>, sqlx::Error> {
        let query = format!("SELECT {LEVEL_COLUMNS} FROM membership_levels ORDER BY level");
        sqlx::query_as::<_, MembershipLevel>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a level. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMembershipLevel,
    ) -> Result<Option<MembershipLevel>, sqlx::Error> {
        let query = format!(
            "UPDATE membership_levels SET \
                name = COALESCE($1, name), \
                price = COALESCE($2, price), \
                duration_days = COALESCE($3, duration_days), \
                token_grant = COALESCE($4, token_grant), \
                storage_quota = COALESCE($5, storage_quota), \
                benefits = COALESCE($6, benefits), \
                is_active = COALESCE($7, is_active), \
                updated_at = NOW() \
             WHERE id = $8 \
             RETURNING {LEVEL_COLUMNS}"
        );
        sqlx::query_as::<_, MembershipLevel>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.duration_days)
            .bind(input.token_grant)
            .bind(input.storage_quota)
            .bind(&input.benefits)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a level. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM membership_levels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// UserMembershipRepo
// ---------------------------------------------------------------------------

/// Provides lifecycle operations for per-user memberships.
pub struct UserMembershipRepo;

impl UserMembershipRepo {
    /// The user's membership row, whatever its status.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserMembership>, sqlx::Error> {
        let query = format!("SELECT {MEMBERSHIP_COLUMNS} FROM user_memberships WHERE user_id = $1");
        sqlx::query_as::<_, UserMembership>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The user's membership, only if currently active: `status = active`
    /// and no expiry or an expiry in the future.
    pub async fn active_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserMembership>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBERSHIP_COLUMNS} FROM user_memberships \
             WHERE user_id = $1 AND status = $2 \
               AND (expires_at IS NULL OR expires_at > NOW())"
        );
        sqlx::query_as::<_, UserMembership>(&query)
            .bind(user_id)
            .bind(MEMBERSHIP_ACTIVE)
            .fetch_optional(pool)
            .await
    }

    /// Start or extend a membership after a purchase.
    ///
    /// A fresh row starts now and runs `duration_days`; an existing
    /// unexpired membership is extended from its current expiry.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        level_id: DbId,
        duration_days: i32,
    ) -> Result<UserMembership, sqlx::Error> {
        let expires_at = Utc::now() + Duration::days(duration_days as i64);
        let query = format!(
            "INSERT INTO user_memberships (user_id, level_id, status, expires_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id) DO UPDATE SET \
                level_id = EXCLUDED.level_id, \
                status = EXCLUDED.status, \
                expires_at = CASE \
                    WHEN user_memberships.status = $3 \
                         AND user_memberships.expires_at > NOW() \
                    THEN user_memberships.expires_at + make_interval(days => $5) \
                    ELSE EXCLUDED.expires_at \
                END, \
                updated_at = NOW() \
             RETURNING {MEMBERSHIP_COLUMNS}"
        );
        sqlx::query_as::<_, UserMembership>(&query)
            .bind(user_id)
            .bind(level_id)
            .bind(MEMBERSHIP_ACTIVE)
            .bind(expires_at)
            .bind(duration_days)
            .fetch_one(pool)
            .await
    }

    /// Flip overdue active memberships to `expired`. Returns how many
    /// rows changed. Intended for a periodic sweep.
    pub async fn expire_overdue(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_memberships \
             SET status = $1, updated_at = NOW() \
             WHERE status = $2 AND expires_at IS NOT NULL AND expires_at <= NOW()",
        )
        .bind(MEMBERSHIP_EXPIRED)
        .bind(MEMBERSHIP_ACTIVE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// MembershipPurchaseRepo
// ---------------------------------------------------------------------------

/// Provides the immutable membership purchase ledger.
pub struct MembershipPurchaseRepo;

impl MembershipPurchaseRepo {
    /// Record a purchase, generating the order number, and return the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMembershipPurchase,
    ) -> Result<MembershipPurchase, sqlx::Error> {
        if input.level_name.trim().is_empty() || input.amount <= 0 {
            return Err(sqlx::Error::InvalidArgument(
                "membership purchase requires a level name and a positive amount".into(),
            ));
        }

        let order = order_no("MP", input.user_id);
        let query = format!(
            "INSERT INTO membership_purchases \
                (order_no, user_id, level_id, level_name, amount, duration_days) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PURCHASE_COLUMNS}"
        );
        sqlx::query_as::<_, MembershipPurchase>(&query)
            .bind(&order)
            .bind(input.user_id)
            .bind(input.level_id)
            .bind(&input.level_name)
            .bind(input.amount)
            .bind(input.duration_days)
            .fetch_one(pool)
            .await
    }

    /// List a user's purchases, newest first, COUNT-backed page.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        params: PageParams,
    ) -> Result<Page<MembershipPurchase>, sqlx::Error> {
        let (page, per_page, offset) = params.resolve();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM membership_purchases WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {PURCHASE_COLUMNS} FROM membership_purchases \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, MembershipPurchase>(&query)
            .bind(user_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page, per_page))
    }
}
