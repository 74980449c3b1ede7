//! Repositories for notice bars and announcement categories.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::notice::{
    AnnouncementCategory, CreateAnnouncementCategory, CreateNoticeBar, NoticeBar,
    UpdateAnnouncementCategory, UpdateNoticeBar, PRIORITY_MAX, PRIORITY_MIN,
};

/// Column list for `notice_bars` queries.
const BAR_COLUMNS: &str = "id, content, link, priority, starts_at, ends_at, \
    is_active, created_at, updated_at";

/// Column list for `announcement_categories` queries.
const CATEGORY_COLUMNS: &str =
    "id, name, slug, sort_order, is_active, created_at, updated_at";

/// Clamp a priority into the storable range.
fn clamp_priority(priority: i32) -> i32 {
    priority.clamp(PRIORITY_MIN, PRIORITY_MAX)
}

// ---------------------------------------------------------------------------
// NoticeBarRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for notice bars. Priorities are clamped to
/// `[0, 100]` on every write.
pub struct NoticeBarRepo;

impl NoticeBarRepo {
    /// Insert a notice bar, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNoticeBar) -> Result<NoticeBar, sqlx::Error> {
        let query = format!(
            "INSERT INTO notice_bars (content, link, priority, starts_at, ends_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {BAR_COLUMNS}"
        );
        sqlx::query_as::<_, NoticeBar>(&query)
            .bind(&input.content)
            .bind(&input.link)
            .bind(clamp_priority(input.priority.unwrap_or(0)))
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(pool)
            .await
    }

    /// Find a notice bar by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NoticeBar>, sqlx::Error> {
        let query = format!("SELECT {BAR_COLUMNS} FROM notice_bars WHERE id = $1");
        sqlx::query_as::<_, NoticeBar>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every notice bar, highest priority first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<NoticeBar>, sqlx::Error> {
        let query = format!(
            "SELECT {BAR_COLUMNS} FROM notice_bars ORDER BY priority DESC, id"
        );
        sqlx::query_as::<_, NoticeBar>(&query).fetch_all(pool).await
    }

    /// The bars currently displayable: active and inside their window.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<NoticeBar>, sqlx::Error> {
        let query = format!(
            "SELECT {BAR_COLUMNS} FROM notice_bars \
             WHERE is_active = true \
               AND (starts_at IS NULL OR starts_at <= NOW()) \
               AND (ends_at IS NULL OR ends_at > NOW()) \
             ORDER BY priority DESC, id"
        );
        sqlx::query_as::<_, NoticeBar>(&query).fetch_all(pool).await
    }

    /// Update a notice bar. Returns the updated row, or `None` if not
    /// found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNoticeBar,
    ) -> Result<Option<NoticeBar>, sqlx::Error> {
        let query = format!(
            "UPDATE notice_bars SET \
                content = COALESCE($1, content), \
                link = COALESCE($2, link), \
                priority = COALESCE($3, priority), \
                starts_at = COALESCE($4, starts_at), \
                ends_at = COALESCE($5, ends_at), \
                is_active = COALESCE($6, is_active), \
                updated_at = NOW() \
             WHERE id = $7 \
             RETURNING {BAR_COLUMNS}"
        );
        sqlx::query_as::<_, NoticeBar>(&query)
            .bind(&input.content)
            .bind(&input.link)
            .bind(input.priority.map(clamp_priority))
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a notice bar. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notice_bars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// AnnouncementCategoryRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for announcement categories.
pub struct AnnouncementCategoryRepo;

impl AnnouncementCategoryRepo {
    /// Insert a category, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncementCategory,
    ) -> Result<AnnouncementCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcement_categories (name, slug, sort_order) \
             VALUES ($1, $2, $3) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, AnnouncementCategory>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a category by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AnnouncementCategory>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM announcement_categories WHERE id = $1");
        sqlx::query_as::<_, AnnouncementCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every category by sort order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AnnouncementCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM announcement_categories ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, AnnouncementCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a category. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnnouncementCategory,
    ) -> Result<Option<AnnouncementCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE announcement_categories SET \
                name = COALESCE($1, name), \
                slug = COALESCE($2, slug), \
                sort_order = COALESCE($3, sort_order), \
                is_active = COALESCE($4, is_active), \
                updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, AnnouncementCategory>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcement_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
