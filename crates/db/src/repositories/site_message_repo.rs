//! Repository for the `site_messages` inbox.

use inkstone_core::pagination::{clamp_page, clamp_per_page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::site_message::{CreateSiteMessage, MessageFeed, SiteMessage};

/// Column list for `site_messages` queries.
const COLUMNS: &str = "id, user_id, title, content, category, is_read, read_at, created_at";

/// Provides send/read operations and the inbox feed.
pub struct SiteMessageRepo;

impl SiteMessageRepo {
    /// Send a message to a user, returning the created row.
    pub async fn send(
        pool: &PgPool,
        input: &CreateSiteMessage,
    ) -> Result<SiteMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO site_messages (user_id, title, content, category) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteMessage>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category.as_deref().unwrap_or("system"))
            .fetch_one(pool)
            .await
    }

    /// The user's inbox feed, newest first.
    ///
    /// Fetches `per_page + 1` rows and pops the extra to derive
    /// `has_more` without a COUNT query. This lister intentionally has no
    /// `total`; callers depend on the feed shape.
    pub async fn feed(
        pool: &PgPool,
        user_id: DbId,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<MessageFeed, sqlx::Error> {
        let page = clamp_page(page);
        let per_page = clamp_per_page(per_page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let offset = (page - 1) * per_page;

        let query = format!(
            "SELECT {COLUMNS} FROM site_messages \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        let mut items = sqlx::query_as::<_, SiteMessage>(&query)
            .bind(user_id)
            .bind(per_page + 1)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let has_more = items.len() as i64 > per_page;
        if has_more {
            items.pop();
        }
        Ok(MessageFeed { items, has_more })
    }

    /// Mark a single message as read. `false` when it does not belong to
    /// the user or was already read.
    pub async fn mark_read(
        pool: &PgPool,
        message_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE site_messages \
             SET is_read = true, read_at = NOW() \
             WHERE id = $1 AND user_id = $2 AND is_read = false",
        )
        .bind(message_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark every unread message as read; returns how many changed.
    pub async fn mark_all_read(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE site_messages \
             SET is_read = true, read_at = NOW() \
             WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Number of unread messages for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM site_messages WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
