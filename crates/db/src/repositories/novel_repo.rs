//! Repository for the `novels` table.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::novel::{CreateNovel, Novel, NovelStats, UpdateNovel};

/// Column list for `novels` queries.
const COLUMNS: &str =
    "id, user_id, title, synopsis, genre, status, current_words, created_at, updated_at";

/// Provides CRUD, statistics, and the word-count recompute for novels.
pub struct NovelRepo;

impl NovelRepo {
    /// Insert a new novel, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNovel) -> Result<Novel, sqlx::Error> {
        let query = format!(
            "INSERT INTO novels (user_id, title, synopsis, genre) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(input.synopsis.as_deref().unwrap_or(""))
            .bind(&input.genre)
            .fetch_one(pool)
            .await
    }

    /// Find a novel by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novels WHERE id = $1");
        sqlx::query_as::<_, Novel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's novels, most recently touched first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novels WHERE user_id = $1 ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update novel metadata. Returns the updated row, or `None` if not
    /// found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNovel,
    ) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!(
            "UPDATE novels SET \
                title = COALESCE($1, title), \
                synopsis = COALESCE($2, synopsis), \
                genre = COALESCE($3, genre), \
                status = COALESCE($4, status), \
                updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(&input.genre)
            .bind(&input.status)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a novel (chapters, outlines, and characters cascade).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM novels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute `current_words` as the sum of all chapter word counts.
    ///
    /// Full re-derivation rather than incremental maintenance; called by
    /// the chapter repository after every content write. Returns the new
    /// total.
    pub async fn recalc_word_count(pool: &PgPool, novel_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE novels \
             SET current_words = ( \
                 SELECT COALESCE(SUM(word_count), 0) \
                 FROM novel_chapters WHERE novel_id = $1 \
             ), \
             updated_at = NOW() \
             WHERE id = $1 \
             RETURNING current_words",
        )
        .bind(novel_id)
        .fetch_one(pool)
        .await
    }

    /// Chapter statistics for one novel in a single aggregate query.
    pub async fn stats(pool: &PgPool, novel_id: DbId) -> Result<NovelStats, sqlx::Error> {
        sqlx::query_as::<_, NovelStats>(
            "SELECT COUNT(*) AS chapter_count, \
                    COALESCE(SUM(word_count), 0)::BIGINT AS total_words, \
                    COUNT(*) FILTER (WHERE status = 'published') AS published_chapters, \
                    COUNT(*) FILTER (WHERE status = 'draft') AS draft_chapters \
             FROM novel_chapters \
             WHERE novel_id = $1",
        )
        .bind(novel_id)
        .fetch_one(pool)
        .await
    }
}
