//! Repository for the `novel_chapters` table and its version history.

use inkstone_core::text::word_count;
use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::chapter::{Chapter, ChapterVersion, CreateChapter, UpdateChapter};
use crate::repositories::NovelRepo;

/// Column list for `novel_chapters` queries.
const COLUMNS: &str =
    "id, novel_id, title, content, word_count, sort_order, status, created_at, updated_at";

/// Column list for `chapter_versions` queries.
const VERSION_COLUMNS: &str = "id, chapter_id, content, word_count, version, created_at";

/// Provides chapter CRUD, the append-only version history, and the
/// parent word-count recompute.
pub struct ChapterRepo;

impl ChapterRepo {
    /// Insert a new chapter and bring the novel's word count up to date.
    pub async fn create(pool: &PgPool, input: &CreateChapter) -> Result<Chapter, sqlx::Error> {
        let content = input.content.as_deref().unwrap_or("");
        let words = word_count(content);

        let query = format!(
            "INSERT INTO novel_chapters (novel_id, title, content, word_count, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let chapter = sqlx::query_as::<_, Chapter>(&query)
            .bind(input.novel_id)
            .bind(&input.title)
            .bind(content)
            .bind(words)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await?;

        NovelRepo::recalc_word_count(pool, input.novel_id).await?;
        Ok(chapter)
    }

    /// Find a chapter by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chapter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novel_chapters WHERE id = $1");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a novel's chapters in reading order.
    pub async fn list_by_novel(
        pool: &PgPool,
        novel_id: DbId,
    ) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novel_chapters \
             WHERE novel_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(novel_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a chapter's content.
    ///
    /// Appends an immutable version row (next version number), updates
    /// content and word count, then recomputes the parent novel's total.
    /// The three statements are deliberately not one transaction; the
    /// novel total converges on the next content write.
    pub async fn update_content(
        pool: &PgPool,
        id: DbId,
        content: &str,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let words = word_count(content);

        sqlx::query(
            "INSERT INTO chapter_versions (chapter_id, content, word_count, version) \
             SELECT id, $2, $3, \
                    (SELECT COALESCE(MAX(version), 0) + 1 \
                     FROM chapter_versions WHERE chapter_id = $1) \
             FROM novel_chapters WHERE id = $1",
        )
        .bind(id)
        .bind(content)
        .bind(words)
        .execute(pool)
        .await?;

        let query = format!(
            "UPDATE novel_chapters \
             SET content = $2, word_count = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let chapter = sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .bind(content)
            .bind(words)
            .fetch_optional(pool)
            .await?;

        if let Some(ref chapter) = chapter {
            NovelRepo::recalc_word_count(pool, chapter.novel_id).await?;
        }
        Ok(chapter)
    }

    /// Update chapter metadata (title, order, status); content changes go
    /// through [`ChapterRepo::update_content`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChapter,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let query = format!(
            "UPDATE novel_chapters SET \
                title = COALESCE($1, title), \
                sort_order = COALESCE($2, sort_order), \
                status = COALESCE($3, status), \
                updated_at = NOW() \
             WHERE id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(&input.title)
            .bind(input.sort_order)
            .bind(&input.status)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a chapter and restore the novel's word-count invariant.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let novel_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM novel_chapters WHERE id = $1 RETURNING novel_id")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        match novel_id {
            Some(novel_id) => {
                NovelRepo::recalc_word_count(pool, novel_id).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// List a chapter's version history, newest first.
    pub async fn list_versions(
        pool: &PgPool,
        chapter_id: DbId,
    ) -> Result<Vec<ChapterVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {VERSION_COLUMNS} FROM chapter_versions \
             WHERE chapter_id = $1 \
             ORDER BY version DESC"
        );
        sqlx::query_as::<_, ChapterVersion>(&query)
            .bind(chapter_id)
            .fetch_all(pool)
            .await
    }
}
