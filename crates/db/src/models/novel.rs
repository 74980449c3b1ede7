//! Novel entity models and DTOs.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `novels` table.
///
/// `current_words` is an aggregate over the novel's chapters, recomputed
/// synchronously after every chapter content write.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Novel {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub synopsis: String,
    pub genre: Option<String>,
    pub status: String,
    pub current_words: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a novel.
#[derive(Debug, Deserialize)]
pub struct CreateNovel {
    pub user_id: DbId,
    pub title: String,
    pub synopsis: Option<String>,
    pub genre: Option<String>,
}

/// DTO for updating a novel.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNovel {
    pub title: Option<String>,
    pub synopsis: Option<String>,
    pub genre: Option<String>,
    pub status: Option<String>,
}

/// Aggregate statistics for one novel.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NovelStats {
    pub chapter_count: i64,
    pub total_words: i64,
    pub published_chapters: i64,
    pub draft_chapters: i64,
}
