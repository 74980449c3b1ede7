//! Chapter models with immutable version history.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `novel_chapters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chapter {
    pub id: DbId,
    pub novel_id: DbId,
    pub title: String,
    pub content: String,
    pub word_count: i64,
    pub sort_order: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `chapter_versions` table. Version rows are append-only;
/// every content write adds one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChapterVersion {
    pub id: DbId,
    pub chapter_id: DbId,
    pub content: String,
    pub word_count: i64,
    pub version: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a chapter.
#[derive(Debug, Deserialize)]
pub struct CreateChapter {
    pub novel_id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating chapter metadata (content goes through
/// `ChapterRepo::update_content` so the version history stays complete).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateChapter {
    pub title: Option<String>,
    pub sort_order: Option<i32>,
    pub status: Option<String>,
}
