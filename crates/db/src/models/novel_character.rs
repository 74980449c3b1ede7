//! Character-sheet models for novels.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `novel_characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NovelCharacter {
    pub id: DbId,
    pub novel_id: DbId,
    pub name: String,
    pub role: String,
    pub description: String,
    pub traits: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a character sheet.
#[derive(Debug, Deserialize)]
pub struct CreateNovelCharacter {
    pub novel_id: DbId,
    pub name: String,
    pub role: Option<String>,
    pub description: Option<String>,
    pub traits: Option<serde_json::Value>,
}

/// DTO for updating a character sheet.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNovelCharacter {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub traits: Option<serde_json::Value>,
}
