//! AI music melody models.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `melodies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Melody {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub status: String,
    pub duration_secs: Option<i32>,
    pub bpm: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for creating a melody job row.
#[derive(Debug, Deserialize)]
pub struct CreateMelody {
    pub user_id: DbId,
    pub title: String,
    pub bpm: Option<i32>,
}

/// Aggregate melody statistics (conditional counts by status).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MelodyStats {
    pub total: i64,
    pub completed: i64,
    pub generating: i64,
    pub failed: i64,
    pub avg_duration_secs: f64,
}
