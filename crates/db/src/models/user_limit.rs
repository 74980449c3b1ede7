//! Per-feature usage limit models.

use inkstone_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_limits` table, one per (user, feature).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserLimit {
    pub id: DbId,
    pub user_id: DbId,
    pub feature: String,
    pub used_count: i32,
    /// `-1` means unlimited.
    pub max_count: i32,
    pub resets_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserLimit {
    /// Whether the feature is still accessible under this limit.
    pub fn has_access(&self) -> bool {
        inkstone_core::limits::has_access(self.used_count, self.max_count)
    }
}
