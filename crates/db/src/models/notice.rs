//! Notice bar and announcement category models.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Valid range for notice-bar priority; writes outside it are clamped.
pub const PRIORITY_MIN: i32 = 0;
pub const PRIORITY_MAX: i32 = 100;

/// A row from the `notice_bars` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NoticeBar {
    pub id: DbId,
    pub content: String,
    pub link: Option<String>,
    pub priority: i32,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a notice bar.
#[derive(Debug, Deserialize)]
pub struct CreateNoticeBar {
    pub content: String,
    pub link: Option<String>,
    pub priority: Option<i32>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// DTO for updating a notice bar.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoticeBar {
    pub content: Option<String>,
    pub link: Option<String>,
    pub priority: Option<i32>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_active: Option<bool>,
}

/// A row from the `announcement_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnnouncementCategory {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an announcement category.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncementCategory {
    pub name: String,
    pub slug: String,
    pub sort_order: Option<i32>,
}

/// DTO for updating an announcement category.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAnnouncementCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
