//! Site message (in-app inbox) models.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `site_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteMessage {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for sending a message to a user.
#[derive(Debug, Deserialize)]
pub struct CreateSiteMessage {
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

/// Feed page for the inbox: fetch-one-extra pagination, no total count.
/// Callers depend on this shape; do not fold into `Page<T>`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageFeed {
    pub items: Vec<SiteMessage>,
    pub has_more: bool,
}
