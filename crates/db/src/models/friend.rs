//! Friend graph models.
//!
//! A friendship is undirected but stored as two directed rows, written
//! together in one transaction so the symmetry invariant holds.

use inkstone_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A directed row from the `friends` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Friend {
    pub id: DbId,
    pub user_id: DbId,
    pub friend_id: DbId,
    pub created_at: Timestamp,
}

/// A friend joined with the user profile, as returned by friend listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FriendProfile {
    pub friend_id: DbId,
    pub username: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub friends_since: Timestamp,
}
