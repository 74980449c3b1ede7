//! User entity model.
//!
//! Authentication and profile management live outside this layer; users
//! exist here as the foreign-key anchor for per-user tables.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
}
