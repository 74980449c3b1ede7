//! Membership tier models: levels, per-user memberships, purchases.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle status of a user membership.
pub const MEMBERSHIP_ACTIVE: &str = "active";

/// Status set once a membership lapses.
pub const MEMBERSHIP_EXPIRED: &str = "expired";

/// A row from the `membership_levels` table (static reference data).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MembershipLevel {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub price: i64,
    pub duration_days: i32,
    pub token_grant: i64,
    pub storage_quota: i64,
    pub benefits: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a membership level.
#[derive(Debug, Deserialize)]
pub struct CreateMembershipLevel {
    pub name: String,
    pub level: i32,
    pub price: i64,
    pub duration_days: i32,
    pub token_grant: Option<i64>,
    pub storage_quota: Option<i64>,
    pub benefits: Option<serde_json::Value>,
}

/// DTO for updating a membership level.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMembershipLevel {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub duration_days: Option<i32>,
    pub token_grant: Option<i64>,
    pub storage_quota: Option<i64>,
    pub benefits: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// A row from the `user_memberships` table.
///
/// "Active" is derived, not stored: `status == "active"` and either no
/// expiry or an expiry in the future.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserMembership {
    pub id: DbId,
    pub user_id: DbId,
    pub level_id: DbId,
    pub status: String,
    pub started_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserMembership {
    /// Whether this membership currently grants its benefits.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.status == MEMBERSHIP_ACTIVE && self.expires_at.map_or(true, |at| at > now)
    }
}

/// A row from the `membership_purchases` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MembershipPurchase {
    pub id: DbId,
    pub order_no: String,
    pub user_id: DbId,
    pub level_id: DbId,
    pub level_name: String,
    pub amount: i64,
    pub duration_days: i32,
    pub created_at: Timestamp,
}

/// DTO for recording a membership purchase.
#[derive(Debug, Deserialize)]
pub struct CreateMembershipPurchase {
    pub user_id: DbId,
    pub level_id: DbId,
    pub level_name: String,
    pub amount: i64,
    pub duration_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn membership(status: &str, expires_at: Option<Timestamp>) -> UserMembership {
        let now = Utc::now();
        UserMembership {
            id: 1,
            user_id: 1,
            level_id: 1,
            status: status.to_string(),
            started_at: now,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn active_without_expiry() {
        let m = membership(MEMBERSHIP_ACTIVE, None);
        assert!(m.is_active(Utc::now()));
    }

    #[test]
    fn active_with_future_expiry() {
        let m = membership(MEMBERSHIP_ACTIVE, Some(Utc::now() + Duration::days(30)));
        assert!(m.is_active(Utc::now()));
    }

    #[test]
    fn inactive_when_expired() {
        let m = membership(MEMBERSHIP_ACTIVE, Some(Utc::now() - Duration::days(1)));
        assert!(!m.is_active(Utc::now()));
    }

    #[test]
    fn inactive_when_status_not_active() {
        let m = membership(MEMBERSHIP_EXPIRED, None);
        assert!(!m.is_active(Utc::now()));
    }
}
