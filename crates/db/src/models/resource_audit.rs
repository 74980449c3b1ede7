//! Resource audit queue models.
//!
//! User-submitted resources wait in a two-state queue
//! (`pending -> approved | rejected`); every review decision is also
//! appended to an immutable log, in the same transaction as the status
//! change.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Queue status of a freshly submitted resource.
pub const AUDIT_PENDING: &str = "pending";

/// A row from the `resource_audits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResourceAudit {
    pub id: DbId,
    pub user_id: DbId,
    pub resource_type: String,
    pub resource_id: DbId,
    pub title: String,
    pub status: String,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A row from the append-only `audit_review_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditReviewLog {
    pub id: DbId,
    pub audit_id: DbId,
    pub reviewer_id: DbId,
    pub decision: String,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for submitting a resource to the queue.
#[derive(Debug, Deserialize)]
pub struct SubmitAudit {
    pub user_id: DbId,
    pub resource_type: String,
    pub resource_id: DbId,
    pub title: String,
}

/// Outcome of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    /// The status string written to the audit row and its log entry.
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewDecision::Approved => "approved",
            ReviewDecision::Rejected => "rejected",
        }
    }
}
