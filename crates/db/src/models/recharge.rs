//! Wallet recharge ledger models.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Initial payment status of a new recharge record.
pub const STATUS_PENDING: &str = "pending";

/// Terminal status for a completed payment.
pub const STATUS_PAID: &str = "paid";

/// Terminal status for a failed or cancelled payment.
pub const STATUS_FAILED: &str = "failed";

/// A row from the `recharge_records` table.
///
/// `payment_status` moves from `pending` to exactly one terminal status;
/// the guarded UPDATE in the repository makes the transition
/// at-most-once.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RechargeRecord {
    pub id: DbId,
    pub order_no: String,
    pub user_id: DbId,
    pub package_id: Option<DbId>,
    pub amount: i64,
    pub bonus: i64,
    pub payment_method: String,
    pub payment_status: String,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for opening a recharge order.
#[derive(Debug, Deserialize)]
pub struct CreateRecharge {
    pub user_id: DbId,
    pub package_id: Option<DbId>,
    /// Amount in cents.
    pub amount: i64,
    pub bonus: Option<i64>,
    pub payment_method: String,
}
