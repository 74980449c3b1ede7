//! Wallet and token balance models.
//!
//! One wallet row and one token-balance row per user; balances are
//! mutated in place by guarded UPDATEs, with token consumption mirrored
//! into an immutable ledger.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_wallets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserWallet {
    pub id: DbId,
    pub user_id: DbId,
    /// Balance in cents.
    pub balance: i64,
    pub total_recharged: i64,
    pub total_spent: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `user_token_balances` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TokenBalance {
    pub id: DbId,
    pub user_id: DbId,
    pub balance: i64,
    pub total_granted: i64,
    pub total_consumed: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `token_consumptions` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TokenConsumption {
    pub id: DbId,
    pub user_id: DbId,
    pub feature: String,
    pub tokens: i64,
    pub balance_after: i64,
    pub created_at: Timestamp,
}

/// DTO for a token consumption attempt.
#[derive(Debug, Deserialize)]
pub struct ConsumeTokens {
    pub user_id: DbId,
    pub feature: String,
    pub tokens: i64,
}
