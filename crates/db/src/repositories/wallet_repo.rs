//! Repository for the `user_wallets` table.
//!
//! One row per user; the balance is mutated in place. `debit` carries
//! its overdraft check inside the UPDATE's WHERE clause so a concurrent
//! debit cannot push the balance negative.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::wallet::UserWallet;

/// Column list for `user_wallets` queries.
const COLUMNS: &str =
    "id, user_id, balance, total_recharged, total_spent, created_at, updated_at";

/// Provides balance operations for user wallets.
pub struct WalletRepo;

impl WalletRepo {
    /// Fetch a user's wallet, creating the zero-balance row on first use.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<UserWallet, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_wallets (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserWallet>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a wallet without creating it.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserWallet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_wallets WHERE user_id = $1");
        sqlx::query_as::<_, UserWallet>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Add funds to a wallet, returning the updated row.
    pub async fn credit(
        pool: &PgPool,
        user_id: DbId,
        amount: i64,
    ) -> Result<Option<UserWallet>, sqlx::Error> {
        let query = format!(
            "UPDATE user_wallets \
             SET balance = balance + $2, \
                 total_recharged = total_recharged + $2, \
                 updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserWallet>(&query)
            .bind(user_id)
            .bind(amount)
            .fetch_optional(pool)
            .await
    }

    /// Spend from a wallet.
    ///
    /// Returns `false` (and leaves the row unchanged) when the balance is
    /// insufficient; the check rides in the WHERE clause.
    pub async fn debit(pool: &PgPool, user_id: DbId, amount: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_wallets \
             SET balance = balance - $2, \
                 total_spent = total_spent + $2, \
                 updated_at = NOW() \
             WHERE user_id = $1 AND balance >= $2",
        )
        .bind(user_id)
        .bind(amount)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
