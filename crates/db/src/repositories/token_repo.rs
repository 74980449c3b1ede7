//! Repository for the `user_token_balances` table and the
//! `token_consumptions` ledger.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::wallet::{ConsumeTokens, TokenBalance, TokenConsumption};

/// Column list for `user_token_balances` queries.
const COLUMNS: &str =
    "id, user_id, balance, total_granted, total_consumed, created_at, updated_at";

/// Column list for `token_consumptions` queries.
const CONSUMPTION_COLUMNS: &str = "id, user_id, feature, tokens, balance_after, created_at";

/// Provides token balance mutation and the consumption ledger.
pub struct TokenRepo;

impl TokenRepo {
    /// Fetch a user's token balance, creating the zero row on first use.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<TokenBalance, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_token_balances (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TokenBalance>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Grant tokens (membership perks, top-ups), returning the updated row.
    pub async fn grant(
        pool: &PgPool,
        user_id: DbId,
        tokens: i64,
    ) -> Result<TokenBalance, sqlx::Error> {
        // Ensure the row exists so a first grant does not vanish.
        Self::get_or_create(pool, user_id).await?;

        let query = format!(
            "UPDATE user_token_balances \
             SET balance = balance + $2, \
                 total_granted = total_granted + $2, \
                 updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TokenBalance>(&query)
            .bind(user_id)
            .bind(tokens)
            .fetch_one(pool)
            .await
    }

    /// Consume tokens for a feature.
    ///
    /// Returns `false` and leaves the balance unchanged when the balance
    /// is insufficient. On success the decrement and the ledger row are
    /// both written; the balance check is part of the UPDATE itself.
    pub async fn consume(pool: &PgPool, input: &ConsumeTokens) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE user_token_balances \
             SET balance = balance - $2, \
                 total_consumed = total_consumed + $2, \
                 updated_at = NOW() \
             WHERE user_id = $1 AND balance >= $2 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, TokenBalance>(&query)
            .bind(input.user_id)
            .bind(input.tokens)
            .fetch_optional(pool)
            .await?;

        let Some(balance) = updated else {
            return Ok(false);
        };

        sqlx::query(
            "INSERT INTO token_consumptions (user_id, feature, tokens, balance_after) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(input.user_id)
        .bind(&input.feature)
        .bind(input.tokens)
        .bind(balance.balance)
        .execute(pool)
        .await?;

        Ok(true)
    }

    /// List a user's consumption ledger, newest first.
    pub async fn list_consumptions(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<TokenConsumption>, sqlx::Error> {
        let query = format!(
            "SELECT {CONSUMPTION_COLUMNS} FROM token_consumptions \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, TokenConsumption>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
