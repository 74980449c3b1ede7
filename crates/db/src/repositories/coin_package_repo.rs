//! Repository for the `coin_packages` reference table.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::coin_package::{CoinPackage, CreateCoinPackage, UpdateCoinPackage};

/// Column list for `coin_packages` queries.
const COLUMNS: &str =
    "id, name, price, coins, bonus_coins, is_active, sort_order, created_at, updated_at";

/// Provides CRUD operations for coin packages.
pub struct CoinPackageRepo;

impl CoinPackageRepo {
    /// Insert a new package, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCoinPackage,
    ) -> Result<CoinPackage, sqlx::Error> {
        let query = format!(
            "INSERT INTO coin_packages (name, price, coins, bonus_coins, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CoinPackage>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.coins)
            .bind(input.bonus_coins.unwrap_or(0))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a package by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CoinPackage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coin_packages WHERE id = $1");
        sqlx::query_as::<_, CoinPackage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every package, by sort order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<CoinPackage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM coin_packages ORDER BY sort_order, id");
        sqlx::query_as::<_, CoinPackage>(&query).fetch_all(pool).await
    }

    /// List packages available for purchase.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<CoinPackage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM coin_packages WHERE is_active = true ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, CoinPackage>(&query).fetch_all(pool).await
    }

    /// Update a package. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCoinPackage,
    ) -> Result<Option<CoinPackage>, sqlx::Error> {
        let query = format!(
            "UPDATE coin_packages SET \
                name = COALESCE($1, name), \
                price = COALESCE($2, price), \
                coins = COALESCE($3, coins), \
                bonus_coins = COALESCE($4, bonus_coins), \
                is_active = COALESCE($5, is_active), \
                sort_order = COALESCE($6, sort_order), \
                updated_at = NOW() \
             WHERE id = $7 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CoinPackage>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.coins)
            .bind(input.bonus_coins)
            .bind(input.is_active)
            .bind(input.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a package. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM coin_packages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
