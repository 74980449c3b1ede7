//! Coin package reference data.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `coin_packages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CoinPackage {
    pub id: DbId,
    pub name: String,
    pub price: i64,
    pub coins: i64,
    pub bonus_coins: i64,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a coin package.
#[derive(Debug, Deserialize)]
pub struct CreateCoinPackage {
    pub name: String,
    pub price: i64,
    pub coins: i64,
    pub bonus_coins: Option<i64>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a coin package.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCoinPackage {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub coins: Option<i64>,
    pub bonus_coins: Option<i64>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}
