//! AI-agent marketplace purchase models.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `agent_purchases` table. Purchases are an immutable
/// ledger: created once, never updated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AgentPurchase {
    pub id: DbId,
    pub order_no: String,
    pub user_id: DbId,
    pub agent_id: DbId,
    pub agent_name: String,
    pub price: i64,
    pub status: String,
    pub created_at: Timestamp,
}

/// DTO for recording an agent purchase.
#[derive(Debug, Deserialize)]
pub struct CreateAgentPurchase {
    pub user_id: DbId,
    pub agent_id: DbId,
    pub agent_name: String,
    /// Price in cents.
    pub price: i64,
}

/// Aggregate sales summary for one agent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SalesStats {
    pub total_sales: i64,
    pub total_revenue: i64,
    pub unique_buyers: i64,
    pub avg_price: f64,
}
