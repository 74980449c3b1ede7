//! Crowdfunding campaign and contribution models.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table.
///
/// `raised_amount` and `backer_count` are running counters bumped after
/// each contribution insert (two statements, like the novel word-count
/// recompute — not one transaction).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub goal_amount: i64,
    pub raised_amount: i64,
    pub backer_count: i32,
    pub status: String,
    pub deadline: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a campaign.
#[derive(Debug, Deserialize)]
pub struct CreateCampaign {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub goal_amount: i64,
    pub deadline: Option<Timestamp>,
}

/// DTO for updating a campaign.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCampaign {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal_amount: Option<i64>,
    pub status: Option<String>,
    pub deadline: Option<Timestamp>,
}

/// A row from the `campaign_contributions` ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contribution {
    pub id: DbId,
    pub campaign_id: DbId,
    pub user_id: DbId,
    pub amount: i64,
    pub message: Option<String>,
    pub created_at: Timestamp,
}
