//! Repository for crowdfunding campaigns and contributions.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::crowdfunding::{
    Campaign, Contribution, CreateCampaign, UpdateCampaign,
};

/// Column list for `campaigns` queries.
const COLUMNS: &str = "id, user_id, title, description, goal_amount, raised_amount, \
    backer_count, status, deadline, created_at, updated_at";

/// Column list for `campaign_contributions` queries.
const CONTRIBUTION_COLUMNS: &str = "id, campaign_id, user_id, amount, message, created_at";

/// Provides campaign CRUD and the contribution ledger.
pub struct CrowdfundingRepo;

impl CrowdfundingRepo {
    /// Insert a campaign, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        if input.title.trim().is_empty() || input.goal_amount <= 0 {
            return Err(sqlx::Error::InvalidArgument(
                "campaign requires a title and a positive goal".into(),
            ));
        }

        let query = format!(
            "INSERT INTO campaigns (user_id, title, description, goal_amount, deadline) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(input.goal_amount)
            .bind(input.deadline)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List campaigns in a status, newest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns WHERE status = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a campaign. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET \
                title = COALESCE($1, title), \
                description = COALESCE($2, description), \
                goal_amount = COALESCE($3, goal_amount), \
                status = COALESCE($4, status), \
                deadline = COALESCE($5, deadline), \
                updated_at = NOW() \
             WHERE id = $6 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.goal_amount)
            .bind(&input.status)
            .bind(input.deadline)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record a contribution and bump the campaign counters.
    ///
    /// Two statements, not one transaction: the counters trail the
    /// ledger briefly under failure, same trade-off as the novel
    /// word-count recompute. The ledger row is the source of truth.
    pub async fn contribute(
        pool: &PgPool,
        campaign_id: DbId,
        user_id: DbId,
        amount: i64,
        message: Option<&str>,
    ) -> Result<Contribution, sqlx::Error> {
        if amount <= 0 {
            return Err(sqlx::Error::InvalidArgument(
                "contribution amount must be positive".into(),
            ));
        }

        let query = format!(
            "INSERT INTO campaign_contributions (campaign_id, user_id, amount, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CONTRIBUTION_COLUMNS}"
        );
        let contribution = sqlx::query_as::<_, Contribution>(&query)
            .bind(campaign_id)
            .bind(user_id)
            .bind(amount)
            .bind(message)
            .fetch_one(pool)
            .await?;

        sqlx::query(
            "UPDATE campaigns \
             SET raised_amount = raised_amount + $2, \
                 backer_count = backer_count + 1, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(campaign_id)
        .bind(amount)
        .execute(pool)
        .await?;

        Ok(contribution)
    }

    /// List a campaign's contributions, newest first.
    pub async fn list_contributions(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Contribution>, sqlx::Error> {
        let query = format!(
            "SELECT {CONTRIBUTION_COLUMNS} FROM campaign_contributions \
             WHERE campaign_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Contribution>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }
}
