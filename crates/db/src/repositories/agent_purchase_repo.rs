//! Repository for the `agent_purchases` ledger.

use inkstone_core::order::order_no;
use inkstone_core::pagination::{Page, PageParams};
use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::agent_purchase::{AgentPurchase, CreateAgentPurchase, SalesStats};

/// Column list for `agent_purchases` queries.
const COLUMNS: &str = "id, order_no, user_id, agent_id, agent_name, price, status, created_at";

/// Provides insert, paged listing, and sales statistics for agent
/// purchases. Rows are immutable once written.
pub struct AgentPurchaseRepo;

impl AgentPurchaseRepo {
    /// Record a purchase, generating the order number, and return the row.
    ///
    /// Rejects an empty agent name or non-positive price before touching
    /// the database.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAgentPurchase,
    ) -> Result<AgentPurchase, sqlx::Error> {
        if input.agent_name.trim().is_empty() || input.price <= 0 {
            return Err(sqlx::Error::InvalidArgument(
                "agent purchase requires a name and a positive price".into(),
            ));
        }

        let order = order_no("AP", input.user_id);
        let query = format!(
            "INSERT INTO agent_purchases (order_no, user_id, agent_id, agent_name, price) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AgentPurchase>(&query)
            .bind(&order)
            .bind(input.user_id)
            .bind(input.agent_id)
            .bind(&input.agent_name)
            .bind(input.price)
            .fetch_one(pool)
            .await
    }

    /// Find a purchase by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AgentPurchase>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agent_purchases WHERE id = $1");
        sqlx::query_as::<_, AgentPurchase>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's purchases, newest first, with a COUNT-backed page.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        params: PageParams,
    ) -> Result<Page<AgentPurchase>, sqlx::Error> {
        let (page, per_page, offset) = params.resolve();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM agent_purchases WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM agent_purchases \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, AgentPurchase>(&query)
            .bind(user_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page, per_page))
    }

    /// List purchases of one agent, newest first, with a COUNT-backed page.
    pub async fn list_by_agent(
        pool: &PgPool,
        agent_id: DbId,
        params: PageParams,
    ) -> Result<Page<AgentPurchase>, sqlx::Error> {
        let (page, per_page, offset) = params.resolve();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM agent_purchases WHERE agent_id = $1")
                .bind(agent_id)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM agent_purchases \
             WHERE agent_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, AgentPurchase>(&query)
            .bind(agent_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page, per_page))
    }

    /// Sales summary for one agent: volume, revenue, distinct buyers,
    /// average price. A single aggregate query, zeros when no sales.
    pub async fn sales_stats(pool: &PgPool, agent_id: DbId) -> Result<SalesStats, sqlx::Error> {
        sqlx::query_as::<_, SalesStats>(
            "SELECT COUNT(*) AS total_sales, \
                    COALESCE(SUM(price), 0)::BIGINT AS total_revenue, \
                    COUNT(DISTINCT user_id) AS unique_buyers, \
                    COALESCE(AVG(price), 0)::DOUBLE PRECISION AS avg_price \
             FROM agent_purchases \
             WHERE agent_id = $1",
        )
        .bind(agent_id)
        .fetch_one(pool)
        .await
    }
}
