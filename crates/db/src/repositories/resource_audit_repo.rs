//! Repository for the resource audit queue and its review log.

use inkstone_core::pagination::{Page, PageParams};
use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::resource_audit::{
    AuditReviewLog, ResourceAudit, ReviewDecision, SubmitAudit, AUDIT_PENDING,
};

/// Column list for `resource_audits` queries.
const COLUMNS: &str = "id, user_id, resource_type, resource_id, title, status, \
    reviewed_by, reviewed_at, created_at";

/// Column list for `audit_review_logs` queries.
const LOG_COLUMNS: &str = "id, audit_id, reviewer_id, decision, comment, created_at";

/// Provides submission, queue listing, and the transactional review for
/// resource audits.
pub struct ResourceAuditRepo;

impl ResourceAuditRepo {
    /// Submit a resource to the queue in `pending` status.
    pub async fn submit(pool: &PgPool, input: &SubmitAudit) -> Result<ResourceAudit, sqlx::Error> {
        let query = format!(
            "INSERT INTO resource_audits (user_id, resource_type, resource_id, title) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResourceAudit>(&query)
            .bind(input.user_id)
            .bind(&input.resource_type)
            .bind(input.resource_id)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    /// Find an audit entry by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ResourceAudit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resource_audits WHERE id = $1");
        sqlx::query_as::<_, ResourceAudit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The review queue, oldest submission first, filtered by status,
    /// COUNT-backed page.
    pub async fn queue(
        pool: &PgPool,
        status: &str,
        params: PageParams,
    ) -> Result<Page<ResourceAudit>, sqlx::Error> {
        let (page, per_page, offset) = params.resolve();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM resource_audits WHERE status = $1")
                .bind(status)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM resource_audits \
             WHERE status = $1 \
             ORDER BY created_at ASC \
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, ResourceAudit>(&query)
            .bind(status)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page, per_page))
    }

    /// Review a pending entry: status flip and log append, atomically.
    ///
    /// Runs in one transaction. The status UPDATE is gated on
    /// `status = 'pending'`; if the entry was already finalized the
    /// transaction is rolled back and `false` is returned, so no stray
    /// log row survives. Any database error aborts the transaction on
    /// drop and propagates.
    pub async fn review(
        pool: &PgPool,
        audit_id: DbId,
        reviewer_id: DbId,
        decision: ReviewDecision,
        comment: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE resource_audits \
             SET status = $2, reviewed_by = $3, reviewed_at = NOW() \
             WHERE id = $1 AND status = $4",
        )
        .bind(audit_id)
        .bind(decision.as_str())
        .bind(reviewer_id)
        .bind(AUDIT_PENDING)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO audit_review_logs (audit_id, reviewer_id, decision, comment) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(audit_id)
        .bind(reviewer_id)
        .bind(decision.as_str())
        .bind(comment)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// The append-only review log for one entry, oldest first.
    pub async fn logs_for(
        pool: &PgPool,
        audit_id: DbId,
    ) -> Result<Vec<AuditReviewLog>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM audit_review_logs \
             WHERE audit_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, AuditReviewLog>(&query)
            .bind(audit_id)
            .fetch_all(pool)
            .await
    }
}
