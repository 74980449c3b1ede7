//! Repository for the `recharge_records` ledger.

use inkstone_core::order::order_no;
use inkstone_core::pagination::{Page, PageParams};
use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::recharge::{CreateRecharge, RechargeRecord, STATUS_PENDING};

/// Column list for `recharge_records` queries.
const COLUMNS: &str = "id, order_no, user_id, package_id, amount, bonus, \
    payment_method, payment_status, paid_at, created_at";

/// Provides order creation and the guarded status transition for
/// recharge records.
pub struct RechargeRepo;

impl RechargeRepo {
    /// Open a recharge order in `pending` status, returning the row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRecharge,
    ) -> Result<RechargeRecord, sqlx::Error> {
        if input.amount <= 0 {
            return Err(sqlx::Error::InvalidArgument(
                "recharge amount must be positive".into(),
            ));
        }

        let order = order_no("RC", input.user_id);
        let query = format!(
            "INSERT INTO recharge_records \
                (order_no, user_id, package_id, amount, bonus, payment_method) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RechargeRecord>(&query)
            .bind(&order)
            .bind(input.user_id)
            .bind(input.package_id)
            .bind(input.amount)
            .bind(input.bonus.unwrap_or(0))
            .bind(&input.payment_method)
            .fetch_one(pool)
            .await
    }

    /// Find a record by its order number.
    pub async fn find_by_order_no(
        pool: &PgPool,
        order_no: &str,
    ) -> Result<Option<RechargeRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recharge_records WHERE order_no = $1");
        sqlx::query_as::<_, RechargeRecord>(&query)
            .bind(order_no)
            .fetch_optional(pool)
            .await
    }

    /// Move an order from `pending` to a terminal status.
    ///
    /// The UPDATE is gated on the current status, so a finalized order is
    /// never re-processed: the second call affects zero rows and returns
    /// `false`. `paid_at` is stamped only when the order actually moves
    /// to `paid`; a failed order keeps it NULL.
    pub async fn update_status(
        pool: &PgPool,
        order_no: &str,
        new_status: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE recharge_records \
             SET payment_status = $2, \
                 paid_at = CASE WHEN $2 = 'paid' THEN NOW() END \
             WHERE order_no = $1 AND payment_status = $3",
        )
        .bind(order_no)
        .bind(new_status)
        .bind(STATUS_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's recharge records, newest first, COUNT-backed page.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        params: PageParams,
    ) -> Result<Page<RechargeRecord>, sqlx::Error> {
        let (page, per_page, offset) = params.resolve();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM recharge_records WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM recharge_records \
             WHERE user_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, RechargeRecord>(&query)
            .bind(user_id)
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page, per_page))
    }
}
