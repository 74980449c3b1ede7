//! Repositories for admin roles and the admin operation log.

use inkstone_core::pagination::{Page, PageParams};
use inkstone_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::admin::{
    AdminLog, AdminLogQuery, AdminRole, CreateAdminLog, CreateAdminRole, UpdateAdminRole,
};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `admin_roles` queries.
const ROLE_COLUMNS: &str =
    "id, name, description, permissions, is_active, created_at, updated_at";

/// Column list for `admin_logs` queries.
const LOG_COLUMNS: &str =
    "id, admin_id, action, target_type, target_id, detail, ip_address, created_at";

// ---------------------------------------------------------------------------
// AdminRoleRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for admin roles.
pub struct AdminRoleRepo;

impl AdminRoleRepo {
    /// Insert a role, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAdminRole) -> Result<AdminRole, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_roles (name, description, permissions) \
             VALUES ($1, $2, $3) \
             RETURNING {ROLE_COLUMNS}"
        );
        sqlx::query_as::<_, AdminRole>(&query)
            .bind(&input.name)
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(
                input
                    .permissions
                    .clone()
                    .unwrap_or_else(|| serde_json::json!([])),
            )
            .fetch_one(pool)
            .await
    }

    /// Find a role by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminRole>, sqlx::Error> {
        let query = format!("SELECT {ROLE_COLUMNS} FROM admin_roles WHERE id = $1");
        sqlx::query_as::<_, AdminRole>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every role by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<AdminRole>, sqlx::Error> {
        let query = format!("SELECT {ROLE_COLUMNS} FROM admin_roles ORDER BY name");
        sqlx::query_as::<_, AdminRole>(&query).fetch_all(pool).await
    }

    /// Update a role. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdminRole,
    ) -> Result<Option<AdminRole>, sqlx::Error> {
        let query = format!(
            "UPDATE admin_roles SET \
                name = COALESCE($1, name), \
                description = COALESCE($2, description), \
                permissions = COALESCE($3, permissions), \
                is_active = COALESCE($4, is_active), \
                updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {ROLE_COLUMNS}"
        );
        sqlx::query_as::<_, AdminRole>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.permissions)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a role. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// AdminLogRepo
// ---------------------------------------------------------------------------

/// Provides the append-only admin operation log.
pub struct AdminLogRepo;

impl AdminLogRepo {
    /// Record an operation, best-effort.
    ///
    /// Logging must never fail the operation it describes: database
    /// errors are logged via tracing and collapse to `None`.
    pub async fn record(pool: &PgPool, input: &CreateAdminLog) -> Option<DbId> {
        let result = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO admin_logs \
                (admin_id, action, target_type, target_id, detail, ip_address) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(input.admin_id)
        .bind(&input.action)
        .bind(&input.target_type)
        .bind(input.target_id)
        .bind(&input.detail)
        .bind(&input.ip_address)
        .fetch_one(pool)
        .await;

        match result {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(admin_id = input.admin_id, action = %input.action, error = %err,
                    "failed to record admin operation log");
                None
            }
        }
    }

    /// Query operation logs with optional filters, newest first,
    /// COUNT-backed page.
    pub async fn operation_logs(
        pool: &PgPool,
        filter: &AdminLogQuery,
        params: PageParams,
    ) -> Result<Page<AdminLog>, sqlx::Error> {
        let (page, per_page, offset) = params.resolve();
        let (where_clause, bind_values, bind_idx) = build_log_filter(filter);

        let count_query = format!("SELECT COUNT(*) FROM admin_logs {where_clause}");
        let total: i64 = bind_values
            .iter()
            .fold(
                sqlx::query_scalar::<_, i64>(&count_query),
                |q, v| match v {
                    BindValue::BigInt(i) => q.bind(*i),
                    BindValue::Text(s) => q.bind(s.clone()),
                    BindValue::Timestamp(t) => q.bind(*t),
                },
            )
            .fetch_one(pool)
            .await?;

        let list_query = format!(
            "SELECT {LOG_COLUMNS} FROM admin_logs {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );
        let items = bind_values
            .iter()
            .fold(
                sqlx::query_as::<_, AdminLog>(&list_query),
                |q, v| match v {
                    BindValue::BigInt(i) => q.bind(*i),
                    BindValue::Text(s) => q.bind(s.clone()),
                    BindValue::Timestamp(t) => q.bind(*t),
                },
            )
            .bind(per_page)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(Page::new(items, total, page, per_page))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built log queries.
enum BindValue {
    BigInt(i64),
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from the log filter.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when no filters are active, otherwise starts with `WHERE `.
fn build_log_filter(filter: &AdminLogQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(admin_id) = filter.admin_id {
        conditions.push(format!("admin_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(admin_id));
    }

    if let Some(ref action) = filter.action {
        conditions.push(format!("action = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(action.clone()));
    }

    if let Some(ref target_type) = filter.target_type {
        conditions.push(format!("target_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(target_type.clone()));
    }

    if let Some(from) = filter.from {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = filter.to {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
