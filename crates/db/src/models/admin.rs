//! Admin role and operation-log models.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `admin_roles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminRole {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub permissions: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an admin role.
#[derive(Debug, Deserialize)]
pub struct CreateAdminRole {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Option<serde_json::Value>,
}

/// DTO for updating an admin role.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAdminRole {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<serde_json::Value>,
    pub is_active: Option<bool>,
}

/// A row from the `admin_logs` table (append-only).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminLog {
    pub id: DbId,
    pub admin_id: DbId,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    pub detail: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for recording an admin operation.
#[derive(Debug, Deserialize)]
pub struct CreateAdminLog {
    pub admin_id: DbId,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<DbId>,
    pub detail: Option<serde_json::Value>,
    pub ip_address: Option<String>,
}

/// Filter parameters for the operation-log lister.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminLogQuery {
    pub admin_id: Option<DbId>,
    pub action: Option<String>,
    pub target_type: Option<String>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
