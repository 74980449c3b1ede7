//! Storage quota and storage backend configuration models.

use inkstone_core::quota;
use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_storage_quotas` table.
///
/// `used_space` is maintained by additive/subtractive updates (clamped at
/// zero), never recomputed from the stored objects.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageQuota {
    pub id: DbId,
    pub user_id: DbId,
    pub used_space: i64,
    pub total_quota: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StorageQuota {
    /// Percentage of the quota in use, rounded to two decimals.
    pub fn usage_percentage(&self) -> f64 {
        quota::usage_percentage(self.used_space, self.total_quota)
    }

    /// Remaining space in bytes, never negative.
    pub fn remaining(&self) -> i64 {
        quota::remaining(self.used_space, self.total_quota)
    }

    /// Human-readable used space, e.g. `"1.50 GB"`.
    pub fn used_display(&self) -> String {
        quota::format_bytes(self.used_space)
    }

    /// Human-readable total quota.
    pub fn total_display(&self) -> String {
        quota::format_bytes(self.total_quota)
    }
}

/// A row from the `storage_configs` table (reference data describing a
/// storage backend; the backend itself is an external collaborator).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StorageConfig {
    pub id: DbId,
    pub name: String,
    pub driver: String,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub base_url: Option<String>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a storage config.
#[derive(Debug, Deserialize)]
pub struct CreateStorageConfig {
    pub name: String,
    pub driver: String,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub base_url: Option<String>,
}

/// DTO for updating a storage config.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStorageConfig {
    pub name: Option<String>,
    pub driver: Option<String>,
    pub bucket: Option<String>,
    pub endpoint: Option<String>,
    pub base_url: Option<String>,
    pub is_default: Option<bool>,
    pub is_active: Option<bool>,
}
