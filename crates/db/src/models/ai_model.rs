//! AI model reference data: embedding models, prices, chat presets.

use inkstone_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `embedding_models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmbeddingModel {
    pub id: DbId,
    pub name: String,
    pub provider: String,
    pub model_key: String,
    pub dimensions: i32,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an embedding model entry.
#[derive(Debug, Deserialize)]
pub struct CreateEmbeddingModel {
    pub name: String,
    pub provider: String,
    pub model_key: String,
    pub dimensions: i32,
    pub sort_order: Option<i32>,
}

/// DTO for updating an embedding model entry.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEmbeddingModel {
    pub name: Option<String>,
    pub provider: Option<String>,
    pub dimensions: Option<i32>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// A row from the `model_prices` table. Prices are integer micro-cents
/// per the configured unit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ModelPrice {
    pub id: DbId,
    pub model_key: String,
    pub prompt_price: i64,
    pub completion_price: i64,
    pub unit: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a model price entry.
#[derive(Debug, Deserialize)]
pub struct CreateModelPrice {
    pub model_key: String,
    pub prompt_price: i64,
    pub completion_price: i64,
    pub unit: Option<String>,
}

/// DTO for updating a model price entry.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateModelPrice {
    pub prompt_price: Option<i64>,
    pub completion_price: Option<i64>,
    pub unit: Option<String>,
    pub is_active: Option<bool>,
}

/// A row from the `preset_models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PresetModel {
    pub id: DbId,
    pub name: String,
    pub model_key: String,
    pub provider: String,
    pub max_tokens: i32,
    pub temperature: f64,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a preset model.
#[derive(Debug, Deserialize)]
pub struct CreatePresetModel {
    pub name: String,
    pub model_key: String,
    pub provider: String,
    pub max_tokens: Option<i32>,
    pub temperature: Option<f64>,
}

/// DTO for updating a preset model.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePresetModel {
    pub name: Option<String>,
    pub model_key: Option<String>,
    pub provider: Option<String>,
    pub max_tokens: Option<i32>,
    pub temperature: Option<f64>,
    pub is_active: Option<bool>,
}
