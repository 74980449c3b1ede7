//! Repositories for AI model reference data: embedding models, model
//! prices, and chat presets.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::ai_model::{
    CreateEmbeddingModel, CreateModelPrice, CreatePresetModel, EmbeddingModel, ModelPrice,
    PresetModel, UpdateEmbeddingModel, UpdateModelPrice, UpdatePresetModel,
};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for `embedding_models` queries.
const EMBEDDING_COLUMNS: &str = "id, name, provider, model_key, dimensions, \
    is_active, sort_order, created_at, updated_at";

/// Column list for `model_prices` queries.
const PRICE_COLUMNS: &str = "id, model_key, prompt_price, completion_price, \
    unit, is_active, created_at, updated_at";

/// Column list for `preset_models` queries.
const PRESET_COLUMNS: &str = "id, name, model_key, provider, max_tokens, \
    temperature, is_default, is_active, created_at, updated_at";

// ---------------------------------------------------------------------------
// EmbeddingModelRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for embedding model entries.
pub struct EmbeddingModelRepo;

impl EmbeddingModelRepo {
    /// Insert an entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEmbeddingModel,
    ) -> Result<EmbeddingModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO embedding_models (name, provider, model_key, dimensions, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {EMBEDDING_COLUMNS}"
        );
        sqlx::query_as::<_, EmbeddingModel>(&query)
            .bind(&input.name)
            .bind(&input.provider)
            .bind(&input.model_key)
            .bind(input.dimensions)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find an entry by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EmbeddingModel>, sqlx::Error> {
        let query = format!("SELECT {EMBEDDING_COLUMNS} FROM embedding_models WHERE id = $1");
        sqlx::query_as::<_, EmbeddingModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active entries by sort order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<EmbeddingModel>, sqlx::Error> {
        let query = format!(
            "SELECT {EMBEDDING_COLUMNS} FROM embedding_models \
             WHERE is_active = true \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, EmbeddingModel>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an entry. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmbeddingModel,
    ) -> Result<Option<EmbeddingModel>, sqlx::Error> {
        let query = format!(
            "UPDATE embedding_models SET \
                name = COALESCE($1, name), \
                provider = COALESCE($2, provider), \
                dimensions = COALESCE($3, dimensions), \
                is_active = COALESCE($4, is_active), \
                sort_order = COALESCE($5, sort_order), \
                updated_at = NOW() \
             WHERE id = $6 \
             RETURNING {EMBEDDING_COLUMNS}"
        );
        sqlx::query_as::<_, EmbeddingModel>(&query)
            .bind(&input.name)
            .bind(&input.provider)
            .bind(input.dimensions)
            .bind(input.is_active)
            .bind(input.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM embedding_models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// ModelPriceRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for model price entries.
pub struct ModelPriceRepo;

impl ModelPriceRepo {
    /// Insert a price entry, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateModelPrice,
    ) -> Result<ModelPrice, sqlx::Error> {
        let query = format!(
            "INSERT INTO model_prices (model_key, prompt_price, completion_price, unit) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PRICE_COLUMNS}"
        );
        sqlx::query_as::<_, ModelPrice>(&query)
            .bind(&input.model_key)
            .bind(input.prompt_price)
            .bind(input.completion_price)
            .bind(input.unit.as_deref().unwrap_or("per_1k_tokens"))
            .fetch_one(pool)
            .await
    }

    /// The price entry for a model key, if present.
    pub async fn find_by_model_key(
        pool: &PgPool,
        model_key: &str,
    ) -> Result<Option<ModelPrice>, sqlx::Error> {
        let query = format!("SELECT {PRICE_COLUMNS} FROM model_prices WHERE model_key = $1");
        sqlx::query_as::<_, ModelPrice>(&query)
            .bind(model_key)
            .fetch_optional(pool)
            .await
    }

    /// List every price entry.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ModelPrice>, sqlx::Error> {
        let query = format!("SELECT {PRICE_COLUMNS} FROM model_prices ORDER BY model_key");
        sqlx::query_as::<_, ModelPrice>(&query).fetch_all(pool).await
    }

    /// Update a price entry by model key. Returns the updated row, or
    /// `None` if not found.
    pub async fn update(
        pool: &PgPool,
        model_key: &str,
        input: &UpdateModelPrice,
    ) -> Result<Option<ModelPrice>, sqlx::Error> {
        let query = format!(
            "UPDATE model_prices SET \
                prompt_price = COALESCE($1, prompt_price), \
                completion_price = COALESCE($2, completion_price), \
                unit = COALESCE($3, unit), \
                is_active = COALESCE($4, is_active), \
                updated_at = NOW() \
             WHERE model_key = $5 \
             RETURNING {PRICE_COLUMNS}"
        );
        sqlx::query_as::<_, ModelPrice>(&query)
            .bind(input.prompt_price)
            .bind(input.completion_price)
            .bind(&input.unit)
            .bind(input.is_active)
            .bind(model_key)
            .fetch_optional(pool)
            .await
    }

    /// Delete a price entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, model_key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM model_prices WHERE model_key = $1")
            .bind(model_key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// PresetModelRepo
// ---------------------------------------------------------------------------

/// Provides CRUD operations for chat model presets.
pub struct PresetModelRepo;

impl PresetModelRepo {
    /// Insert a preset, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePresetModel,
    ) -> Result<PresetModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO preset_models (name, model_key, provider, max_tokens, temperature) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {PRESET_COLUMNS}"
        );
        sqlx::query_as::<_, PresetModel>(&query)
            .bind(&input.name)
            .bind(&input.model_key)
            .bind(&input.provider)
            .bind(input.max_tokens.unwrap_or(4096))
            .bind(input.temperature.unwrap_or(0.7))
            .fetch_one(pool)
            .await
    }

    /// Find a preset by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PresetModel>, sqlx::Error> {
        let query = format!("SELECT {PRESET_COLUMNS} FROM preset_models WHERE id = $1");
        sqlx::query_as::<_, PresetModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active presets.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<PresetModel>, sqlx::Error> {
        let query = format!(
            "SELECT {PRESET_COLUMNS} FROM preset_models WHERE is_active = true ORDER BY name"
        );
        sqlx::query_as::<_, PresetModel>(&query).fetch_all(pool).await
    }

    /// The active default preset, if one is marked.
    pub async fn default_preset(pool: &PgPool) -> Result<Option<PresetModel>, sqlx::Error> {
        let query = format!(
            "SELECT {PRESET_COLUMNS} FROM preset_models \
             WHERE is_default = true AND is_active = true \
             LIMIT 1"
        );
        sqlx::query_as::<_, PresetModel>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Promote a preset to the default.
    ///
    /// Runs in a transaction: unset the current default, then set the
    /// new one. When the preset does not exist the transaction is rolled
    /// back, so the previous default survives, and `false` is returned.
    pub async fn set_default(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE preset_models SET is_default = false WHERE is_default = true")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            "UPDATE preset_models SET is_default = true, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Update a preset. Returns the updated row, or `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePresetModel,
    ) -> Result<Option<PresetModel>, sqlx::Error> {
        let query = format!(
            "UPDATE preset_models SET \
                name = COALESCE($1, name), \
                model_key = COALESCE($2, model_key), \
                provider = COALESCE($3, provider), \
                max_tokens = COALESCE($4, max_tokens), \
                temperature = COALESCE($5, temperature), \
                is_active = COALESCE($6, is_active), \
                updated_at = NOW() \
             WHERE id = $7 \
             RETURNING {PRESET_COLUMNS}"
        );
        sqlx::query_as::<_, PresetModel>(&query)
            .bind(&input.name)
            .bind(&input.model_key)
            .bind(&input.provider)
            .bind(input.max_tokens)
            .bind(input.temperature)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a preset. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM preset_models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
