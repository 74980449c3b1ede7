//! Repository for the `novel_characters` table.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::novel_character::{
    CreateNovelCharacter, NovelCharacter, UpdateNovelCharacter,
};

/// Column list for `novel_characters` queries.
const COLUMNS: &str =
    "id, novel_id, name, role, description, traits, created_at, updated_at";

/// Provides CRUD operations for character sheets.
pub struct NovelCharacterRepo;

impl NovelCharacterRepo {
    /// Insert a character sheet, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNovelCharacter,
    ) -> Result<NovelCharacter, sqlx::Error> {
        let query = format!(
            "INSERT INTO novel_characters (novel_id, name, role, description, traits) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NovelCharacter>(&query)
            .bind(input.novel_id)
            .bind(&input.name)
            .bind(input.role.as_deref().unwrap_or("supporting"))
            .bind(input.description.as_deref().unwrap_or(""))
            .bind(
                input
                    .traits
                    .clone()
                    .unwrap_or_else(|| serde_json::json!({})),
            )
            .fetch_one(pool)
            .await
    }

    /// Find a character sheet by primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<NovelCharacter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novel_characters WHERE id = $1");
        sqlx::query_as::<_, NovelCharacter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a novel's characters by name.
    pub async fn list_by_novel(
        pool: &PgPool,
        novel_id: DbId,
    ) -> Result<Vec<NovelCharacter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novel_characters WHERE novel_id = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, NovelCharacter>(&query)
            .bind(novel_id)
            .fetch_all(pool)
            .await
    }

    /// Update a character sheet. Returns the updated row, or `None` if
    /// not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNovelCharacter,
    ) -> Result<Option<NovelCharacter>, sqlx::Error> {
        let query = format!(
            "UPDATE novel_characters SET \
                name = COALESCE($1, name), \
                role = COALESCE($2, role), \
                description = COALESCE($3, description), \
                traits = COALESCE($4, traits), \
                updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, NovelCharacter>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.description)
            .bind(&input.traits)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a character sheet. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM novel_characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
