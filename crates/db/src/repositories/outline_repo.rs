//! Repository for the self-referential `novel_outlines` tree.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::outline::{build_tree, CreateOutline, Outline, OutlineNode, UpdateOutline};

/// Column list for `novel_outlines` queries.
const COLUMNS: &str =
    "id, novel_id, parent_id, title, summary, sort_order, created_at, updated_at";

/// Upper bound on the ancestor walk in `move_node`; deeper chains are
/// treated as malformed.
const MAX_DEPTH: u32 = 64;

/// Provides CRUD, reparenting with a cycle guard, and the tree reader
/// for outlines.
pub struct OutlineRepo;

impl OutlineRepo {
    /// Insert an outline node, returning the created row.
    ///
    /// A `parent_id` pointing at another novel's node is rejected by
    /// scoping the parent lookup to the same novel.
    pub async fn create(pool: &PgPool, input: &CreateOutline) -> Result<Outline, sqlx::Error> {
        if let Some(parent_id) = input.parent_id {
            let exists: Option<DbId> = sqlx::query_scalar(
                "SELECT id FROM novel_outlines WHERE id = $1 AND novel_id = $2",
            )
            .bind(parent_id)
            .bind(input.novel_id)
            .fetch_optional(pool)
            .await?;
            if exists.is_none() {
                return Err(sqlx::Error::InvalidArgument(
                    "outline parent must belong to the same novel".into(),
                ));
            }
        }

        let query = format!(
            "INSERT INTO novel_outlines (novel_id, parent_id, title, summary, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Outline>(&query)
            .bind(input.novel_id)
            .bind(input.parent_id)
            .bind(&input.title)
            .bind(input.summary.as_deref().unwrap_or(""))
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find an outline node by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Outline>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novel_outlines WHERE id = $1");
        sqlx::query_as::<_, Outline>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The novel's outline rows, flat, in sort order.
    pub async fn list_by_novel(
        pool: &PgPool,
        novel_id: DbId,
    ) -> Result<Vec<Outline>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novel_outlines \
             WHERE novel_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Outline>(&query)
            .bind(novel_id)
            .fetch_all(pool)
            .await
    }

    /// The novel's outline as a nested forest.
    pub async fn tree(pool: &PgPool, novel_id: DbId) -> Result<Vec<OutlineNode>, sqlx::Error> {
        let rows = Self::list_by_novel(pool, novel_id).await?;
        Ok(build_tree(rows))
    }

    /// Update an outline node's content fields.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOutline,
    ) -> Result<Option<Outline>, sqlx::Error> {
        let query = format!(
            "UPDATE novel_outlines SET \
                title = COALESCE($1, title), \
                summary = COALESCE($2, summary), \
                sort_order = COALESCE($3, sort_order), \
                updated_at = NOW() \
             WHERE id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Outline>(&query)
            .bind(&input.title)
            .bind(&input.summary)
            .bind(input.sort_order)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reparent a node, refusing cycles.
    ///
    /// Walks the proposed parent's ancestor chain; if the node being
    /// moved appears in it (or the chain exceeds [`MAX_DEPTH`]), the move
    /// is rejected with `false`. `None` detaches the node to a root.
    pub async fn move_node(
        pool: &PgPool,
        id: DbId,
        new_parent_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        if let Some(parent_id) = new_parent_id {
            if parent_id == id {
                return Ok(false);
            }

            let mut cursor = Some(parent_id);
            let mut depth = 0u32;
            while let Some(current) = cursor {
                if current == id {
                    return Ok(false);
                }
                depth += 1;
                if depth > MAX_DEPTH {
                    return Ok(false);
                }
                cursor = sqlx::query_scalar::<_, Option<DbId>>(
                    "SELECT parent_id FROM novel_outlines WHERE id = $1",
                )
                .bind(current)
                .fetch_optional(pool)
                .await?
                .flatten();
            }
        }

        let result = sqlx::query(
            "UPDATE novel_outlines SET parent_id = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(new_parent_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an outline node; its children become roots via the FK's
    /// ON DELETE SET NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM novel_outlines WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
