//! Repository for the `melodies` table.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::melody::{CreateMelody, Melody, MelodyStats};

/// Column list for `melodies` queries.
const COLUMNS: &str = "id, user_id, title, status, duration_secs, bpm, created_at";

/// Provides create/list/status operations and platform statistics for
/// AI-generated melodies.
pub struct MelodyRepo;

impl MelodyRepo {
    /// Insert a melody job row in `generating` status.
    pub async fn create(pool: &PgPool, input: &CreateMelody) -> Result<Melody, sqlx::Error> {
        let query = format!(
            "INSERT INTO melodies (user_id, title, bpm) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Melody>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(input.bpm)
            .fetch_one(pool)
            .await
    }

    /// Find a melody by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Melody>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM melodies WHERE id = $1");
        sqlx::query_as::<_, Melody>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's melodies, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Melody>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM melodies WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Melody>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Set a melody's status and, when known, its duration.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        duration_secs: Option<i32>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE melodies \
             SET status = $2, duration_secs = COALESCE($3, duration_secs) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .bind(duration_secs)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Platform-wide melody statistics in one aggregate query:
    /// conditional counts per status and the average completed duration.
    pub async fn stats(pool: &PgPool) -> Result<MelodyStats, sqlx::Error> {
        sqlx::query_as::<_, MelodyStats>(
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE status = 'completed') AS completed, \
                    COUNT(*) FILTER (WHERE status = 'generating') AS generating, \
                    COUNT(*) FILTER (WHERE status = 'failed') AS failed, \
                    COALESCE(AVG(duration_secs) FILTER (WHERE status = 'completed'), 0)\
                        ::DOUBLE PRECISION AS avg_duration_secs \
             FROM melodies",
        )
        .fetch_one(pool)
        .await
    }
}
