//! Repository for the `friends` graph.
//!
//! An undirected friendship is two directed rows written in one
//! transaction; either both land or neither does. The mutating surface
//! is best-effort: failures are logged and reported as `false`, never
//! propagated.

use inkstone_core::types::DbId;
use sqlx::PgPool;

use crate::models::friend::FriendProfile;

/// Provides mutual friendship mutation and friend listings.
pub struct FriendRepo;

impl FriendRepo {
    /// Create the friendship in both directions.
    ///
    /// Returns `false` when the pair already exists, the ids are equal,
    /// or the database rejects the writes; in every failure case neither
    /// direction is visible afterwards.
    pub async fn add_mutual(pool: &PgPool, user_id: DbId, friend_id: DbId) -> bool {
        match Self::insert_pair(pool, user_id, friend_id).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(user_id, friend_id, error = %err, "failed to create mutual friendship");
                false
            }
        }
    }

    /// Remove the friendship in both directions.
    pub async fn remove_mutual(pool: &PgPool, user_id: DbId, friend_id: DbId) -> bool {
        match Self::delete_pair(pool, user_id, friend_id).await {
            Ok(removed) => removed,
            Err(err) => {
                tracing::error!(user_id, friend_id, error = %err, "failed to remove mutual friendship");
                false
            }
        }
    }

    /// List a user's friends with their profiles, newest friendship first.
    pub async fn friends_of(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FriendProfile>, sqlx::Error> {
        sqlx::query_as::<_, FriendProfile>(
            "SELECT f.friend_id, u.username, u.nickname, u.avatar_url, \
                    f.created_at AS friends_since \
             FROM friends f \
             JOIN users u ON u.id = f.friend_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Whether a directed edge from `user_id` to `friend_id` exists.
    pub async fn are_friends(
        pool: &PgPool,
        user_id: DbId,
        friend_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM friends WHERE user_id = $1 AND friend_id = $2",
        )
        .bind(user_id)
        .bind(friend_id)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    /// Both directed inserts inside one transaction.
    async fn insert_pair(pool: &PgPool, user_id: DbId, friend_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO friends (user_id, friend_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(friend_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO friends (user_id, friend_id) VALUES ($1, $2)")
            .bind(friend_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Both directed deletes inside one transaction. `true` when any row
    /// was removed.
    async fn delete_pair(
        pool: &PgPool,
        user_id: DbId,
        friend_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query(
            "DELETE FROM friends \
             WHERE (user_id = $1 AND friend_id = $2) \
                OR (user_id = $2 AND friend_id = $1)",
        )
        .bind(user_id)
        .bind(friend_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(removed.rows_affected() > 0)
    }
}
