//! Repository for the `schema_progress` table.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::schema_progress::SchemaProgress;

/// Column list for `schema_progress` queries.
const COLUMNS: &str = "\
    id, user_id, schema_id, days_completed, current_day, \
    started_at, completed_at, updated_at";

/// Provides the running day counters for (user, schema) pairs.
pub struct SchemaProgressRepo;

impl SchemaProgressRepo {
    /// Record one completed training day.
    ///
    /// The first call creates the counter row; subsequent calls increment
    /// the completed-day count and advance the current-day pointer. Once an
    /// explicit completion is recorded the counters freeze — late or
    /// replayed day events after completion are no-ops.
    pub async fn record_day(
        pool: &PgPool,
        user_id: DbId,
        schema_id: DbId,
    ) -> Result<SchemaProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO schema_progress (user_id, schema_id, days_completed, current_day) \
             VALUES ($1, $2, 1, 2) \
             ON CONFLICT (user_id, schema_id) DO UPDATE SET \
                 days_completed = CASE \
                     WHEN schema_progress.completed_at IS NULL \
                     THEN schema_progress.days_completed + 1 \
                     ELSE schema_progress.days_completed \
                 END, \
                 current_day = CASE \
                     WHEN schema_progress.completed_at IS NULL \
                     THEN schema_progress.current_day + 1 \
                     ELSE schema_progress.current_day \
                 END, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchemaProgress>(&query)
            .bind(user_id)
            .bind(schema_id)
            .fetch_one(pool)
            .await
    }

    /// Record an explicit completion event for the (user, schema) pair.
    ///
    /// Idempotent: the first call sets `completed_at`, repeats keep the
    /// original timestamp. Creates the counter row if the user never
    /// recorded a day.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: DbId,
        schema_id: DbId,
    ) -> Result<SchemaProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO schema_progress (user_id, schema_id, completed_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (user_id, schema_id) DO UPDATE SET \
                 completed_at = COALESCE(schema_progress.completed_at, NOW()), \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SchemaProgress>(&query)
            .bind(user_id)
            .bind(schema_id)
            .fetch_one(pool)
            .await
    }

    /// Find the counters for one (user, schema) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        schema_id: DbId,
    ) -> Result<Option<SchemaProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schema_progress WHERE user_id = $1 AND schema_id = $2"
        );
        sqlx::query_as::<_, SchemaProgress>(&query)
            .bind(user_id)
            .bind(schema_id)
            .fetch_optional(pool)
            .await
    }
}
