//! Repository for the legacy `lesson_progress` table.
//!
//! The engine never writes this table in normal operation; completions
//! recorded under the legacy scheme are merged in at read time by
//! [`ModuleProgressRepo`](crate::repositories::ModuleProgressRepo).
//! The writer here exists for backfill tooling and test fixtures.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::completion::{LegacyLessonProgress, LEGACY_STATE_COMPLETED};

/// Column list for `lesson_progress` queries.
const COLUMNS: &str = "id, user_id, lesson_id, state, updated_at";

/// Read access (plus fixture writes) for legacy lesson progress.
pub struct LegacyProgressRepo;

impl LegacyProgressRepo {
    /// Mark a lesson completed under the legacy scheme.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<LegacyLessonProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO lesson_progress (user_id, lesson_id, state) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, lesson_id) DO UPDATE SET \
                 state = EXCLUDED.state, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LegacyLessonProgress>(&query)
            .bind(user_id)
            .bind(lesson_id)
            .bind(LEGACY_STATE_COMPLETED)
            .fetch_one(pool)
            .await
    }

    /// Find the legacy progress row for one (user, lesson) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<Option<LegacyLessonProgress>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM lesson_progress WHERE user_id = $1 AND lesson_id = $2");
        sqlx::query_as::<_, LegacyLessonProgress>(&query)
            .bind(user_id)
            .bind(lesson_id)
            .fetch_optional(pool)
            .await
    }
}
