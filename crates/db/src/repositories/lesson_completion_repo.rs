//! Repository for the `lesson_completions` table.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::completion::LessonCompletion;

/// Column list for `lesson_completions` queries.
const COLUMNS: &str = "id, user_id, lesson_id, score, time_spent_secs, completed_at";

/// Write/read access for the current lesson completion scheme.
pub struct LessonCompletionRepo;

impl LessonCompletionRepo {
    /// Record a completion, keyed by (user, lesson).
    ///
    /// A replayed recording overwrites score, time spent, and timestamp
    /// (latest write wins) rather than creating a duplicate, so the call
    /// is safe to retry and safe from multiple devices.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
        score: i32,
        time_spent_secs: i32,
    ) -> Result<LessonCompletion, sqlx::Error> {
        let query = format!(
            "INSERT INTO lesson_completions (user_id, lesson_id, score, time_spent_secs) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, lesson_id) DO UPDATE SET \
                 score = EXCLUDED.score, \
                 time_spent_secs = EXCLUDED.time_spent_secs, \
                 completed_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonCompletion>(&query)
            .bind(user_id)
            .bind(lesson_id)
            .bind(score)
            .bind(time_spent_secs)
            .fetch_one(pool)
            .await
    }

    /// Find the completion fact for one (user, lesson) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<Option<LessonCompletion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lesson_completions WHERE user_id = $1 AND lesson_id = $2"
        );
        sqlx::query_as::<_, LessonCompletion>(&query)
            .bind(user_id)
            .bind(lesson_id)
            .fetch_optional(pool)
            .await
    }

    /// Count completion rows for one (user, lesson) pair. Used by tests to
    /// assert the uniqueness invariant.
    pub async fn count(
        pool: &PgPool,
        user_id: DbId,
        lesson_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM lesson_completions WHERE user_id = $1 AND lesson_id = $2",
        )
        .bind(user_id)
        .bind(lesson_id)
        .fetch_one(pool)
        .await
    }
}
