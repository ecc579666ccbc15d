//! Repository for the `module_completions` and `module_unlocks` tables,
//! plus the reconciled completed-lesson read.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::completion::LEGACY_STATE_COMPLETED;
use crate::models::module_progress::{ModuleCompletion, ModuleUnlock};

/// Column list for `module_completions` queries.
const COMPLETION_COLUMNS: &str =
    "id, user_id, module_id, total_lessons, completed_lessons, completed_at";

/// Column list for `module_unlocks` queries.
const UNLOCK_COLUMNS: &str = "id, user_id, module_id, unlocked_at";

/// Provides the derived module progression facts and the dual-source
/// completed-lesson reconciliation.
pub struct ModuleProgressRepo;

impl ModuleProgressRepo {
    /// The set of lesson ids in a module the user has completed under
    /// either historical scheme.
    ///
    /// The platform accumulated two overlapping completion mechanisms; a
    /// lesson marked complete in either counts. The union is taken at read
    /// time — no migration happens here.
    pub async fn completed_lesson_ids(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT lc.lesson_id FROM lesson_completions lc \
             JOIN lessons l ON l.id = lc.lesson_id \
             WHERE lc.user_id = $1 AND l.module_id = $2 \
             UNION \
             SELECT lp.lesson_id FROM lesson_progress lp \
             JOIN lessons l ON l.id = lp.lesson_id \
             WHERE lp.user_id = $1 AND l.module_id = $2 AND lp.state = $3",
        )
        .bind(user_id)
        .bind(module_id)
        .bind(LEGACY_STATE_COMPLETED)
        .fetch_all(pool)
        .await
    }

    /// Insert a module completion fact unless one already exists.
    ///
    /// Returns `true` if this call inserted the row. A concurrent insert
    /// losing the race hits `DO NOTHING` and returns `false`; callers
    /// treat that as already-done, not as an error.
    pub async fn insert_completion_if_absent(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
        total_lessons: i32,
        completed_lessons: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO module_completions \
                 (user_id, module_id, total_lessons, completed_lessons) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, module_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(module_id)
        .bind(total_lessons)
        .bind(completed_lessons)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the completion fact for one (user, module) pair.
    pub async fn find_completion(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<Option<ModuleCompletion>, sqlx::Error> {
        let query = format!(
            "SELECT {COMPLETION_COLUMNS} FROM module_completions \
             WHERE user_id = $1 AND module_id = $2"
        );
        sqlx::query_as::<_, ModuleCompletion>(&query)
            .bind(user_id)
            .bind(module_id)
            .fetch_optional(pool)
            .await
    }

    /// Module ids the user has completed.
    pub async fn completed_module_ids(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT module_id FROM module_completions WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert an unlock fact unless one already exists. Returns `true` if
    /// this call inserted the row; once written an unlock is never revoked.
    pub async fn insert_unlock_if_absent(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO module_unlocks (user_id, module_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, module_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(module_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the unlock fact for one (user, module) pair.
    pub async fn find_unlock(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<Option<ModuleUnlock>, sqlx::Error> {
        let query = format!(
            "SELECT {UNLOCK_COLUMNS} FROM module_unlocks WHERE user_id = $1 AND module_id = $2"
        );
        sqlx::query_as::<_, ModuleUnlock>(&query)
            .bind(user_id)
            .bind(module_id)
            .fetch_optional(pool)
            .await
    }

    /// Module ids unlocked for the user.
    pub async fn unlocked_module_ids(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT module_id FROM module_unlocks WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count unlock rows for one (user, module) pair. Used by tests to
    /// assert the insert-once invariant.
    pub async fn count_unlocks(
        pool: &PgPool,
        user_id: DbId,
        module_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM module_unlocks WHERE user_id = $1 AND module_id = $2",
        )
        .bind(user_id)
        .bind(module_id)
        .fetch_one(pool)
        .await
    }
}
