//! Repository for the `user_onboarding` table.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::onboarding::UserOnboarding;

/// Column list for `user_onboarding` queries.
const COLUMNS: &str = "\
    id, user_id, welcome_video_watched, goal_set, challenges_selected, \
    schema_selected, nutrition_plan_selected, forum_intro_done, \
    completed, completed_at, created_at, updated_at";

/// Provides milestone writes and reads for onboarding state.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Get the onboarding record for a user, creating one with defaults if
    /// it does not exist yet (first-touch semantics).
    ///
    /// Uses a no-op `DO UPDATE` to guarantee `RETURNING` always produces a
    /// row even when two first touches race.
    pub async fn get_or_create(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<UserOnboarding, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_onboarding (user_id) \
             VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = user_onboarding.user_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Set one milestone boolean for a user.
    ///
    /// `column` must be one of the static milestone column names from
    /// `forma_core::onboarding` (the caller validates the key and resolves
    /// it; arbitrary strings never reach this query). Milestones are
    /// OR-merged: a `false` write never clears an already-satisfied
    /// milestone, which keeps the derived step monotone.
    pub async fn set_milestone(
        pool: &PgPool,
        user_id: DbId,
        column: &'static str,
        value: bool,
    ) -> Result<UserOnboarding, sqlx::Error> {
        let query = format!(
            "UPDATE user_onboarding \
             SET {column} = {column} OR $2 \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .bind(value)
            .fetch_one(pool)
            .await
    }

    /// Flip the sticky completed flag, keeping the first completion
    /// timestamp. Returns `true` only for the call that made the
    /// transition.
    pub async fn mark_completed(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_onboarding \
             SET completed = TRUE, completed_at = COALESCE(completed_at, NOW()) \
             WHERE user_id = $1 AND completed = FALSE",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
