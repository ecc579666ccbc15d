//! Repository for the `training_profiles` table.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::training_profile::TrainingProfile;

/// Column list for `training_profiles` queries.
const COLUMNS: &str = "id, user_id, training_frequency, created_at, updated_at";

/// Provides per-user training configuration.
pub struct TrainingProfileRepo;

impl TrainingProfileRepo {
    /// Set (upsert) the user's weekly training frequency.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        training_frequency: i32,
    ) -> Result<TrainingProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_profiles (user_id, training_frequency) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 training_frequency = EXCLUDED.training_frequency \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingProfile>(&query)
            .bind(user_id)
            .bind(training_frequency)
            .fetch_one(pool)
            .await
    }

    /// Find the profile for a user. `None` means the defaults apply.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<TrainingProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_profiles WHERE user_id = $1");
        sqlx::query_as::<_, TrainingProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
