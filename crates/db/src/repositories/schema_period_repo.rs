//! Repository for the `schema_periods` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::schema_period::SchemaPeriod;
use crate::models::status::PeriodStatus;

/// Column list for `schema_periods` queries.
const COLUMNS: &str =
    "id, user_id, schema_id, started_on, status_id, closed_at, created_at, updated_at";

/// Provides period lifecycle operations.
pub struct SchemaPeriodRepo;

impl SchemaPeriodRepo {
    /// Open a new active period for the user, closing any currently active
    /// one in the same transaction.
    ///
    /// Closing due to a switch sets the period status and `closed_at` but
    /// never touches the schema's progress counters; switching away from a
    /// schema is not finishing it. The partial unique index on active
    /// periods makes a concurrent double-start fail one of the inserts
    /// instead of producing two active rows.
    pub async fn start(
        pool: &PgPool,
        user_id: DbId,
        schema_id: DbId,
        started_on: NaiveDate,
    ) -> Result<SchemaPeriod, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let closed = sqlx::query(
            "UPDATE schema_periods \
             SET status_id = $2, closed_at = NOW() \
             WHERE user_id = $1 AND status_id = $3",
        )
        .bind(user_id)
        .bind(PeriodStatus::Completed.id())
        .bind(PeriodStatus::Active.id())
        .execute(&mut *tx)
        .await?;

        if closed.rows_affected() > 0 {
            tracing::debug!(user_id, "Closed previously active period");
        }

        let query = format!(
            "INSERT INTO schema_periods (user_id, schema_id, started_on, status_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        let period = sqlx::query_as::<_, SchemaPeriod>(&query)
            .bind(user_id)
            .bind(schema_id)
            .bind(started_on)
            .bind(PeriodStatus::Active.id())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(period)
    }

    /// The user's currently active period, if any.
    pub async fn find_active(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<SchemaPeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schema_periods WHERE user_id = $1 AND status_id = $2"
        );
        sqlx::query_as::<_, SchemaPeriod>(&query)
            .bind(user_id)
            .bind(PeriodStatus::Active.id())
            .fetch_optional(pool)
            .await
    }

    /// All periods for a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<SchemaPeriod>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schema_periods \
             WHERE user_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SchemaPeriod>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
