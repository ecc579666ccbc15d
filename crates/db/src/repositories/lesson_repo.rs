//! Repository for the `lessons` table.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::lesson::{CreateLesson, Lesson};
use crate::models::status::LessonStatus;

/// Column list for `lessons` queries.
const COLUMNS: &str = "id, module_id, title, sort_order, status_id, created_at, updated_at";

/// Read access (plus fixture creation) for lessons.
pub struct LessonRepo;

impl LessonRepo {
    /// Insert a new lesson, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO lessons (module_id, title, sort_order, status_id) \
             VALUES ($1, $2, $3, COALESCE($4, 1)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.module_id)
            .bind(&input.title)
            .bind(input.sort_order)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Find a lesson by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lesson>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lessons WHERE id = $1");
        sqlx::query_as::<_, Lesson>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the published lessons of a module in lesson order.
    pub async fn list_published_by_module(
        pool: &PgPool,
        module_id: DbId,
    ) -> Result<Vec<Lesson>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lessons \
             WHERE module_id = $1 AND status_id = $2 \
             ORDER BY sort_order"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(module_id)
            .bind(LessonStatus::Published.id())
            .fetch_all(pool)
            .await
    }
}
