//! Repository for the `modules` table.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::module::{CreateModule, Module};
use crate::models::status::ModuleStatus;

/// Column list for `modules` queries.
const COLUMNS: &str = "id, title, sort_order, status_id, created_at, updated_at";

/// Read access (plus fixture creation) for curriculum modules.
pub struct ModuleRepo;

impl ModuleRepo {
    /// Insert a new module, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateModule) -> Result<Module, sqlx::Error> {
        let query = format!(
            "INSERT INTO modules (title, sort_order, status_id) \
             VALUES ($1, $2, COALESCE($3, 1)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(&input.title)
            .bind(input.sort_order)
            .bind(input.status_id)
            .fetch_one(pool)
            .await
    }

    /// Find a module by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Module>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM modules WHERE id = $1");
        sqlx::query_as::<_, Module>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List published modules in curriculum order.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules WHERE status_id = $1 ORDER BY sort_order"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(ModuleStatus::Published.id())
            .fetch_all(pool)
            .await
    }

    /// The module with the smallest sort order strictly greater than the
    /// given one, regardless of status. Draft modules can be unlock
    /// targets; visibility is a content-management concern.
    pub async fn find_next_after(
        pool: &PgPool,
        sort_order: i32,
    ) -> Result<Option<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules \
             WHERE sort_order > $1 \
             ORDER BY sort_order \
             LIMIT 1"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(sort_order)
            .fetch_optional(pool)
            .await
    }

    /// The module with the largest sort order strictly smaller than the
    /// given one, regardless of status.
    pub async fn find_previous_before(
        pool: &PgPool,
        sort_order: i32,
    ) -> Result<Option<Module>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM modules \
             WHERE sort_order < $1 \
             ORDER BY sort_order DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Module>(&query)
            .bind(sort_order)
            .fetch_optional(pool)
            .await
    }
}
