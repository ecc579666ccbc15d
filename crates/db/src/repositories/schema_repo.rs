//! Repository for the `training_schemas` table.

use sqlx::PgPool;

use forma_core::types::DbId;

use crate::models::schema::{CreateTrainingSchema, TrainingSchema};

/// Column list for `training_schemas` queries.
const COLUMNS: &str = "id, name, description, weeks, created_at, updated_at";

/// Read access (plus fixture creation) for training schemas.
pub struct SchemaRepo;

impl SchemaRepo {
    /// Insert a new schema, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTrainingSchema,
    ) -> Result<TrainingSchema, sqlx::Error> {
        let query = format!(
            "INSERT INTO training_schemas (name, description, weeks) \
             VALUES ($1, $2, COALESCE($3, 8)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TrainingSchema>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.weeks)
            .fetch_one(pool)
            .await
    }

    /// Find a schema by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TrainingSchema>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_schemas WHERE id = $1");
        sqlx::query_as::<_, TrainingSchema>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all schemas by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<TrainingSchema>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM training_schemas ORDER BY name");
        sqlx::query_as::<_, TrainingSchema>(&query)
            .fetch_all(pool)
            .await
    }
}
