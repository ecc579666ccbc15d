//! Training schema entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use forma_core::types::{DbId, Timestamp};

/// A row from the `training_schemas` table. Schemas are authored by
/// coaching staff; read-only to the engine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainingSchema {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub weeks: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a training schema.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrainingSchema {
    pub name: String,
    pub description: Option<String>,
    /// Nominal program length. Defaults to 8 if omitted.
    pub weeks: Option<i32>,
}
